//! Seed catalog: the built-in activity list and the optional JSON override.
use std::collections::HashSet;
use std::path::Path;

use activities_common::Activity;
use thiserror::Error;

use crate::roster::RosterSnapshot;

/// Errors raised while loading a catalog at startup
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("catalog is empty")]
    Empty,

    #[error("activity {activity:?} lists {email} more than once")]
    DuplicateParticipant { activity: String, email: String },
}

/// The school's activity list as shipped.
pub fn builtin() -> RosterSnapshot {
    let entries = [
        (
            "Chess Club",
            Activity::new(
                "Learn strategies and compete in chess tournaments",
                "Fridays, 3:30 PM - 5:00 PM",
                12,
            )
            .with_participants(["michael@mergington.edu", "daniel@mergington.edu"]),
        ),
        (
            "Programming Class",
            Activity::new(
                "Learn programming fundamentals and build software projects",
                "Tuesdays and Thursdays, 3:30 PM - 4:30 PM",
                20,
            )
            .with_participants(["emma@mergington.edu", "sophia@mergington.edu"]),
        ),
        (
            "Gym Class",
            Activity::new(
                "Physical education and sports activities",
                "Mondays, Wednesdays, Fridays, 2:00 PM - 3:00 PM",
                30,
            )
            .with_participants(["john@mergington.edu", "olivia@mergington.edu"]),
        ),
        (
            "Basketball",
            Activity::new(
                "Join the school basketball team and compete in games",
                "Tuesdays and Thursdays, 4:00 PM - 5:30 PM",
                15,
            )
            .with_participants(["alex@mergington.edu"]),
        ),
        (
            "Tennis Club",
            Activity::new(
                "Learn tennis skills and participate in matches",
                "Wednesdays, 3:30 PM - 5:00 PM",
                10,
            )
            .with_participants(["sarah@mergington.edu"]),
        ),
        (
            "Art Club",
            Activity::new(
                "Express creativity through painting, drawing, and sculpture",
                "Mondays, 3:30 PM - 5:00 PM",
                18,
            )
            .with_participants(["lily@mergington.edu"]),
        ),
        (
            "Drama Club",
            Activity::new(
                "Perform in school plays and develop acting skills",
                "Thursdays, 4:00 PM - 6:00 PM",
                25,
            )
            .with_participants(["james@mergington.edu"]),
        ),
        (
            "Math Club",
            Activity::new(
                "Solve challenging problems and prepare for math competitions",
                "Wednesdays, 3:30 PM - 4:30 PM",
                15,
            )
            .with_participants(["ethan@mergington.edu"]),
        ),
        (
            "Debate Team",
            Activity::new(
                "Develop public speaking and argumentation skills",
                "Fridays, 4:00 PM - 5:30 PM",
                12,
            )
            .with_participants(["ava@mergington.edu"]),
        ),
    ];

    let mut catalog = RosterSnapshot::new();
    for (name, activity) in entries {
        catalog.insert(name, activity);
    }
    catalog
}

/// Parse a catalog from JSON and check its invariants.
pub fn from_json_str(json: &str) -> Result<RosterSnapshot, CatalogError> {
    let catalog: RosterSnapshot = serde_json::from_str(json)?;
    validate(&catalog)?;
    Ok(catalog)
}

/// Load a catalog file.
pub fn load(path: impl AsRef<Path>) -> Result<RosterSnapshot, CatalogError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let catalog = from_json_str(&json)?;
    tracing::info!(path = %path.display(), activities = catalog.len(), "loaded activity catalog");
    Ok(catalog)
}

/// Name uniqueness is enforced while parsing; this checks the rest.
pub fn validate(catalog: &RosterSnapshot) -> Result<(), CatalogError> {
    if catalog.is_empty() {
        return Err(CatalogError::Empty);
    }
    for (name, activity) in catalog.iter() {
        let mut seen = HashSet::new();
        if let Some(dup) = activity.participants.iter().find(|p| !seen.insert(p.as_str())) {
            return Err(CatalogError::DuplicateParticipant {
                activity: name.to_string(),
                email: dup.clone(),
            });
        }
    }
    Ok(())
}
