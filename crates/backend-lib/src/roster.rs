// ============================
// crates/backend-lib/src/roster.rs
// ============================
//! Roster store abstraction with an in-memory implementation.
//!
//! The store owns every activity record for the lifetime of the process.
//! Only participant lists change after construction.
use std::fmt;
use std::sync::Arc;

use activities_common::{Activity, ActivityName, Email};
use dashmap::DashMap;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Outcome of a rejected roster mutation. The store is unchanged whenever one
/// of these is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RosterError {
    #[error("activity {activity:?} not found")]
    NotFound { activity: ActivityName },

    #[error("{email} is already registered for {activity:?}")]
    AlreadyRegistered { activity: ActivityName, email: Email },

    #[error("{email} is not registered for {activity:?}")]
    NotRegistered { activity: ActivityName, email: Email },
}

/// Trait for roster backends
pub trait Roster: Send + Sync {
    /// Every activity in catalog order.
    fn get_all(&self) -> RosterSnapshot;

    /// A single activity, if it exists.
    fn get(&self, name: &str) -> Option<Activity>;

    fn contains(&self, name: &str) -> bool;

    /// Append `email` to the activity's participants.
    fn add_participant(&self, name: &str, email: &str) -> Result<(), RosterError>;

    /// Remove `email` from the activity's participants.
    fn remove_participant(&self, name: &str, email: &str) -> Result<(), RosterError>;
}

/// Ordered activity table.
///
/// Serializes as a JSON object keyed by activity name in insertion order,
/// which `serde_json::Map` would otherwise sort.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterSnapshot {
    entries: Vec<(ActivityName, Activity)>,
}

impl RosterSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry. Returns `false` and leaves the table untouched if the
    /// name is already present.
    pub fn insert(&mut self, name: impl Into<ActivityName>, activity: Activity) -> bool {
        let name = name.into();
        if self.get(&name).is_some() {
            return false;
        }
        self.entries.push((name, activity));
        true
    }

    pub fn get(&self, name: &str) -> Option<&Activity> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, activity)| activity)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Activity)> {
        self.entries.iter().map(|(n, a)| (n.as_str(), a))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for RosterSnapshot {
    type Item = (ActivityName, Activity);
    type IntoIter = std::vec::IntoIter<(ActivityName, Activity)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Serialize for RosterSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, activity) in &self.entries {
            map.serialize_entry(name, activity)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for RosterSnapshot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SnapshotVisitor;

        impl<'de> Visitor<'de> for SnapshotVisitor {
            type Value = RosterSnapshot;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of activity name to activity")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut snapshot = RosterSnapshot::new();
                while let Some((name, activity)) = access.next_entry::<ActivityName, Activity>()? {
                    if !snapshot.insert(name.clone(), activity) {
                        return Err(serde::de::Error::custom(format!(
                            "duplicate activity {name:?}"
                        )));
                    }
                }
                Ok(snapshot)
            }
        }

        deserializer.deserialize_map(SnapshotVisitor)
    }
}

/// In-memory roster.
///
/// Records live in a `DashMap`; each mutation holds the entry's write guard
/// for the whole check-then-act sequence, so concurrent calls on the same
/// activity are serialized while different activities proceed in parallel.
#[derive(Debug, Clone)]
pub struct InMemoryRoster {
    order: Arc<[ActivityName]>,
    activities: Arc<DashMap<ActivityName, Activity>>,
}

impl InMemoryRoster {
    pub fn new(seed: RosterSnapshot) -> Self {
        let activities = DashMap::with_capacity(seed.len());
        let mut order = Vec::with_capacity(seed.len());
        for (name, activity) in seed {
            order.push(name.clone());
            activities.insert(name, activity);
        }
        Self {
            order: order.into(),
            activities: Arc::new(activities),
        }
    }
}

impl Roster for InMemoryRoster {
    fn get_all(&self) -> RosterSnapshot {
        let mut snapshot = RosterSnapshot::new();
        for name in self.order.iter() {
            if let Some(entry) = self.activities.get(name) {
                snapshot.insert(name.clone(), entry.value().clone());
            }
        }
        snapshot
    }

    fn get(&self, name: &str) -> Option<Activity> {
        self.activities.get(name).map(|entry| entry.value().clone())
    }

    fn contains(&self, name: &str) -> bool {
        self.activities.contains_key(name)
    }

    fn add_participant(&self, name: &str, email: &str) -> Result<(), RosterError> {
        let mut activity = self
            .activities
            .get_mut(name)
            .ok_or_else(|| RosterError::NotFound {
                activity: name.to_string(),
            })?;

        if activity.has_participant(email) {
            return Err(RosterError::AlreadyRegistered {
                activity: name.to_string(),
                email: email.to_string(),
            });
        }

        activity.participants.push(email.to_string());
        Ok(())
    }

    fn remove_participant(&self, name: &str, email: &str) -> Result<(), RosterError> {
        let mut activity = self
            .activities
            .get_mut(name)
            .ok_or_else(|| RosterError::NotFound {
                activity: name.to_string(),
            })?;

        let position = activity
            .participants
            .iter()
            .position(|p| p == email)
            .ok_or_else(|| RosterError::NotRegistered {
                activity: name.to_string(),
                email: email.to_string(),
            })?;

        // `remove` keeps the remaining participants in signup order.
        activity.participants.remove(position);
        Ok(())
    }
}
