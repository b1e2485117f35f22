// ================
// common/src/lib.rs
// ================
//! Common types and structures
//! used for communication between the Mergington activities client and server.
//! This module defines the JSON bodies exchanged over HTTP.

use serde::{Deserialize, Serialize};

/// Student identifier. Stored exactly as submitted; no validation is applied.
pub type Email = String;

/// Activity name, the unique key of the roster.
pub type ActivityName = String;

/// One extracurricular offering as it appears on the wire.
///
/// The name is not part of the record: listings are JSON objects keyed by it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    pub description: String,
    pub schedule: String,
    /// Descriptive only; signups beyond this number are accepted.
    pub max_participants: u32,
    /// Enrolled emails in signup order.
    #[serde(default)]
    pub participants: Vec<Email>,
}

impl Activity {
    pub fn new(
        description: impl Into<String>,
        schedule: impl Into<String>,
        max_participants: u32,
    ) -> Self {
        Self {
            description: description.into(),
            schedule: schedule.into(),
            max_participants,
            participants: Vec::new(),
        }
    }

    /// Builder-style helper for seeding participants.
    #[must_use]
    pub fn with_participants<I, E>(mut self, participants: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Email>,
    {
        self.participants = participants.into_iter().map(Into::into).collect();
        self
    }

    pub fn has_participant(&self, email: &str) -> bool {
        self.participants.iter().any(|p| p == email)
    }
}

/// Body of every successful mutation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// Body of every error response.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorResponse {
    pub detail: String,
}

impl ErrorResponse {
    pub fn new(detail: impl Into<String>) -> Self {
        Self { detail: detail.into() }
    }
}
