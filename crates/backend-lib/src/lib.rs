// ============================
// crates/backend-lib/src/lib.rs
// ============================
//! Core backend-lib functionality for the Mergington activities service.

pub mod catalog;
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod roster;
pub mod router;
pub mod telemetry;

use std::sync::Arc;

use crate::catalog::CatalogError;
use crate::config::Settings;
use crate::roster::{InMemoryRoster, Roster};

/// Application state shared across all handlers
pub struct AppState<R> {
    /// Roster store
    pub roster: Arc<R>,
    /// Settings
    pub settings: Arc<Settings>,
}

impl<R> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            roster: Arc::clone(&self.roster),
            settings: Arc::clone(&self.settings),
        }
    }
}

impl<R: Roster> AppState<R> {
    /// Create a new application state
    pub fn new(roster: R, settings: Settings) -> Self {
        Self {
            roster: Arc::new(roster),
            settings: Arc::new(settings),
        }
    }
}

impl AppState<InMemoryRoster> {
    /// Seed an in-memory roster from `catalog_path`, or the built-in catalog
    /// when none is configured.
    pub fn from_settings(settings: Settings) -> Result<Self, CatalogError> {
        let seed = match &settings.catalog_path {
            Some(path) => catalog::load(path)?,
            None => catalog::builtin(),
        };
        tracing::debug!(activities = seed.len(), "seeding roster");
        Ok(Self::new(InMemoryRoster::new(seed), settings))
    }
}
