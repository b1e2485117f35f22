// ==============
// crates/backend-lib/src/metrics.rs

//! Central place for metric keys
pub const ACTIVITIES_LISTED: &str = "activities.listed";
pub const SIGNUP_ACCEPTED: &str = "signup.accepted";
pub const SIGNUP_REJECTED: &str = "signup.rejected";
pub const UNREGISTER_ACCEPTED: &str = "unregister.accepted";
pub const UNREGISTER_REJECTED: &str = "unregister.rejected";
