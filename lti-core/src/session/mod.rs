//! Launch sessions
//!
//! Every verified launch gets its own [`SessionId`]. The id travels with the
//! browser (cookie, query string, hidden form field) so concurrent learners
//! never see each other's outcome URL.

mod store;

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::launch::LaunchParams;

pub use store::{DEFAULT_MAX_SESSIONS, SessionStore};

/// Name shown when the consumer did not share the learner's name
pub const DEFAULT_DISPLAY_NAME: &str = "Student";

/// Opaque identifier minted for each launch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Mint a fresh random id
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

impl FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

/// What the tool remembers about a launch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchSession {
    pub outcome_service_url: String,
    pub person_name: Option<String>,
    pub person_email: Option<String>,
    pub launched_at: DateTime<Utc>,
}

impl LaunchSession {
    /// Session for a launch that just verified
    pub fn from_launch(params: LaunchParams) -> Self {
        Self {
            outcome_service_url: params.outcome_service_url,
            person_name: params.person_name,
            person_email: params.person_email,
            launched_at: Utc::now(),
        }
    }

    /// Name used to greet the learner
    pub fn display_name(&self) -> &str {
        self.person_name.as_deref().unwrap_or(DEFAULT_DISPLAY_NAME)
    }
}
