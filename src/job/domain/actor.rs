//! Who is acting on a job, and on whose behalf storage is reached.

use super::Driver;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The party changing a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "driver", rename_all = "snake_case")]
pub enum Actor {
    /// Office staff with full edit rights.
    Staff,
    /// A driver updating jobs from the field.
    Driver(Driver),
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Staff => f.write_str("staff"),
            Self::Driver(driver) => write!(f, "{driver}"),
        }
    }
}

/// Opaque token identifying the caller of a repository operation.
///
/// Repositories receive it with every call so that authorization hooks can
/// be added at the storage boundary without changing the port.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallerIdentity(String);

impl CallerIdentity {
    const ANONYMOUS: &'static str = "anonymous";

    /// Wraps a caller token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Identity used when no session information is available.
    #[must_use]
    pub fn anonymous() -> Self {
        Self(Self::ANONYMOUS.to_owned())
    }

    /// Returns the raw token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CallerIdentity {
    fn default() -> Self {
        Self::anonymous()
    }
}

impl fmt::Display for CallerIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
