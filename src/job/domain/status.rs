//! Job completion status.

use super::InvalidStatus;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Completion status of a job.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobStatus {
    /// Not yet worked. The status every new job starts in.
    #[default]
    #[serde(rename = "pending")]
    Pending,
    /// Finished without problems.
    #[serde(rename = "complete")]
    Complete,
    /// Attempted but left unfinished because of a problem on site.
    #[serde(rename = "incomplete - issue")]
    IncompleteIssue,
}

impl JobStatus {
    /// Every status value.
    pub const ALL: [Self; 3] = [Self::Pending, Self::Complete, Self::IncompleteIssue];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Complete => "complete",
            Self::IncompleteIssue => "incomplete - issue",
        }
    }
}

impl TryFrom<&str> for JobStatus {
    type Error = InvalidStatus;

    /// Parses a status label. Surrounding whitespace is ignored; the label
    /// itself must match exactly.
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "pending" => Ok(Self::Pending),
            "complete" => Ok(Self::Complete),
            "incomplete - issue" => Ok(Self::IncompleteIssue),
            _ => Err(InvalidStatus(value.to_owned())),
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
