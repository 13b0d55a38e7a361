//! Project model
//!
//! A project is the top-level grouping for expenses: a trip, a renovation,
//! a month of household spending. Each project owns its categories.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::ProjectId;

/// A top-level expense project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Unique identifier
    pub id: ProjectId,

    /// Project name
    pub name: String,

    /// Emoji glyph shown next to the name
    pub emoji: String,

    /// When the project (or anything inside it) was last modified
    pub updated_at: DateTime<Utc>,
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.emoji, self.name)
    }
}
