//! Category model
//!
//! Categories group expenses within a project. Names are expected unique
//! within a project; the importer enforces that with lookup-or-create logic
//! rather than a hard constraint.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{CategoryId, ProjectId};

/// Emoji used when a category is created without one (e.g. from a legacy CSV)
pub const DEFAULT_CATEGORY_EMOJI: &str = "🏷️";

/// An expense category within a project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier
    pub id: CategoryId,

    /// Category name, unique within the project by convention
    pub name: String,

    /// The project this category belongs to
    pub project_id: ProjectId,

    /// Emoji glyph shown next to the name
    pub emoji: String,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.emoji, self.name)
    }
}
