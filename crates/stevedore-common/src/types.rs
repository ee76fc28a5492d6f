//! Domain primitive types used across the Stevedore workspace.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A container image reference as understood by the runtime's pull
/// operation (`registry/repo:tag` or `repo@digest`).
///
/// Two references are equal only if their full strings are equal: the same
/// repository under different tags yields distinct `ImageRef`s.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageRef(String);

impl ImageRef {
    /// Creates an image reference from a string value.
    #[must_use]
    pub fn new(image: impl Into<String>) -> Self {
        Self(image.into())
    }

    /// Returns the inner string representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle state of a single image pull.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PullState {
    /// Pull has been queued but no worker has picked it up.
    Pending,
    /// A worker is currently pulling this image.
    Running,
    /// The runtime reported a successful pull.
    Succeeded,
    /// The runtime reported a failure for this image.
    Failed,
}

impl PullState {
    /// Whether the pull has reached a terminal state.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

impl fmt::Display for PullState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Running => write!(f, "running"),
            Self::Succeeded => write!(f, "succeeded"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_ref_same_repo_different_tags_are_distinct() {
        let a = ImageRef::new("redis:7");
        let b = ImageRef::new("redis:7.2");
        assert_ne!(a, b);
    }

    #[test]
    fn image_ref_displays_inner_string() {
        let image = ImageRef::new("ghcr.io/acme/api:1.0");
        assert_eq!(image.to_string(), "ghcr.io/acme/api:1.0");
    }

    #[test]
    fn pull_state_terminal_classification() {
        assert!(!PullState::Pending.is_terminal());
        assert!(!PullState::Running.is_terminal());
        assert!(PullState::Succeeded.is_terminal());
        assert!(PullState::Failed.is_terminal());
    }

    #[test]
    fn pull_state_displays_lowercase() {
        assert_eq!(PullState::Running.to_string(), "running");
        assert_eq!(PullState::Failed.to_string(), "failed");
    }
}
