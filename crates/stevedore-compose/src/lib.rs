//! # stevedore-compose
//!
//! Compose configuration handling for Stevedore.
//!
//! Handles:
//! - **Document**: loading a single compose YAML file into a typed view.
//! - **Extract**: recursive, cycle-safe traversal over `include` directives
//!   collecting unique image references in first-appearance order.
//! - **Discover**: probing for a standard compose file name.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod discover;
pub mod document;
pub mod extract;

pub use extract::extract_images;
