//! Recursive image extraction over a compose document tree.
//!
//! Includes are traversed depth-first with an explicit visited set keyed
//! by canonicalized path, so include cycles terminate and a document
//! reachable through several includes is processed once.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use stevedore_common::error::{Result, StevedoreError};
use stevedore_common::types::ImageRef;

use crate::document;

/// Extracts every unique image reference reachable from the compose
/// document at `root`, in first-appearance order.
///
/// A document's own services are collected before its includes are
/// traversed; includes are followed in the order the `include` list names
/// them. Repeated runs over the same tree produce the same list.
///
/// # Errors
///
/// Returns `StevedoreError::Parse` if any document is malformed,
/// `StevedoreError::IncludeResolution` if an included path does not
/// exist, and `StevedoreError::Io` if the root itself cannot be read.
pub fn extract_images(root: &Path) -> Result<Vec<ImageRef>> {
    let mut visited = HashSet::new();
    let mut seen = HashSet::new();
    let mut images = Vec::new();
    walk(root, None, &mut visited, &mut seen, &mut images)?;
    tracing::info!(root = %root.display(), count = images.len(), "extraction complete");
    Ok(images)
}

fn walk(
    path: &Path,
    included_from: Option<&Path>,
    visited: &mut HashSet<PathBuf>,
    seen: &mut HashSet<ImageRef>,
    images: &mut Vec<ImageRef>,
) -> Result<()> {
    let canonical = std::fs::canonicalize(path).map_err(|source| match included_from {
        Some(parent) => StevedoreError::IncludeResolution {
            path: path.to_path_buf(),
            included_from: parent.to_path_buf(),
        },
        None => StevedoreError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    if !visited.insert(canonical.clone()) {
        tracing::debug!(path = %canonical.display(), "document already visited, skipping");
        return Ok(());
    }

    let doc = document::load(&canonical)?;

    for entry in &doc.service_images {
        let image = ImageRef::new(entry.image.clone());
        if seen.insert(image.clone()) {
            tracing::debug!(service = %entry.service, image = %image, "collected image");
            images.push(image);
        }
    }

    for include in &doc.includes {
        walk(include, Some(&canonical), visited, seen, images)?;
    }

    Ok(())
}
