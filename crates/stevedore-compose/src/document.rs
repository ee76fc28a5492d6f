//! Loading a single compose YAML file into a typed view.
//!
//! Only the parts of the compose model that matter for image extraction
//! are surfaced: `include` targets and per-service `image` strings, both
//! in document order. Everything else in the file is ignored.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use stevedore_common::error::{Result, StevedoreError};

/// One `include` entry: either a bare path or the long form.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum IncludeEntry {
    /// `include: [other-compose.yml]`
    Path(String),
    /// `include: [{path: other-compose.yml, ...}]`
    Long {
        path: PathSpec,
    },
}

/// The `path` field of a long-form include: one path or several.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PathSpec {
    One(String),
    Many(Vec<String>),
}

/// Top-level compose keys relevant to extraction.
#[derive(Debug, Default, Deserialize)]
struct RawDocument {
    #[serde(default)]
    include: Vec<IncludeEntry>,
    #[serde(default)]
    services: serde_yaml::Mapping,
}

#[derive(Debug, Deserialize)]
struct RawService {
    image: Option<String>,
}

/// A service name paired with the image it declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceImage {
    /// Service name as written in the compose file.
    pub service: String,
    /// Image reference string declared under the service's `image` key.
    pub image: String,
}

/// Typed view of one compose document.
#[derive(Debug, Clone)]
pub struct ComposeDocument {
    /// Path this document was loaded from.
    pub path: PathBuf,
    /// Include targets, resolved relative to this document's directory,
    /// in the order the `include` list names them.
    pub includes: Vec<PathBuf>,
    /// Service/image pairs in document order. Services without an
    /// `image` key are omitted.
    pub service_images: Vec<ServiceImage>,
}

/// Loads and parses the compose document at `path`.
///
/// # Errors
///
/// Returns `StevedoreError::Io` if the file cannot be read and
/// `StevedoreError::Parse` if its contents are not a valid compose
/// document.
pub fn load(path: &Path) -> Result<ComposeDocument> {
    let content = std::fs::read_to_string(path).map_err(|e| StevedoreError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse(path, &content)
}

fn parse(path: &Path, content: &str) -> Result<ComposeDocument> {
    let parse_err = |message: String| StevedoreError::Parse {
        path: path.to_path_buf(),
        message,
    };

    let root: serde_yaml::Value =
        serde_yaml::from_str(content).map_err(|e| parse_err(e.to_string()))?;

    // An empty file parses as null; treat it as an empty document.
    let raw: RawDocument = if root.is_null() {
        RawDocument::default()
    } else {
        serde_yaml::from_value(root).map_err(|e| parse_err(e.to_string()))?
    };

    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut includes = Vec::new();
    for entry in raw.include {
        match entry {
            IncludeEntry::Path(p) | IncludeEntry::Long { path: PathSpec::One(p) } => {
                includes.push(base_dir.join(p));
            }
            IncludeEntry::Long { path: PathSpec::Many(paths) } => {
                includes.extend(paths.into_iter().map(|p| base_dir.join(p)));
            }
        }
    }

    let mut service_images = Vec::new();
    for (name, value) in raw.services {
        let Some(service) = name.as_str().map(str::to_owned) else {
            return Err(parse_err(format!("service name must be a string, got {name:?}")));
        };
        if value.is_null() {
            continue;
        }
        if !value.is_mapping() {
            return Err(parse_err(format!("service '{service}' must be a mapping")));
        }
        let raw_service: RawService = serde_yaml::from_value(value)
            .map_err(|e| parse_err(format!("service '{service}': {e}")))?;
        if let Some(image) = raw_service.image {
            service_images.push(ServiceImage { service, image });
        }
    }

    tracing::debug!(
        path = %path.display(),
        includes = includes.len(),
        services = service_images.len(),
        "parsed compose document"
    );

    Ok(ComposeDocument {
        path: path.to_path_buf(),
        includes,
        service_images,
    })
}
