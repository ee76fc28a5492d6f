//! Probing for a standard compose file.

use std::path::{Path, PathBuf};

use stevedore_common::constants::COMPOSE_FILE_CANDIDATES;

/// Searches `dir` for a compose file under its standard names.
///
/// Returns the first candidate that exists, in the order
/// `compose.yaml`, `compose.yml`, `docker-compose.yaml`,
/// `docker-compose.yml`.
#[must_use]
pub fn find_compose_file(dir: &Path) -> Option<PathBuf> {
    COMPOSE_FILE_CANDIDATES
        .iter()
        .map(|name| dir.join(name))
        .find(|candidate| candidate.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_returns_none_in_empty_dir() {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        assert!(find_compose_file(dir.path()).is_none());
    }

    #[test]
    fn find_prefers_compose_yaml_over_legacy_names() {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        std::fs::write(dir.path().join("docker-compose.yml"), "services: {}\n")
            .expect("failed to write");
        std::fs::write(dir.path().join("compose.yaml"), "services: {}\n")
            .expect("failed to write");

        let found = find_compose_file(dir.path()).expect("should find a file");
        assert_eq!(found, dir.path().join("compose.yaml"));
    }

    #[test]
    fn find_falls_back_to_docker_compose_yml() {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        std::fs::write(dir.path().join("docker-compose.yml"), "services: {}\n")
            .expect("failed to write");

        let found = find_compose_file(dir.path()).expect("should find a file");
        assert_eq!(found, dir.path().join("docker-compose.yml"));
    }
}
