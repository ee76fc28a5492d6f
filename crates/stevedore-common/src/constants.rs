//! System-wide constants and defaults.

/// Application name used in CLI output.
pub const APP_NAME: &str = "stevedore";

/// Binary name for the CLI.
pub const BIN_NAME: &str = "stv";

/// Default file for the extracted image list, one image per line.
pub const DEFAULT_IMAGES_FILE: &str = "images.txt";

/// Standard compose file names probed when no path is given, in order.
pub const COMPOSE_FILE_CANDIDATES: [&str; 4] = [
    "compose.yaml",
    "compose.yml",
    "docker-compose.yaml",
    "docker-compose.yml",
];

/// Name of the container runtime binary looked up on `PATH`.
pub const RUNTIME_BINARY: &str = "docker";

/// Interval between status table redraws, in milliseconds.
pub const RENDER_INTERVAL_MS: u64 = 200;

/// Upper bound applied to the derived default concurrency.
const MAX_DEFAULT_CONCURRENCY: usize = 8;

/// Returns the default pull concurrency for this host.
///
/// Uses the number of available processing units, clamped so a large
/// machine does not hammer the registry by default.
#[must_use]
pub fn default_concurrency() -> usize {
    std::thread::available_parallelism()
        .map_or(4, std::num::NonZeroUsize::get)
        .min(MAX_DEFAULT_CONCURRENCY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_concurrency_is_bounded() {
        let c = default_concurrency();
        assert!(c >= 1);
        assert!(c <= MAX_DEFAULT_CONCURRENCY);
    }
}
