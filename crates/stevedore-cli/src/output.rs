//! Formatted output helpers for CLI commands.

// ANSI styling used for human-facing messages on stderr.
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const RED: &str = "\x1b[31m";
pub const RESET: &str = "\x1b[0m";

/// Formats a wall-clock duration in seconds as a compact human string.
#[must_use]
pub fn format_elapsed(seconds: f64) -> String {
    if seconds >= 60.0 {
        let minutes = (seconds / 60.0).floor();
        format!("{minutes:.0}m {:.0}s", seconds - minutes * 60.0)
    } else {
        format!("{seconds:.1}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_elapsed_sub_minute_uses_decimals() {
        assert_eq!(format_elapsed(0.0), "0.0s");
        assert_eq!(format_elapsed(12.34), "12.3s");
    }

    #[test]
    fn format_elapsed_minutes_and_seconds() {
        assert_eq!(format_elapsed(75.0), "1m 15s");
        assert_eq!(format_elapsed(120.0), "2m 0s");
    }
}
