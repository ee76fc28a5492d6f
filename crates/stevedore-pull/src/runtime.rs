//! Container runtime invocation.
//!
//! The `PullRuntime` trait is the seam between the pull pool and the
//! external runtime. Production code goes through `DockerCli`, which
//! shells out to `docker pull`; tests substitute instrumented fakes.

use std::future::Future;
use std::path::PathBuf;

use stevedore_common::constants::RUNTIME_BINARY;
use stevedore_common::error::{Result, StevedoreError};
use stevedore_common::types::ImageRef;

/// Outcome of one pull operation as reported by the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullOutcome {
    /// Whether the runtime reported success.
    pub success: bool,
    /// Diagnostic text: the runtime's status line on success, its error
    /// output on failure.
    pub detail: String,
}

impl PullOutcome {
    /// A successful outcome with the given status text.
    #[must_use]
    pub fn succeeded(detail: impl Into<String>) -> Self {
        Self {
            success: true,
            detail: detail.into(),
        }
    }

    /// A failed outcome with the given diagnostic text.
    #[must_use]
    pub fn failed(detail: impl Into<String>) -> Self {
        Self {
            success: false,
            detail: detail.into(),
        }
    }
}

/// A runtime capable of fetching images into its local store.
pub trait PullRuntime: Send + Sync + 'static {
    /// Pulls one image. Never fails at the Rust level: runtime errors are
    /// reported inside the returned outcome so one bad image cannot abort
    /// its siblings.
    fn pull(&self, image: &ImageRef) -> impl Future<Output = PullOutcome> + Send;
}

/// The Docker CLI invoked as a subprocess.
#[derive(Debug, Clone)]
pub struct DockerCli {
    binary: PathBuf,
}

impl DockerCli {
    /// Locates the `docker` binary on `PATH`.
    ///
    /// # Errors
    ///
    /// Returns `StevedoreError::Runtime` if no binary is found.
    pub fn locate() -> Result<Self> {
        let binary = which::which(RUNTIME_BINARY).map_err(|e| StevedoreError::Runtime {
            message: format!("'{RUNTIME_BINARY}' not found on PATH: {e}"),
        })?;
        tracing::debug!(binary = %binary.display(), "located container runtime");
        Ok(Self { binary })
    }

    /// Uses an explicit binary path instead of searching `PATH`.
    #[must_use]
    pub const fn with_binary(binary: PathBuf) -> Self {
        Self { binary }
    }
}

impl PullRuntime for DockerCli {
    fn pull(&self, image: &ImageRef) -> impl Future<Output = PullOutcome> + Send {
        async move {
            tracing::info!(image = %image, "pulling image");
            let output = tokio::process::Command::new(&self.binary)
                .args(["pull", image.as_str()])
                .output()
                .await;

            match output {
                Ok(out) if out.status.success() => {
                    tracing::info!(image = %image, "pull succeeded");
                    PullOutcome::succeeded(
                        last_line(&out.stdout).unwrap_or_else(|| "pulled".to_owned()),
                    )
                }
                Ok(out) => {
                    let detail = last_line(&out.stderr)
                        .or_else(|| last_line(&out.stdout))
                        .unwrap_or_else(|| format!("exited with {}", out.status));
                    tracing::warn!(image = %image, detail, "pull failed");
                    PullOutcome::failed(detail)
                }
                Err(e) => {
                    tracing::warn!(image = %image, error = %e, "failed to invoke runtime");
                    PullOutcome::failed(format!(
                        "failed to invoke {}: {e}",
                        self.binary.display()
                    ))
                }
            }
        }
    }
}

/// Last non-empty line of a byte stream, trimmed.
fn last_line(bytes: &[u8]) -> Option<String> {
    String::from_utf8_lossy(bytes)
        .lines()
        .rev()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_line_picks_final_nonempty_line() {
        let text = b"7.2: Pulling from library/redis\n\nStatus: Image is up to date\n\n";
        assert_eq!(
            last_line(text).as_deref(),
            Some("Status: Image is up to date")
        );
    }

    #[test]
    fn last_line_of_empty_stream_is_none() {
        assert!(last_line(b"").is_none());
        assert!(last_line(b"\n  \n").is_none());
    }

    #[test]
    fn outcome_constructors_set_success_flag() {
        assert!(PullOutcome::succeeded("ok").success);
        assert!(!PullOutcome::failed("no").success);
    }

    #[tokio::test]
    async fn docker_cli_reports_nonzero_exit_as_failure() {
        // `false pull <image>` exits 1 with no output.
        let cli = DockerCli::with_binary(PathBuf::from("false"));
        let outcome = cli.pull(&ImageRef::new("nginx:1.25")).await;
        assert!(!outcome.success);
        assert!(!outcome.detail.is_empty());
    }

    #[tokio::test]
    async fn docker_cli_reports_missing_binary_as_failure() {
        let cli = DockerCli::with_binary(PathBuf::from("/nonexistent/docker"));
        let outcome = cli.pull(&ImageRef::new("nginx:1.25")).await;
        assert!(!outcome.success);
        assert!(outcome.detail.contains("failed to invoke"));
    }

    #[tokio::test]
    async fn docker_cli_reports_zero_exit_as_success() {
        let cli = DockerCli::with_binary(PathBuf::from("true"));
        let outcome = cli.pull(&ImageRef::new("nginx:1.25")).await;
        assert!(outcome.success);
    }
}
