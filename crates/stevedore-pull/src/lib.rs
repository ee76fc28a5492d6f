//! # stevedore-pull
//!
//! Concurrent image pulling for Stevedore.
//!
//! Handles:
//! - **Runtime**: the `PullRuntime` seam and the Docker CLI subprocess
//!   implementation behind it.
//! - **Board**: the shared status table read by the renderer and written
//!   by pull workers.
//! - **Pool**: semaphore-bounded fan-out with failure isolation and
//!   interrupt handling.
//! - **Render**: the live status table drawn to stderr while pulls run.

pub mod board;
pub mod pool;
pub mod render;
pub mod runtime;

pub use board::{PullTask, StatusBoard};
pub use pool::{pull_all, PullFailure, PullOptions, PullReport};
pub use runtime::{DockerCli, PullOutcome, PullRuntime};
