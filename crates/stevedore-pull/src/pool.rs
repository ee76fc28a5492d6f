//! Semaphore-bounded concurrent pull execution.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use stevedore_common::constants;
use stevedore_common::types::{ImageRef, PullState};
use tokio::sync::Semaphore;

use crate::board::StatusBoard;
use crate::render;
use crate::runtime::{PullOutcome, PullRuntime};

/// Tuning knobs for a pull run.
#[derive(Debug, Clone)]
pub struct PullOptions {
    /// Maximum number of pulls in flight at once.
    pub concurrency: usize,
    /// Delay between live table redraws.
    pub refresh_interval: Duration,
    /// Whether to draw the live table to stderr while pulling.
    pub progress: bool,
}

impl Default for PullOptions {
    fn default() -> Self {
        Self {
            concurrency: constants::default_concurrency(),
            refresh_interval: Duration::from_millis(constants::RENDER_INTERVAL_MS),
            progress: true,
        }
    }
}

/// One failed pull in the final report.
#[derive(Debug, Clone)]
pub struct PullFailure {
    /// Image that failed to pull.
    pub image: ImageRef,
    /// Diagnostic text recorded for the failure.
    pub message: String,
}

/// Aggregate outcome of a pull run.
#[derive(Debug, Clone)]
pub struct PullReport {
    /// Number of images attempted.
    pub total: usize,
    /// Number of successful pulls.
    pub succeeded: usize,
    /// Every failed pull with its message, in table order.
    pub failures: Vec<PullFailure>,
    /// Whether the run was interrupted before all pulls were launched.
    pub interrupted: bool,
}

impl PullReport {
    /// Whether every requested pull succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Pulls every image under a bounded worker pool, updating a shared
/// status board as pulls progress.
///
/// At most `opts.concurrency` pulls run at once; the rest queue on the
/// semaphore. A failed pull never cancels its siblings. Setting `cancel`
/// stops queued pulls from launching (they are recorded as failed) while
/// in-flight pulls run to completion. Returns once every task is
/// terminal and the final table has been drawn.
pub async fn pull_all<R: PullRuntime>(
    runtime: Arc<R>,
    images: Vec<ImageRef>,
    opts: &PullOptions,
    cancel: Arc<AtomicBool>,
) -> PullReport {
    let board = Arc::new(StatusBoard::new(&images));
    let semaphore = Arc::new(Semaphore::new(opts.concurrency.max(1)));
    tracing::info!(
        images = images.len(),
        concurrency = opts.concurrency.max(1),
        "starting pull run"
    );

    let renderer = opts
        .progress
        .then(|| tokio::spawn(render::render_loop(board.clone(), opts.refresh_interval)));

    let mut workers = Vec::with_capacity(images.len());
    for (slot, image) in images.into_iter().enumerate() {
        let runtime = Arc::clone(&runtime);
        let board = Arc::clone(&board);
        let semaphore = Arc::clone(&semaphore);
        let cancel = Arc::clone(&cancel);
        workers.push(tokio::spawn(async move {
            let Ok(_permit) = semaphore.acquire_owned().await else {
                board.mark_finished(slot, &PullOutcome::failed("worker pool closed"));
                return;
            };
            if cancel.load(Ordering::SeqCst) {
                board.mark_finished(slot, &PullOutcome::failed("interrupted before start"));
                return;
            }
            board.mark_running(slot);
            let outcome = runtime.pull(&image).await;
            board.mark_finished(slot, &outcome);
        }));
    }

    for worker in workers {
        if let Err(e) = worker.await {
            tracing::error!(error = %e, "pull worker terminated abnormally");
        }
    }
    // A worker that died without reporting must not leave the board (and
    // the renderer) waiting forever.
    board.fail_unfinished("worker terminated abnormally");

    if let Some(renderer) = renderer {
        let _ = renderer.await;
    }

    let snapshot = board.snapshot();
    let succeeded = snapshot
        .iter()
        .filter(|t| t.state == PullState::Succeeded)
        .count();
    let failures = snapshot
        .iter()
        .filter(|t| t.state == PullState::Failed)
        .map(|t| PullFailure {
            image: t.image.clone(),
            message: t.message.clone(),
        })
        .collect();

    let report = PullReport {
        total: snapshot.len(),
        succeeded,
        failures,
        interrupted: cancel.load(Ordering::SeqCst),
    };
    tracing::info!(
        total = report.total,
        succeeded = report.succeeded,
        failed = report.failures.len(),
        "pull run finished"
    );
    report
}
