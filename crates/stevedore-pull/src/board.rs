//! Shared pull status table.
//!
//! One coarse lock guards the whole table: each slot is written only by
//! the worker that owns it, the renderer takes whole-table snapshots, and
//! update frequency is low. Snapshots are not guaranteed to be mutually
//! consistent across entries, which is acceptable for a status display.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use stevedore_common::types::{ImageRef, PullState};

use crate::runtime::PullOutcome;

/// Status record for one image pull.
#[derive(Debug, Clone)]
pub struct PullTask {
    /// Image this task pulls.
    pub image: ImageRef,
    /// Current lifecycle state.
    pub state: PullState,
    /// Latest diagnostic text from the runtime, empty until known.
    pub message: String,
    /// Wall time of the pull, set when the task reaches a terminal state.
    pub elapsed: Option<Duration>,
    started: Option<Instant>,
}

/// Table of pull tasks shared between workers and the renderer.
#[derive(Debug)]
pub struct StatusBoard {
    tasks: Mutex<Vec<PullTask>>,
}

impl StatusBoard {
    /// Creates a board with one Pending task per image, in order.
    #[must_use]
    pub fn new(images: &[ImageRef]) -> Self {
        let tasks = images
            .iter()
            .map(|image| PullTask {
                image: image.clone(),
                state: PullState::Pending,
                message: String::new(),
                elapsed: None,
                started: None,
            })
            .collect();
        Self {
            tasks: Mutex::new(tasks),
        }
    }

    /// Number of tasks on the board.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the board holds no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Transitions the task in `slot` to Running.
    pub fn mark_running(&self, slot: usize) {
        if let Some(task) = self.lock().get_mut(slot) {
            task.state = PullState::Running;
            task.started = Some(Instant::now());
        }
    }

    /// Transitions the task in `slot` to its terminal state.
    pub fn mark_finished(&self, slot: usize, outcome: &PullOutcome) {
        if let Some(task) = self.lock().get_mut(slot) {
            task.state = if outcome.success {
                PullState::Succeeded
            } else {
                PullState::Failed
            };
            task.message = outcome.detail.clone();
            task.elapsed = task.started.map(|s| s.elapsed());
        }
    }

    /// Marks every non-terminal task as Failed with the given message.
    ///
    /// Called once all workers have been joined, so a worker that died
    /// without reporting cannot leave the board incomplete.
    pub fn fail_unfinished(&self, message: &str) {
        for task in self.lock().iter_mut() {
            if !task.state.is_terminal() {
                task.state = PullState::Failed;
                task.message = message.to_owned();
                task.elapsed = task.started.map(|s| s.elapsed());
            }
        }
    }

    /// Copies the current table contents.
    #[must_use]
    pub fn snapshot(&self) -> Vec<PullTask> {
        self.lock().clone()
    }

    /// Whether every task has reached a terminal state.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.lock().iter().all(|t| t.state.is_terminal())
    }

    fn lock(&self) -> MutexGuard<'_, Vec<PullTask>> {
        self.tasks.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn images(names: &[&str]) -> Vec<ImageRef> {
        names.iter().copied().map(ImageRef::new).collect()
    }

    #[test]
    fn new_board_is_all_pending_in_order() {
        let board = StatusBoard::new(&images(&["a:1", "b:2", "c:3"]));
        let tasks = board.snapshot();
        assert_eq!(tasks.len(), 3);
        assert!(tasks.iter().all(|t| t.state == PullState::Pending));
        assert_eq!(tasks[0].image.as_str(), "a:1");
        assert_eq!(tasks[2].image.as_str(), "c:3");
        assert!(!board.is_complete());
    }

    #[test]
    fn empty_board_is_complete() {
        let board = StatusBoard::new(&[]);
        assert!(board.is_empty());
        assert!(board.is_complete());
    }

    #[test]
    fn mark_running_then_finished_records_outcome() {
        let board = StatusBoard::new(&images(&["a:1", "b:2"]));
        board.mark_running(0);
        assert_eq!(board.snapshot()[0].state, PullState::Running);

        board.mark_finished(0, &PullOutcome::succeeded("Status: Downloaded"));
        board.mark_running(1);
        board.mark_finished(1, &PullOutcome::failed("manifest unknown"));

        let tasks = board.snapshot();
        assert_eq!(tasks[0].state, PullState::Succeeded);
        assert_eq!(tasks[0].message, "Status: Downloaded");
        assert!(tasks[0].elapsed.is_some());
        assert_eq!(tasks[1].state, PullState::Failed);
        assert_eq!(tasks[1].message, "manifest unknown");
        assert!(board.is_complete());
    }

    #[test]
    fn finish_without_running_leaves_no_elapsed() {
        let board = StatusBoard::new(&images(&["a:1"]));
        board.mark_finished(0, &PullOutcome::failed("interrupted before start"));
        let tasks = board.snapshot();
        assert_eq!(tasks[0].state, PullState::Failed);
        assert!(tasks[0].elapsed.is_none());
    }

    #[test]
    fn out_of_range_slot_is_ignored() {
        let board = StatusBoard::new(&images(&["a:1"]));
        board.mark_running(9);
        board.mark_finished(9, &PullOutcome::succeeded("ok"));
        assert_eq!(board.snapshot()[0].state, PullState::Pending);
    }

    #[test]
    fn fail_unfinished_only_touches_non_terminal_tasks() {
        let board = StatusBoard::new(&images(&["a:1", "b:2", "c:3"]));
        board.mark_running(0);
        board.mark_finished(0, &PullOutcome::succeeded("ok"));
        board.mark_running(1);

        board.fail_unfinished("worker lost");

        let tasks = board.snapshot();
        assert_eq!(tasks[0].state, PullState::Succeeded);
        assert_eq!(tasks[0].message, "ok");
        assert_eq!(tasks[1].state, PullState::Failed);
        assert_eq!(tasks[1].message, "worker lost");
        assert_eq!(tasks[2].state, PullState::Failed);
        assert!(board.is_complete());
    }
}
