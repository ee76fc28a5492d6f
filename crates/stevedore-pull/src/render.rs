//! Live status table rendering.
//!
//! A single renderer task polls the status board on a fixed interval and
//! redraws the table in place on stderr, exiting after the draw in which
//! every task is terminal. Formatting is split out as a pure function so
//! it can be tested without a terminal.

use std::io::Write as _;
use std::sync::Arc;
use std::time::Duration;

use stevedore_common::types::PullState;

use crate::board::{PullTask, StatusBoard};

const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

// Runtime diagnostics can be long; keep rows on one terminal line so the
// in-place redraw line count stays correct.
const MAX_MESSAGE_WIDTH: usize = 60;

/// Formats the status table for the given tasks.
#[must_use]
pub fn format_table(tasks: &[PullTask]) -> String {
    let done = tasks.iter().filter(|t| t.state.is_terminal()).count();
    let image_width = tasks
        .iter()
        .map(|t| t.image.as_str().len())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    out.push_str(&format!(
        "  {BOLD}Pulling images{RESET} {DIM}{done}/{} complete{RESET}\n",
        tasks.len()
    ));

    for (i, task) in tasks.iter().enumerate() {
        let color = state_color(task.state);
        let message = truncate(&task.message, MAX_MESSAGE_WIDTH);
        let message = if message.is_empty() {
            String::new()
        } else {
            format!("  {DIM}{message}{RESET}")
        };
        let elapsed = task
            .elapsed
            .map_or_else(String::new, |d| format!(" {DIM}({:.1}s){RESET}", d.as_secs_f64()));
        out.push_str(&format!(
            "    {:>3}  {:<image_width$}  {color}{:<9}{RESET}{message}{elapsed}\n",
            i + 1,
            task.image.as_str(),
            task.state,
        ));
    }

    out
}

const fn state_color(state: PullState) -> &'static str {
    match state {
        PullState::Pending => DIM,
        PullState::Running => YELLOW,
        PullState::Succeeded => GREEN,
        PullState::Failed => RED,
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_owned()
    } else {
        let kept: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{kept}…")
    }
}

/// Polls the board and redraws the table until every task is terminal.
pub(crate) async fn render_loop(board: Arc<StatusBoard>, interval: Duration) {
    let mut ticker = tokio::time::interval(interval);
    let mut drawn_lines = 0usize;
    loop {
        let _ = ticker.tick().await;
        let tasks = board.snapshot();
        redraw(&format_table(&tasks), &mut drawn_lines);
        if tasks.iter().all(|t| t.state.is_terminal()) {
            break;
        }
    }
}

/// Rewinds over the previous draw and writes the new table.
fn redraw(table: &str, drawn_lines: &mut usize) {
    let mut frame = String::from("\r");
    for _ in 0..*drawn_lines {
        frame.push_str("\x1b[1A\x1b[2K");
    }
    frame.push_str(table);
    *drawn_lines = table.lines().count();

    let mut stderr = std::io::stderr().lock();
    let _ = stderr.write_all(frame.as_bytes());
    let _ = stderr.flush();
}
