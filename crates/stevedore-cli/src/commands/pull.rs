//! `stv pull` — Pull listed images concurrently with live status.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use clap::Args;
use stevedore_common::constants;
use stevedore_common::types::ImageRef;
use stevedore_pull::{pull_all, DockerCli, PullOptions, PullReport};

use crate::output::{format_elapsed, BOLD, DIM, GREEN, RED, RESET, YELLOW};

/// Arguments for the `pull` subcommand.
#[derive(Args, Debug)]
pub struct PullArgs {
    /// File containing the image list, one image per line.
    #[arg(default_value = constants::DEFAULT_IMAGES_FILE)]
    pub images_file: PathBuf,

    /// Maximum number of pulls in flight at once.
    #[arg(
        short,
        long,
        env = "STEVEDORE_CONCURRENCY",
        default_value_t = constants::default_concurrency()
    )]
    pub concurrency: usize,

    /// Disable the live status table.
    #[arg(short, long)]
    pub quiet: bool,
}

/// Executes the `pull` command.
///
/// # Errors
///
/// Returns an error if the image list cannot be read, the container
/// runtime is unavailable, or at least one pull fails.
pub fn execute(args: PullArgs) -> anyhow::Result<()> {
    if !args.images_file.exists() {
        anyhow::bail!("image list not found: {}", args.images_file.display());
    }
    let content = std::fs::read_to_string(&args.images_file)?;
    let images: Vec<ImageRef> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ImageRef::new)
        .collect();

    if images.is_empty() {
        eprintln!("  {YELLOW}No images to pull.{RESET}");
        return Ok(());
    }

    let docker = Arc::new(DockerCli::locate()?);

    let cancel = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&cancel);
    ctrlc::set_handler(move || {
        flag.store(true, Ordering::SeqCst);
    })
    .map_err(|e| anyhow::anyhow!("failed to set Ctrl+C handler: {e}"))?;

    let opts = PullOptions {
        concurrency: args.concurrency,
        progress: !args.quiet,
        ..PullOptions::default()
    };

    eprintln!();
    eprintln!(
        "  {BOLD}{}{RESET} {DIM}v{}{RESET} pulling {} image(s), {} at a time",
        constants::APP_NAME,
        env!("CARGO_PKG_VERSION"),
        images.len(),
        opts.concurrency.max(1)
    );
    eprintln!();

    let started = Instant::now();
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let report = runtime.block_on(pull_all(docker, images, &opts, cancel));

    print_summary(&report, started.elapsed().as_secs_f64());

    if report.is_success() {
        Ok(())
    } else {
        anyhow::bail!(
            "{} of {} image pulls failed",
            report.failures.len(),
            report.total
        )
    }
}

fn print_summary(report: &PullReport, elapsed: f64) {
    eprintln!();
    if report.interrupted {
        eprintln!("  {YELLOW}Interrupted; queued pulls were not started.{RESET}");
    }
    if report.is_success() {
        eprintln!(
            "  {GREEN}{BOLD}Pulled {}{RESET}{GREEN} image(s) in {}.{RESET}",
            report.succeeded,
            format_elapsed(elapsed)
        );
    } else {
        eprintln!(
            "  {RED}{BOLD}{} of {} pulls failed{RESET} {DIM}({} succeeded, {}){RESET}",
            report.failures.len(),
            report.total,
            report.succeeded,
            format_elapsed(elapsed)
        );
        eprintln!();
        for failure in &report.failures {
            eprintln!(
                "    {RED}✗{RESET} {BOLD}{}{RESET}  {DIM}{}{RESET}",
                failure.image, failure.message
            );
        }
    }
}
