//! `stv extract` — Extract image references from a compose configuration.

use std::path::PathBuf;

use clap::Args;
use stevedore_common::constants;

use crate::output::{BOLD, GREEN, RESET, YELLOW};

/// Arguments for the `extract` subcommand.
#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Path to the compose file. Probes the standard names in the
    /// current directory when omitted.
    pub compose_file: Option<PathBuf>,

    /// Output file for the image list, one image per line.
    #[arg(default_value = constants::DEFAULT_IMAGES_FILE)]
    pub output: PathBuf,
}

/// Executes the `extract` command.
///
/// # Errors
///
/// Returns an error if no compose file can be found, if extraction
/// fails, or if the output file cannot be written.
pub fn execute(args: ExtractArgs) -> anyhow::Result<()> {
    let compose_file = match args.compose_file {
        Some(path) => path,
        None => {
            let cwd = std::env::current_dir()?;
            let Some(found) = stevedore_compose::discover::find_compose_file(&cwd) else {
                anyhow::bail!(
                    "no compose file found in the current directory; pass a path: {} extract <file>",
                    constants::BIN_NAME
                );
            };
            eprintln!(
                "  {YELLOW}No compose file specified, using {}{RESET}",
                found.display()
            );
            found
        }
    };

    tracing::info!(path = %compose_file.display(), "extracting images");
    let images = stevedore_compose::extract_images(&compose_file)?;

    if images.is_empty() {
        eprintln!(
            "  {YELLOW}No images found in {}{RESET}",
            compose_file.display()
        );
        return Ok(());
    }

    let mut content = images
        .iter()
        .map(stevedore_common::types::ImageRef::as_str)
        .collect::<Vec<_>>()
        .join("\n");
    content.push('\n');
    std::fs::write(&args.output, content)?;

    eprintln!(
        "  {GREEN}Extracted {BOLD}{}{RESET}{GREEN} image(s) to {}{RESET}",
        images.len(),
        args.output.display()
    );
    Ok(())
}
