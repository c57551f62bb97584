//! CLI argument definitions using clap derive macros.

use clap::Parser;

/// Export Figma components as rendered images plus a JSON manifest.
///
/// Reads the file URL from FIGMA_FILE_URL and the access token from
/// FIGMA_TOKEN. Export options are overridden with key=value arguments,
/// e.g. `figma-export format=png outputDir=./assets/ scale=2`.
#[derive(Parser, Debug)]
#[command(name = "figma-export")]
#[command(author, version, about)]
pub struct Args {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// key=value overrides: format=<jpg|png|svg|pdf>, outputDir=<path>,
    /// scale=<number>, keepGoing=<true|false>. Unrecognized keys are
    /// ignored.
    #[arg(value_name = "KEY=VALUE")]
    pub overrides: Vec<String>,
}
