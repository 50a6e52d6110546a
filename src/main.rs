use std::path::PathBuf;

use anyhow::bail;
use clap::Parser as ClapParser;
use tracing::*;

use crate::config::Config;
use crate::render::OutputFormat;

mod config;
mod input;
mod logging;
mod render;
mod report;

#[derive(Debug, ClapParser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The path to a JSON file. When omitted, the path is read from stdin.
    input: Option<PathBuf>,

    /// How to print the parsed document.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Pretty)]
    format: OutputFormat,

    /// Only validate the document, print nothing on success.
    #[arg(short, long)]
    quiet: bool,

    /// Maximum nesting depth, overriding the configuration.
    #[arg(long)]
    max_depth: Option<usize>,

    /// A TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    logging::setup_logging();

    let cli = Args::parse();

    debug!(?cli);

    let config = Config::load(cli.config.as_deref())?;
    let mut limits = config.limits();
    if let Some(depth) = cli.max_depth {
        limits = limits.with_max_nesting_depth(depth);
    }
    debug!(?limits);

    let path = input::resolve_path(cli.input)?;
    let source = input::read_source(&path)?;
    let display_path = path.display().to_string();

    let document = match jsonscope::parse_document_with_limits(&source, limits) {
        Ok(document) => document,
        Err(e) => {
            debug!(code = e.kind().code(), offset = e.offset(), "parse failed");
            report::print_parse_error(&display_path, &source, &e)?;
            bail!("failed to parse `{display_path}`");
        }
    };

    if !cli.quiet {
        println!("{}", render::render(&document, cli.format)?);
    }

    Ok(())
}
