//! Obtaining the input text: the path comes from the command line or an interactive prompt, and
//! the whole file is read before the parser sees it.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use tracing::*;

pub fn resolve_path(arg: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    match arg {
        Some(path) => Ok(path),
        None => prompt_for_path(io::stdin().lock(), io::stderr()),
    }
}

fn prompt_for_path(mut input: impl BufRead, mut output: impl Write) -> anyhow::Result<PathBuf> {
    writeln!(output, "Enter filename:")?;
    output.flush()?;

    let mut line = String::new();
    input
        .read_line(&mut line)
        .context("failed to read filename from stdin")?;
    let line = line.trim();
    if line.is_empty() {
        bail!("no input file given");
    }
    Ok(PathBuf::from(line))
}

pub fn read_source(path: &Path) -> anyhow::Result<String> {
    if !path.exists() {
        bail!("file `{}` does not exist", path.display());
    }
    if path.is_dir() {
        bail!("`{}` is a directory", path.display());
    }

    match fs::read_to_string(path) {
        Ok(source) => {
            debug!(path = ?path, len = source.len(), "read input");
            Ok(source)
        }
        Err(e) => {
            error!(path = ?path, "failed to read input");
            Err(e).with_context(|| format!("failed to read file `{}`", path.display()))
        }
    }
}
