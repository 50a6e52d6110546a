use std::path::Path;

use anyhow::{bail, Context};
use confique::Config as DeriveConfig;
use jsonscope::Limits;

/// Looked up in the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "jscope.toml";

#[derive(Debug, DeriveConfig)]
pub struct Config {
    /// Maximum nesting depth of arrays and objects. Deeper documents are rejected instead of
    /// risking a stack overflow.
    #[config(env = "JSCOPE_MAX_NESTING_DEPTH", default = 512)]
    pub max_nesting_depth: usize,

    /// Largest accepted input, in bytes.
    #[config(env = "JSCOPE_MAX_INPUT_SIZE", default = 67108864)]
    pub max_input_size: usize,
}

impl Config {
    /// Environment variables take priority over `explicit`, which takes priority over
    /// [`DEFAULT_CONFIG_FILE`].
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let mut builder = Config::builder().env();
        if let Some(path) = explicit {
            if !path.is_file() {
                bail!("config file `{}` does not exist", path.display());
            }
            builder = builder.file(path);
        }
        builder
            .file(DEFAULT_CONFIG_FILE)
            .load()
            .context("failed to load configuration")
    }

    pub fn limits(&self) -> Limits {
        Limits::default()
            .with_max_nesting_depth(self.max_nesting_depth)
            .with_max_input_size(self.max_input_size)
    }
}
