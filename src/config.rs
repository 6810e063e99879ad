use std::{
    env, fs,
    path::{Path, PathBuf},
};

use color_eyre::{eyre::WrapErr, Result};
use serde::Deserialize;

use crate::parse::chain::ChainKind;

pub const CONFIG_ENV: &str = "CHAINSH_CONFIG";
pub const CONFIG_FILE: &str = "chainsh.toml";

/// Structural ceilings enforced per line.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Limits {
    pub max_segment_args: usize,
    pub max_pipes: usize,
    pub max_reverse_pipes: usize,
    pub max_sequential: usize,
    pub max_conditionals: usize,
    pub max_concat: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_segment_args: 5,
            max_pipes: 4,
            max_reverse_pipes: 5,
            max_sequential: 4,
            max_conditionals: 5,
            max_concat: 4,
        }
    }
}

impl Limits {
    pub fn operator_ceiling(&self, kind: ChainKind) -> usize {
        match kind {
            ChainKind::Pipe => self.max_pipes,
            ChainKind::ReversePipe => self.max_reverse_pipes,
            ChainKind::Sequential => self.max_sequential,
            ChainKind::Conditional => self.max_conditionals,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    pub prompt: String,
    pub limits: Limits,
    /// Print the exit status of the last pipeline stage after a pipeline.
    pub report_pipeline_status: bool,
    pub log_dir: PathBuf,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: "chainsh$ ".into(),
            limits: Limits::default(),
            report_pipeline_status: false,
            log_dir: PathBuf::from("."),
        }
    }
}

impl ShellConfig {
    pub fn from_toml(source: &str) -> Result<Self> {
        toml::from_str(source).wrap_err("invalid shell configuration")
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml(&source).wrap_err_with(|| format!("in {}", path.display()))
    }

    /// `$CHAINSH_CONFIG`, then `./chainsh.toml`, then defaults.
    pub fn load() -> Result<Self> {
        if let Some(path) = env::var_os(CONFIG_ENV) {
            return Self::from_path(Path::new(&path));
        }

        let local = Path::new(CONFIG_FILE);
        if local.is_file() {
            return Self::from_path(local);
        }

        Ok(Self::default())
    }
}
