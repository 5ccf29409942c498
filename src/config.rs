//! Where the MODFLOW executables live and where models are written.
//!
//! A [`RunConfig`] can come from a TOML file
//!
//! ```toml
//! mf2005 = "/opt/modflow/bin/mf2005"
//! mfnwt = "/opt/modflow/bin/mfnwt"
//! workspace = "runs"
//! silent = true
//! ```
//!
//! and the environment variables `MODFLOW_MF2005`, `MODFLOW_NWT` and `MODFLOW_WORKSPACE` override
//! the file. Anything unset falls back to the executable name on the `PATH`.
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// MODFLOW flavour a model is written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Version {
    #[default]
    Mf2005,
    MfNwt,
}

impl Version {
    /// Executable name looked up on the `PATH` when nothing else is configured.
    pub fn default_exe(self) -> PathBuf {
        let name = match self {
            Version::Mf2005 => "mf2005",
            Version::MfNwt => "mfnwt",
        };
        if cfg!(windows) {
            PathBuf::from(format!("{}.exe", name))
        } else {
            PathBuf::from(name)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    pub mf2005: Option<PathBuf>,
    pub mfnwt: Option<PathBuf>,
    pub workspace: Option<PathBuf>,
    /// Do not echo the simulator's output to the log.
    pub silent: bool,
}

impl RunConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Defaults overridden by the process environment.
    pub fn from_env() -> Self {
        RunConfig::default().with_env(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`, which maps an environment variable name to its value.
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(v) = non_empty("MODFLOW_MF2005") {
            self.mf2005 = Some(PathBuf::from(v));
        }
        if let Some(v) = non_empty("MODFLOW_NWT") {
            self.mfnwt = Some(PathBuf::from(v));
        }
        if let Some(v) = non_empty("MODFLOW_WORKSPACE") {
            self.workspace = Some(PathBuf::from(v));
        }
        self
    }

    pub fn exe_for(&self, version: Version) -> PathBuf {
        let configured = match version {
            Version::Mf2005 => &self.mf2005,
            Version::MfNwt => &self.mfnwt,
        };
        configured.clone().unwrap_or_else(|| version.default_exe())
    }

    pub fn workspace(&self) -> PathBuf {
        self.workspace.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}
