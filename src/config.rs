//! Run configuration: a JSON file, overlaid by `IRONNEST_*` environment
//! variables, overlaid in turn by command-line flags.
//!
//! ```json
//! { "keys": ["currency", "country"], "output": "docs/result.json", "mode": "best-effort" }
//! ```

use crate::error::Result as NestResult;
use crate::keys::GroupingKeys;
use crate::sink::{SinkMode, SinkOptions};
use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const ENV_KEYS: &str = "IRONNEST_KEYS";
pub const ENV_OUTPUT: &str = "IRONNEST_OUTPUT";
pub const ENV_PRETTY: &str = "IRONNEST_PRETTY";
pub const ENV_MODE: &str = "IRONNEST_MODE";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NestConfig {
    /// Grouping keys, outermost first.
    pub keys: Vec<String>,
    /// Destination file; stdout when unset.
    pub output: Option<PathBuf>,
    pub pretty: bool,
    pub mode: SinkMode,
    pub create_dirs: bool,
}

impl NestConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parse config {}", path.display()))
    }

    /// Overlay values from the process environment.
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_vars(|name| std::env::var(name).ok())
    }

    /// Overlay values from `lookup`, which maps a variable name to its value.
    ///
    /// `IRONNEST_KEYS` is a comma separated list; blank entries are dropped.
    pub fn apply_vars(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(keys) = lookup(ENV_KEYS) {
            self.keys = keys
                .split(',')
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(String::from)
                .collect();
        }
        if let Some(output) = lookup(ENV_OUTPUT) {
            self.output = Some(PathBuf::from(output));
        }
        if let Some(pretty) = lookup(ENV_PRETTY) {
            self.pretty = parse_flag(&pretty).with_context(|| format!("parse {ENV_PRETTY}"))?;
        }
        if let Some(mode) = lookup(ENV_MODE) {
            self.mode = mode.parse::<SinkMode>().with_context(|| format!("parse {ENV_MODE}"))?;
        }
        Ok(())
    }

    pub fn grouping_keys(&self) -> NestResult<GroupingKeys> {
        GroupingKeys::new(self.keys.iter().cloned())
    }

    pub fn sink_options(&self) -> SinkOptions {
        SinkOptions {
            pretty: self.pretty,
            mode: self.mode,
            create_dirs: self.create_dirs,
        }
    }
}

fn parse_flag(s: &str) -> Result<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => bail!("expected a boolean, got `{other}`"),
    }
}
