//! Persistence sink for result trees.
//!
//! A tree is serialized as one JSON document. Destination files ending in a
//! compression extension (`.gz`, `.zst`) are compressed when the matching
//! feature is enabled.
//!
//! In [`SinkMode::Strict`] every failure is returned to the caller. In
//! [`SinkMode::BestEffort`] a destination that does not exist is logged and
//! reported as [`SinkOutcome::Skipped`]; other failures are still errors.

use crate::compression::auto_detect_writer;
use crate::tree::ResultTree;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::{File, create_dir_all};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{info, warn};

/// What the sink does when the destination cannot be found.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SinkMode {
    #[default]
    Strict,
    BestEffort,
}

impl FromStr for SinkMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(SinkMode::Strict),
            "best-effort" | "best_effort" => Ok(SinkMode::BestEffort),
            other => anyhow::bail!("unknown sink mode `{other}` (expected strict or best-effort)"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SinkOptions {
    /// Indent the document instead of writing it compactly.
    pub pretty: bool,
    pub mode: SinkMode,
    /// Create missing parent directories of the destination.
    pub create_dirs: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkOutcome {
    Written(PathBuf),
    /// Best-effort mode dropped the write; `reason` is the full error chain.
    Skipped { path: PathBuf, reason: String },
}

/// Serialize `tree` to `writer`. No trailing newline is written.
pub fn write_tree_to<W: Write>(tree: &ResultTree, mut writer: W, pretty: bool) -> Result<()> {
    let written = if pretty {
        serde_json::to_writer_pretty(&mut writer, tree)
    } else {
        serde_json::to_writer(&mut writer, tree)
    };
    written.context("serialize result tree")?;
    writer.flush().context("flush result tree")?;
    Ok(())
}

/// Write `tree` to the file at `path`.
///
/// # Errors
/// Any I/O or serialization failure, except a missing destination in
/// best-effort mode.
pub fn write_tree(
    tree: &ResultTree,
    path: impl AsRef<Path>,
    opts: &SinkOptions,
) -> Result<SinkOutcome> {
    let path = path.as_ref();
    match write_file(tree, path, opts) {
        Ok(()) => {
            info!(path = %path.display(), "result tree written");
            Ok(SinkOutcome::Written(path.to_path_buf()))
        }
        Err(e) if opts.mode == SinkMode::BestEffort && is_not_found(&e) => {
            let reason = format!("{e:#}");
            warn!(path = %path.display(), error = %reason, "result tree not written");
            Ok(SinkOutcome::Skipped {
                path: path.to_path_buf(),
                reason,
            })
        }
        Err(e) => Err(e),
    }
}

fn write_file(tree: &ResultTree, path: &Path, opts: &SinkOptions) -> Result<()> {
    if opts.create_dirs
        && let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        create_dir_all(parent).with_context(|| format!("mkdir -p {}", parent.display()))?;
    }
    let f = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut w = auto_detect_writer(f, path)
        .with_context(|| format!("setup compression for {}", path.display()))?;
    write_tree_to(tree, &mut w, opts.pretty).with_context(|| format!("write {}", path.display()))?;
    w.finish().with_context(|| format!("finish {}", path.display()))
}

fn is_not_found(e: &anyhow::Error) -> bool {
    e.chain()
        .filter_map(|cause| cause.downcast_ref::<io::Error>())
        .any(|io| io.kind() == io::ErrorKind::NotFound)
}
