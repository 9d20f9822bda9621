//! The retained generation chain: filename sequencing and rotation

use pipelog_core::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Ordered paths of the retained log files.
///
/// Index 0 is the active file; higher indices are older generations, the
/// highest index being the oldest. The paths are computed once at startup
/// and never recomputed; only the on-disk contents change.
#[derive(Debug, Clone)]
pub struct RotationChain {
    paths: Vec<PathBuf>,
}

impl RotationChain {
    /// Build the chain for `max_files` generations of `base_name` under
    /// `directory`: `base`, `base.1`, .. `base.(max_files-1)`.
    ///
    /// `max_files` below 1 would describe a chain with no active file and
    /// is rejected outright.
    pub fn new(directory: &Path, base_name: &str, max_files: usize) -> Result<Self> {
        if max_files < 1 {
            return Err(Error::InvalidRetention(max_files));
        }

        let mut paths = Vec::with_capacity(max_files);
        paths.push(directory.join(base_name));
        for i in 1..max_files {
            paths.push(directory.join(format!("{}.{}", base_name, i)));
        }

        Ok(Self { paths })
    }

    /// The active (generation 0) file path
    pub fn active(&self) -> &Path {
        &self.paths[0]
    }

    /// All generation paths, newest first
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Evict the oldest generation and shift the rest down by one index.
    ///
    /// The oldest file is deleted if present, then every remaining
    /// generation is renamed upward in strictly decreasing index order so
    /// no file is overwritten before it has been relocated. Missing
    /// generations are skipped; the chain tolerates gaps. Any failed
    /// delete or rename aborts the rotation with the offending paths.
    pub fn rotate(&self) -> Result<()> {
        debug!("Rotating log chain at {}", self.active().display());

        let oldest = &self.paths[self.paths.len() - 1];
        if oldest.is_file() {
            fs::remove_file(oldest).map_err(|source| Error::EvictFailed {
                path: oldest.clone(),
                source,
            })?;
        }

        for i in (0..self.paths.len() - 1).rev() {
            let from = &self.paths[i];
            let to = &self.paths[i + 1];
            if from.is_file() {
                fs::rename(from, to).map_err(|source| Error::RotateFailed {
                    from: from.clone(),
                    to: to.clone(),
                    source,
                })?;
            }
        }

        Ok(())
    }
}

/// Whether `path` is strictly larger than `max_bytes`.
///
/// A missing file is never over the limit.
pub fn over_limit(path: &Path, max_bytes: u64) -> bool {
    fs::metadata(path).map_or(false, |m| m.len() > max_bytes)
}
