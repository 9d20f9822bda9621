//! The active log file: an append handle with size-triggered rotation

use pipelog_core::{Error, Result};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

use crate::chain::{over_limit, RotationChain};

/// The single open write handle over the chain's active file.
///
/// Every line is flushed before the next one is accepted, so an abrupt
/// termination loses at most the write in flight. When the active file
/// grows past the limit the handle is closed, the chain is rotated, and a
/// fresh active file is opened.
pub struct ActiveLog {
    chain: RotationChain,
    max_size_bytes: u64,
    writer: Option<BufWriter<File>>,
}

impl ActiveLog {
    /// Open the active file for appending, rotating first if a previous
    /// run left it over the size limit.
    ///
    /// The file is created if absent. A missing directory is an error;
    /// directories are never created implicitly.
    pub fn open(chain: RotationChain, max_size_bytes: u64) -> Result<Self> {
        if over_limit(chain.active(), max_size_bytes) {
            debug!(
                "Active file {} is over the limit from a previous run",
                chain.active().display()
            );
            chain.rotate()?;
        }

        let writer = open_append(chain.active())?;
        Ok(Self {
            chain,
            max_size_bytes,
            writer: Some(writer),
        })
    }

    /// Append one line (terminator included) and flush it, then rotate if
    /// the active file has grown past the limit.
    ///
    /// The size check runs after the write, so the active file may exceed
    /// the limit by up to one line before it is rotated.
    pub fn write_line(&mut self, line: &[u8]) -> Result<()> {
        if let Some(writer) = self.writer.as_mut() {
            writer.write_all(line)?;
            writer.flush()?;
        }

        if over_limit(self.chain.active(), self.max_size_bytes) {
            // Close before the chain shifts underneath the handle.
            self.writer = None;
            self.chain.rotate()?;
            self.writer = Some(open_append(self.chain.active())?);
        }

        Ok(())
    }

    /// Flush and close the handle
    pub fn close(mut self) -> Result<()> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush()?;
        }
        Ok(())
    }

    /// The active file path
    pub fn active_path(&self) -> &Path {
        self.chain.active()
    }
}

fn open_append(path: &Path) -> Result<BufWriter<File>> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| Error::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(BufWriter::new(file))
}
