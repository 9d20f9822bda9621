//! The capture loop: drain input lines into the rotating log chain

use anyhow::Result;
use chrono::Local;
use pipelog_core::CaptureSpec;
use pipelog_logs::{ActiveLog, RotationChain};
use std::io::{self, BufRead};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;

use crate::output;

/// Shared ownership of the active log between the capture loop and the
/// interrupt handler. Taking the handle out of the Option closes it
/// exactly once, whichever side gets there first.
pub type SharedLog = Arc<Mutex<Option<ActiveLog>>>;

/// Capture stdin into the rotating chain until end-of-input or interrupt.
pub fn run(spec: &CaptureSpec) -> Result<()> {
    debug!(
        "Capturing into {} under {} ({} files, {} bytes max)",
        spec.logfile_name,
        spec.path.display(),
        spec.max_files,
        spec.max_size_bytes
    );

    let chain = RotationChain::new(&spec.path, &spec.logfile_name, spec.max_files)?;
    let log = ActiveLog::open(chain, spec.max_size_bytes)?;
    let shared: SharedLog = Arc::new(Mutex::new(Some(log)));

    install_interrupt_handler(shared.clone())?;

    let stdin = io::stdin();
    drain(stdin.lock(), &shared, spec.timestamp)?;
    Ok(())
}

/// Read lines from `reader` and append them to the shared log until the
/// source closes.
///
/// Lines travel as raw bytes with their terminator; an empty line still
/// carries its newline, and a final unterminated line is still written.
/// End-of-input flushes and closes the log without rotating.
pub fn drain<R: BufRead>(mut reader: R, shared: &SharedLog, timestamp: bool) -> pipelog_core::Result<()> {
    let mut line = Vec::with_capacity(256);

    loop {
        line.clear();
        let n = reader.read_until(b'\n', &mut line)?;
        if n == 0 {
            break;
        }

        let mut guard = shared.lock().unwrap_or_else(PoisonError::into_inner);
        let Some(log) = guard.as_mut() else {
            // The interrupt handler already closed the log and is about
            // to terminate the process.
            break;
        };

        if timestamp {
            log.write_line(&stamped(&line))?;
        } else {
            log.write_line(&line)?;
        }
    }

    let mut guard = shared.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(log) = guard.take() {
        log.close()?;
    }
    Ok(())
}

/// Prefix a line with the bracketed local time, microsecond precision
fn stamped(line: &[u8]) -> Vec<u8> {
    let ts = Local::now().format("%Y-%m-%d %H:%M:%S%.6f");
    let mut out = format!("[{}] ", ts).into_bytes();
    out.extend_from_slice(line);
    out
}

/// Close the log and exit cleanly when the operator interrupts the run.
///
/// Every line already written is on disk by the time the handler runs,
/// so closing through the shared guard loses nothing; 130 signals an
/// interrupted-but-clean shutdown.
fn install_interrupt_handler(shared: SharedLog) -> Result<()> {
    ctrlc::set_handler(move || {
        let mut guard = shared.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(log) = guard.take() {
            if let Err(e) = log.close() {
                output::print_error(&format!("Failed to close log on interrupt: {}", e));
            }
        }
        drop(guard);
        output::print_info("Interrupted, log closed");
        std::process::exit(130);
    })?;
    Ok(())
}
