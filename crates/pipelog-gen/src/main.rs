//! Pipelog Gen - emits test output on both stdout and stderr so you can
//! verify that redirection into a capture pipeline is set up correctly

use anyhow::Result;
use clap::Parser;
use std::io::Write;
use std::thread;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "pipelog-gen")]
#[command(version, about = "Generate continuous test output on stdout and stderr")]
struct Cli {
    /// Number of lines to emit per stream (default: run until killed)
    #[arg(short = 'c', long)]
    count: Option<u64>,

    /// Delay between lines in milliseconds
    #[arg(long, default_value = "100")]
    interval_ms: u64,

    /// Longer pause taken every tenth line, in milliseconds
    #[arg(long, default_value = "2000")]
    pause_ms: u64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    let mut n: u64 = 1;

    loop {
        // Flush per line; a consumer on the other end of a pipe should
        // see output as it is produced, not in bursts.
        {
            let mut out = stdout.lock();
            writeln!(out, "Generating log data on stdout {}", n)?;
            out.flush()?;
        }
        {
            let mut err = stderr.lock();
            writeln!(err, "Generating log data on stderr {}", n)?;
            err.flush()?;
        }

        if let Some(count) = cli.count {
            if n >= count {
                break;
            }
        }

        n += 1;
        if n % 10 == 0 {
            thread::sleep(Duration::from_millis(cli.pause_ms));
        } else {
            thread::sleep(Duration::from_millis(cli.interval_ms));
        }
    }

    Ok(())
}
