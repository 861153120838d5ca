use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};

use cartlog::conf::ScanConfig;
use cartlog::runtime::{boot, dump};
use cartlog::{IterOptions, LogSource};

/// Inspect CaRT log files.
#[derive(Debug, Parser)]
#[command(name = "cartlog", version)]
struct Cli {
    /// Config file (defaults to $CARTLOG_CONFIG_FILE or /etc/cartlog/cartlog.toml)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Stream files larger than this many bytes instead of loading them
    #[arg(long, global = true)]
    buffer_threshold: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print log records
    Dump {
        file: PathBuf,
        /// Only lines from this pid
        #[arg(long)]
        pid: Option<u32>,
        /// Only trace lines
        #[arg(long)]
        trace_only: bool,
        /// Include lines that are not CaRT log lines
        #[arg(long)]
        raw: bool,
        /// Start at this line number
        #[arg(long, default_value_t = 1)]
        from: usize,
        /// Highlight lines whose message contains TEXT
        #[arg(long, value_name = "TEXT")]
        mark: Option<String>,
        /// Only lines whose message ends with TEXT
        #[arg(long, value_name = "TEXT")]
        ends_with: Option<String>,
        /// Print JSON lines
        #[arg(long)]
        json: bool,
    },
    /// List the pids that wrote to a log file
    Pids { file: PathBuf },
    /// Print line counts and pids as JSON
    Summary { file: PathBuf },
}

fn open(path: &Path, scan: &ScanConfig) -> anyhow::Result<LogSource> {
    LogSource::open_with(path, scan).with_context(|| format!("failed to open {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    boot::init_logging();
    let cli = Cli::parse();

    let mut config = boot::load_config(cli.config.as_deref())
        .map_err(|e| anyhow::anyhow!("failed to load configuration: {}", e))?;
    if let Some(threshold) = cli.buffer_threshold {
        config.scan.buffer_threshold = threshold;
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Dump { file, pid, trace_only, raw, from, mark, ends_with, json } => {
            let mut log = open(&file, &config.scan)?;
            let request = dump::DumpRequest {
                options: IterOptions {
                    pid,
                    trace_only,
                    raw: raw || config.output.show_raw,
                    index: from,
                },
                mark,
                ends_with,
                json: json || config.output.json,
            };
            let printed = dump::dump(&mut log, &request, &mut out)?;
            tracing::debug!("Printed {} records from {}", printed, file.display());
            log.close();
        }
        Command::Pids { file } => {
            let log = open(&file, &config.scan)?;
            dump::write_pids(&log, &mut out)?;
        }
        Command::Summary { file } => {
            let log = open(&file, &config.scan)?;
            dump::write_summary(&log, &mut out)?;
        }
    }

    out.flush()?;
    Ok(())
}
