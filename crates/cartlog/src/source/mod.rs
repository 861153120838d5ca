//! Log sources: an opened log file plus what the initial scan learned about it.
//!
//! Small files are decoded once and kept in memory. Files above the configured
//! threshold only keep their pid list and are re-read from disk by every pass,
//! trading speed for bounded memory. The choice is made at open time and never
//! revisited.

pub mod iter;
pub mod reader;
pub mod registry;
pub mod scan;

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::conf::ScanConfig;
use crate::error::LogError;
use crate::parser::Record;

pub use iter::{IterOptions, LogIter};
pub use registry::PidRegistry;
pub use scan::ScanSummary;

use iter::Cursor;
use reader::LineReader;

/// Where iteration gets its records from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Every record held in memory.
    Buffered,
    /// Records re-read and re-decoded from disk on each pass.
    Streaming,
}

impl Strategy {
    pub fn for_size(size: u64, threshold: u64) -> Self {
        if size > threshold {
            Strategy::Streaming
        } else {
            Strategy::Buffered
        }
    }
}

#[derive(Debug)]
enum Storage {
    Buffered(Vec<Record>),
    Streaming,
}

/// An open CaRT log file.
///
/// ```no_run
/// use cartlog::{IterOptions, LogSource};
///
/// let mut log = LogSource::open("/tmp/cart.log")?;
/// let pid = log.get_pids()[0];
/// for record in log.iter_with(IterOptions::new().with_pid(pid).trace_only(true))? {
///     println!("{}", record?);
/// }
/// # Ok::<(), cartlog::LogError>(())
/// ```
#[derive(Debug)]
pub struct LogSource {
    path: PathBuf,
    /// `None` once closed.
    reader: Option<LineReader>,
    storage: Storage,
    pids: PidRegistry,
    summary: ScanSummary,
}

impl LogSource {
    /// Open and scan `path` with the default 20 MiB buffering threshold.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, LogError> {
        Self::open_with(path, &ScanConfig::default())
    }

    /// Open and scan `path`.
    ///
    /// Fails with [`LogError::InvalidLogFile`] if any CaRT line has an
    /// unknown level; nothing is returned for the part that did parse.
    pub fn open_with<P: AsRef<Path>>(path: P, config: &ScanConfig) -> Result<Self, LogError> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path)?;
        let size = file.metadata()?.len();
        let strategy = Strategy::for_size(size, config.buffer_threshold);
        debug!(
            "Opening {} ({} bytes, threshold {}): {:?}",
            path.display(),
            size,
            config.buffer_threshold,
            strategy
        );

        let mut reader = LineReader::new(file);
        let scanned = scan::scan(&mut reader, strategy == Strategy::Buffered).map_err(|e| {
            warn!("Failed to scan {}: {}", path.display(), e);
            e
        })?;

        info!(
            "Scanned {}: {} lines ({} structured, {} raw, {} trace), {} pids, {:?}",
            path.display(),
            scanned.summary.lines,
            scanned.summary.structured,
            scanned.summary.raw,
            scanned.summary.trace,
            scanned.pids.len(),
            strategy
        );

        let storage = match strategy {
            Strategy::Buffered => Storage::Buffered(scanned.records),
            Strategy::Streaming => Storage::Streaming,
        };

        Ok(Self {
            path,
            reader: Some(reader),
            storage,
            pids: scanned.pids,
            summary: scanned.summary,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn strategy(&self) -> Strategy {
        match self.storage {
            Storage::Buffered(_) => Strategy::Buffered,
            Storage::Streaming => Strategy::Streaming,
        }
    }

    pub fn summary(&self) -> ScanSummary {
        self.summary
    }

    /// Sorted distinct pids found in the file. May be empty.
    pub fn get_pids(&self) -> &[u32] {
        self.pids.as_slice()
    }

    pub fn pids(&self) -> &PidRegistry {
        &self.pids
    }

    /// All records, for buffered sources.
    pub fn records(&self) -> Option<&[Record]> {
        match &self.storage {
            Storage::Buffered(records) => Some(records),
            Storage::Streaming => None,
        }
    }

    /// Iterator from line 1 with no filters other than skipping raw lines.
    pub fn iter(&mut self) -> Result<LogIter<'_>, LogError> {
        self.iter_with(IterOptions::default())
    }

    /// Iterator with the given filters. Streaming sources share one file
    /// position, hence `&mut self`.
    pub fn iter_with(&mut self, options: IterOptions) -> Result<LogIter<'_>, LogError> {
        let cursor = match &self.storage {
            Storage::Buffered(records) => Cursor::Buffered { records, offset: 0 },
            Storage::Streaming => Cursor::Streaming {
                reader: self.reader.as_mut(),
                done: false,
            },
        };
        let mut iter = LogIter::new(cursor, &self.pids);
        iter.reset(options)?;
        Ok(iter)
    }

    /// Independent iterator over a buffered source; any number may be live at
    /// once. `None` for streaming sources.
    pub fn shared_iter(&self) -> Option<LogIter<'_>> {
        match &self.storage {
            Storage::Buffered(records) => Some(LogIter::new(
                Cursor::Buffered { records, offset: 0 },
                &self.pids,
            )),
            Storage::Streaming => None,
        }
    }

    /// Release the file handle. Safe to call more than once. Buffered records
    /// stay available; streaming iteration fails with [`LogError::Closed`].
    pub fn close(&mut self) {
        if self.reader.take().is_some() {
            debug!("Closed {}", self.path.display());
        }
    }

    pub fn is_closed(&self) -> bool {
        self.reader.is_none()
    }
}
