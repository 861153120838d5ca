use tracing::debug;

use crate::error::LogError;
use crate::parser::{classify, Record};

use super::reader::LineReader;
use super::registry::PidRegistry;

/// Filter and start position for a [`LogIter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IterOptions {
    /// Only return lines written by this pid. Must be a pid seen by the scan.
    pub pid: Option<u32>,
    /// Only return trace lines.
    pub trace_only: bool,
    /// Also return lines that are not CaRT log lines.
    pub raw: bool,
    /// 1-based line number to start from.
    pub index: usize,
}

impl Default for IterOptions {
    fn default() -> Self {
        Self {
            pid: None,
            trace_only: false,
            raw: false,
            index: 1,
        }
    }
}

impl IterOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pid(mut self, pid: u32) -> Self {
        self.pid = Some(pid);
        self
    }

    pub fn trace_only(mut self, trace_only: bool) -> Self {
        self.trace_only = trace_only;
        self
    }

    pub fn raw(mut self, raw: bool) -> Self {
        self.raw = raw;
        self
    }

    pub fn starting_at(mut self, index: usize) -> Self {
        self.index = index;
        self
    }

    /// Raw lines carry no pid, so a pid filter always drops them.
    pub fn accepts(&self, record: &Record) -> bool {
        if record.is_raw() && !self.raw {
            return false;
        }
        if self.trace_only && !record.is_trace() {
            return false;
        }
        match self.pid {
            Some(pid) => record.pid() == Some(pid),
            None => true,
        }
    }
}

pub(crate) enum Cursor<'a> {
    Buffered {
        records: &'a [Record],
        offset: usize,
    },
    Streaming {
        /// `None` once the owning source has been closed.
        reader: Option<&'a mut LineReader>,
        done: bool,
    },
}

/// Filtered cursor over a [`super::LogSource`].
///
/// Yields `Ok(record)` for each line passing the filter and `None` at end of
/// file. It does not wrap around: once `None` has been returned, call
/// [`LogIter::reset`] to go again.
pub struct LogIter<'a> {
    cursor: Cursor<'a>,
    pids: &'a PidRegistry,
    options: IterOptions,
}

impl<'a> LogIter<'a> {
    pub(crate) fn new(cursor: Cursor<'a>, pids: &'a PidRegistry) -> Self {
        Self {
            cursor,
            pids,
            options: IterOptions::default(),
        }
    }

    pub fn options(&self) -> &IterOptions {
        &self.options
    }

    /// Rewind and install new filters.
    ///
    /// Fails with [`LogError::InvalidPid`] for a pid the scan never saw; the
    /// iterator is left exactly as it was in that case.
    pub fn reset(&mut self, options: IterOptions) -> Result<(), LogError> {
        if let Some(pid) = options.pid {
            if !self.pids.contains(pid) {
                return Err(LogError::InvalidPid(pid));
            }
        }

        match &mut self.cursor {
            Cursor::Buffered { offset, .. } => {
                *offset = options.index.saturating_sub(1);
            }
            Cursor::Streaming { reader, done } => {
                let reader = reader.as_deref_mut().ok_or(LogError::Closed)?;
                reader.rewind()?;
                reader.skip_to(options.index)?;
                *done = false;
            }
        }

        debug!(
            "Iterator reset: pid={:?} trace_only={} raw={} index={}",
            options.pid, options.trace_only, options.raw, options.index
        );
        self.options = options;
        Ok(())
    }
}

impl Iterator for LogIter<'_> {
    type Item = Result<Record, LogError>;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.cursor {
            Cursor::Buffered { records, offset } => {
                while let Some(record) = records.get(*offset) {
                    *offset += 1;
                    if self.options.accepts(record) {
                        return Some(Ok(record.clone()));
                    }
                }
                None
            }
            Cursor::Streaming { reader, done } => {
                if *done {
                    return None;
                }
                let Some(reader) = reader.as_deref_mut() else {
                    *done = true;
                    return Some(Err(LogError::Closed));
                };
                loop {
                    let (index, line) = match reader.next_line() {
                        Ok(Some(next)) => next,
                        Ok(None) => {
                            *done = true;
                            return None;
                        }
                        Err(e) => {
                            *done = true;
                            return Some(Err(e.into()));
                        }
                    };
                    match classify(&line, index) {
                        Ok(record) if self.options.accepts(&record) => return Some(Ok(record)),
                        Ok(_) => continue,
                        Err(e) => return Some(Err(e)),
                    }
                }
            }
        }
    }
}
