//! Initial pass over a log file: classify every line, collect pids, and
//! optionally keep the records.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::error::LogError;
use crate::parser::{classify, Record};

use super::reader::LineReader;
use super::registry::PidRegistry;

/// Line counts gathered during the initial scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanSummary {
    pub lines: usize,
    pub structured: usize,
    pub raw: usize,
    pub trace: usize,
}

impl ScanSummary {
    fn record(&mut self, record: &Record) {
        self.lines += 1;
        if record.is_raw() {
            self.raw += 1;
        } else {
            self.structured += 1;
        }
        if record.is_trace() {
            self.trace += 1;
        }
    }
}

pub(crate) struct ScanOutput {
    pub pids: PidRegistry,
    /// Empty unless the caller asked to retain records.
    pub records: Vec<Record>,
    pub summary: ScanSummary,
}

/// Read `reader` to EOF. Stops at the first line that fails to decode.
pub(crate) fn scan(reader: &mut LineReader, retain: bool) -> Result<ScanOutput, LogError> {
    let mut pids = BTreeSet::new();
    let mut records = Vec::new();
    let mut summary = ScanSummary::default();

    while let Some((index, line)) = reader.next_line()? {
        let record = classify(&line, index)?;
        summary.record(&record);
        if let Some(pid) = record.pid() {
            pids.insert(pid);
        }
        if retain {
            records.push(record);
        }
    }

    Ok(ScanOutput {
        pids: pids.into(),
        records,
        summary,
    })
}
