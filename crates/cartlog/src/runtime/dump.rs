//! Dump: render records, pid lists and scan summaries for the command line.

use std::io::Write;

use serde::Serialize;

use crate::source::{IterOptions, LogSource, ScanSummary, Strategy};

/// What `cartlog dump` should print.
#[derive(Debug, Clone, Default)]
pub struct DumpRequest {
    pub options: IterOptions,
    /// Highlight lines whose message contains this text.
    pub mark: Option<String>,
    /// Only print lines whose message ends with this text.
    pub ends_with: Option<String>,
    /// One JSON object per line instead of log text.
    pub json: bool,
}

/// Print matching records; returns how many were printed.
pub fn dump<W: Write>(log: &mut LogSource, request: &DumpRequest, out: &mut W) -> anyhow::Result<usize> {
    let mut printed = 0;
    for record in log.iter_with(request.options.clone())? {
        let record = record?;

        if let Some(suffix) = request.ends_with.as_deref() {
            // Raw lines have no message to match against.
            match record.as_structured() {
                Some(rec) if rec.ends_with(suffix) => {}
                _ => continue,
            }
        }

        if request.json {
            serde_json::to_writer(&mut *out, &record)?;
            writeln!(out)?;
        } else {
            let mark = match (request.mark.as_deref(), record.as_structured()) {
                (Some(needle), Some(rec)) => rec.contains(needle),
                _ => false,
            };
            writeln!(out, "{}", record.to_str(mark))?;
        }
        printed += 1;
    }
    Ok(printed)
}

/// One pid per line, ascending.
pub fn write_pids<W: Write>(log: &LogSource, out: &mut W) -> anyhow::Result<()> {
    for pid in log.get_pids() {
        writeln!(out, "{}", pid)?;
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct SummaryReport<'a> {
    path: String,
    strategy: Strategy,
    pids: &'a [u32],
    scan: ScanSummary,
}

/// Scan summary as pretty-printed JSON.
pub fn write_summary<W: Write>(log: &LogSource, out: &mut W) -> anyhow::Result<()> {
    let report = SummaryReport {
        path: log.path().display().to_string(),
        strategy: log.strategy(),
        pids: log.get_pids(),
        scan: log.summary(),
    };
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conf::ScanConfig;
    use tempfile::NamedTempFile;

    const LOG: &str = "\
01/23-12:34:56.78 node1 CaRT[10] fi   WARN src/gurt/fault_inject.c:300 d_should_fail() fault_id 0, injecting fault.
valgrind: noise
01/23-12:34:56.79 node1 CaRT[10] rpc  DBUG src/cart/crt_rpc.c:42 crt_rpc_priv_alloc(0x1a2b) Allocated 0x1a2b
01/23-12:34:56.80 node1 CaRT[11] rpc  INFO src/cart/crt_rpc.c:60 crt_rpc_done() finished
";

    fn open(threshold: u64) -> (NamedTempFile, LogSource) {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(LOG.as_bytes()).unwrap();
        file.flush().unwrap();
        let log = LogSource::open_with(file.path(), &ScanConfig { buffer_threshold: threshold }).unwrap();
        (file, log)
    }

    fn run(log: &mut LogSource, request: &DumpRequest) -> (usize, String) {
        let mut out = Vec::new();
        let count = dump(log, request, &mut out).unwrap();
        (count, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_dump_text_with_mark() {
        let (_file, mut log) = open(1 << 20);
        let request = DumpRequest {
            mark: Some("Allocated".to_string()),
            ..DumpRequest::default()
        };
        let (count, text) = run(&mut log, &request);
        assert_eq!(count, 3);
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].contains("    src/gurt/fault_inject.c:300"));
        assert!(lines[1].contains(" ** src/cart/crt_rpc.c:42"));
        assert!(!lines[2].contains(" ** "));
    }

    #[test]
    fn test_dump_raw_lines() {
        let (_file, mut log) = open(0);
        let request = DumpRequest {
            options: IterOptions::new().raw(true),
            ..DumpRequest::default()
        };
        let (count, text) = run(&mut log, &request);
        assert_eq!(count, 4);
        assert_eq!(text.lines().nth(1), Some("valgrind: noise"));
    }

    #[test]
    fn test_dump_ends_with_finds_injected_fault() {
        let (_file, mut log) = open(1 << 20);
        let request = DumpRequest {
            options: IterOptions::new().raw(true),
            ends_with: Some("fault_id 0, injecting fault.".to_string()),
            ..DumpRequest::default()
        };
        let (count, text) = run(&mut log, &request);
        assert_eq!(count, 1);
        assert!(text.contains("d_should_fail()"));
    }

    #[test]
    fn test_dump_json_lines() {
        let (_file, mut log) = open(1 << 20);
        let request = DumpRequest {
            options: IterOptions::new().with_pid(11),
            json: true,
            ..DumpRequest::default()
        };
        let (count, text) = run(&mut log, &request);
        assert_eq!(count, 1);
        let value: serde_json::Value = serde_json::from_str(text.trim()).unwrap();
        assert_eq!(value["pid"], 11);
        assert_eq!(value["function"], "crt_rpc_done");
    }

    #[test]
    fn test_dump_unknown_pid_fails() {
        let (_file, mut log) = open(1 << 20);
        let request = DumpRequest {
            options: IterOptions::new().with_pid(99),
            ..DumpRequest::default()
        };
        let mut out = Vec::new();
        let err = dump(&mut log, &request, &mut out).unwrap_err();
        assert!(err.to_string().contains("99"));
    }

    #[test]
    fn test_pids_and_summary() {
        let (_file, log) = open(0);
        let mut out = Vec::new();
        write_pids(&log, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "10\n11\n");

        let mut out = Vec::new();
        write_summary(&log, &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["strategy"], "streaming");
        assert_eq!(value["scan"]["lines"], 4);
        assert_eq!(value["scan"]["raw"], 1);
        assert_eq!(value["scan"]["trace"], 1);
    }
}
