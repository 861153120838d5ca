use crate::error::LogError;

use super::level::Level;
use super::model::{RawRecord, Record, StructuredRecord};
use super::tag::resolve_tag;
use super::{MIN_TOKENS, PREAMBLE_BASE, TIMESTAMP_WIDTH};

const HOST_TOKEN: usize = 1;
const PID_TOKEN: usize = 2;
const LEVEL_TOKEN: usize = 4;
const FIRST_MESSAGE_TOKEN: usize = 5;

/// Characters wrapped around the pid, e.g. `CaRT[` and `]`.
const PID_PREFIX_LEN: usize = 5;

/// Quick shape test: enough tokens and a fixed-width timestamp.
pub fn is_structured(line: &str) -> bool {
    let mut tokens = line.split_whitespace();
    match tokens.next() {
        Some(ts) if ts.chars().count() == TIMESTAMP_WIDTH => {
            tokens.take(MIN_TOKENS - 1).count() == MIN_TOKENS - 1
        }
        _ => false,
    }
}

/// Decode one line of a log file. `index` is the 1-based line number.
///
/// Lines that do not have the CaRT shape come back as [`Record::Raw`]; lines
/// that do but carry an unknown level or a malformed pid fail with
/// [`LogError::InvalidLogFile`].
pub fn classify(line: &str, index: usize) -> Result<Record, LogError> {
    let line = line.trim_end_matches('\n');
    if !is_structured(line) {
        return Ok(RawRecord::new(line, index).into());
    }
    parse_structured(line, index).map(Record::from)
}

fn parse_structured(line: &str, index: usize) -> Result<StructuredRecord, LogError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let host = tokens[HOST_TOKEN];
    let pid_token = tokens[PID_TOKEN];

    let pid = parse_pid(pid_token).ok_or_else(|| LogError::InvalidLogFile {
        token: pid_token.to_string(),
        index,
    })?;

    let level = tokens[LEVEL_TOKEN]
        .parse::<Level>()
        .map_err(|token| LogError::InvalidLogFile { token, index })?;

    // Host and pid are the only variable-width parts of the preamble.
    let width = PREAMBLE_BASE + host.chars().count() + pid_token.chars().count();
    let preamble = char_prefix(line, width).to_string();

    let mut fields: Vec<String> = tokens[FIRST_MESSAGE_TOKEN..]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let tag = resolve_tag(&mut fields);
    let msg = fields.join(" ");

    Ok(StructuredRecord {
        index,
        pid,
        level,
        preamble,
        fields,
        trace: tag.trace,
        function: tag.function,
        descriptor: tag.descriptor,
        msg,
    })
}

/// `CaRT[1234]` -> 1234
fn parse_pid(token: &str) -> Option<u32> {
    let start = token.char_indices().nth(PID_PREFIX_LEN)?.0;
    let (end, _) = token.char_indices().last()?;
    token.get(start..end)?.parse().ok()
}

/// First `width` characters of `line`, or all of it when shorter.
fn char_prefix(line: &str, width: usize) -> &str {
    match line.char_indices().nth(width) {
        Some((end, _)) => &line[..end],
        None => line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const INFO_LINE: &str =
        "01/23-12:34:56.78 node1 CaRT[1234] rpc  INFO src/cart/crt_rpc.c:42 myfunc() did something 0xdeadbeef\n";

    fn structured(line: &str) -> StructuredRecord {
        match classify(line, 1).unwrap() {
            Record::Structured(rec) => rec,
            Record::Raw(raw) => panic!("expected structured record, got raw: {}", raw.line()),
        }
    }

    #[test]
    fn test_shape_check() {
        assert!(is_structured(INFO_LINE));
        assert!(!is_structured("01/23-12:34:56.78 node1 CaRT[1234] rpc INFO"));
        assert!(!is_structured("2018/01/01-00:00:00.000000 node1 CaRT[1234] rpc INFO a:1 f()"));
        assert!(!is_structured(""));
    }

    #[test]
    fn test_parse_info_line() {
        let rec = structured(INFO_LINE);
        assert_eq!(rec.index(), 1);
        assert_eq!(rec.pid(), 1234);
        assert_eq!(rec.level(), Level::Info);
        assert_eq!(rec.level().rank(), 6);
        assert!(!rec.is_trace());
        assert_eq!(rec.function(), Some("myfunc"));
        assert_eq!(rec.descriptor(), None);
        assert_eq!(rec.preamble(), "01/23-12:34:56.78 node1 CaRT[1234] rpc  INFO");
        assert_eq!(rec.msg(), "src/cart/crt_rpc.c:42 myfunc() did something 0xdeadbeef");
        assert_eq!(rec.get_anon_msg().as_deref(), Some("myfunc() did something 0x..."));
    }

    #[test]
    fn test_unknown_level_is_invalid_log_file() {
        let line = INFO_LINE.replace(" INFO ", " XTRA ");
        let err = classify(&line, 7).unwrap_err();
        match err {
            LogError::InvalidLogFile { token, index } => {
                assert_eq!(token, "XTRA");
                assert_eq!(index, 7);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_bad_pid_is_invalid_log_file() {
        let line = INFO_LINE.replace("CaRT[1234]", "CaRT[abcd]");
        let err = classify(&line, 1).unwrap_err();
        assert_eq!(err.token(), Some("CaRT[abcd]"));
    }

    #[test]
    fn test_short_line_is_raw() {
        let rec = classify("mercury: something happened\n", 3).unwrap();
        assert_eq!(rec, Record::Raw(RawRecord::new("mercury: something happened", 3)));
        assert_eq!(rec.to_str(true), "mercury: something happened");
        assert_eq!(rec.pid(), None);
        assert!(!rec.is_trace());
    }

    #[test]
    fn test_wide_timestamp_is_raw() {
        let line = "2018/01/01-00:00:00.000000 hostA Process[pid:1234] facility INFO src/file.c:42 myfunc() did something";
        let rec = classify(line, 1).unwrap();
        assert!(rec.is_raw());
        assert_eq!(rec.to_str(false), line);
    }

    #[test]
    fn test_raw_level_is_not_validated() {
        // Raw lines never reach level decoding.
        let rec = classify("short XTRA line", 1).unwrap();
        assert!(rec.is_raw());
    }

    #[test]
    fn test_trace_line() {
        let rec = structured(
            "01/23-12:34:56.78 node1 CaRT[42] rpc  DBUG src/cart/crt_rpc.c:99 crt_rpc_priv_alloc(0x1a2b) Allocated",
        );
        assert!(rec.is_trace());
        assert_eq!(rec.pid(), 42);
        assert_eq!(rec.level(), Level::Dbug);
        assert_eq!(rec.function(), Some("crt_rpc_priv_alloc"));
        assert_eq!(rec.descriptor(), Some("0x1a2b"));
    }

    #[test]
    fn test_legacy_trace_line_drops_marker() {
        let rec = structured(
            "01/23-12:34:56.78 node1 CaRT[42] rpc  DBUG src/ioc/ops.c:10 TRACE: ioc_open(0x10) opened",
        );
        assert!(rec.is_trace());
        assert_eq!(rec.function(), Some("ioc_open"));
        assert_eq!(rec.msg(), "src/ioc/ops.c:10 ioc_open(0x10) opened");
    }

    #[test]
    fn test_six_token_line_has_no_tag() {
        let rec = structured("01/23-12:34:56.78 node1 CaRT[42] rpc  WARN src/a.c:1");
        assert!(!rec.is_trace());
        assert_eq!(rec.function(), None);
        assert_eq!(rec.get_anon_msg(), None);
        assert_eq!(rec.get_msg(), "");
    }

    #[test]
    fn test_message_spacing_is_collapsed() {
        let rec = structured("01/23-12:34:56.78 node1 CaRT[42] rpc  ERR  src/a.c:1 f()   two   spaces");
        assert_eq!(rec.level(), Level::Err);
        assert_eq!(rec.msg(), "src/a.c:1 f() two spaces");
        assert_eq!(rec.to_str(false), format!("{}    {}", rec.preamble(), rec.msg()));
        assert_eq!(rec.to_str(true), format!("{} ** {}", rec.preamble(), rec.msg()));
    }

    #[test]
    fn test_preamble_clamps_to_short_line() {
        assert_eq!(char_prefix("abc", 10), "abc");
        assert_eq!(char_prefix("héllo", 2), "hé");
    }

    #[test]
    fn test_parse_pid() {
        assert_eq!(parse_pid("CaRT[1234]"), Some(1234));
        assert_eq!(parse_pid("CaRT[0]"), Some(0));
        assert_eq!(parse_pid("CaRT[]"), None);
        assert_eq!(parse_pid("CaRT[-1]"), None);
        assert_eq!(parse_pid("x"), None);
    }
}
