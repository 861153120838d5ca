use std::fmt;

use serde::Serialize;

use super::anon;
use super::level::Level;

/// A line that is not a CaRT log line, e.g. mercury or libfabric output
/// interleaved in the same file. Kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawRecord {
    pub(crate) index: usize,
    pub(crate) line: String,
}

impl RawRecord {
    pub fn new(line: &str, index: usize) -> Self {
        Self {
            index,
            line: line.trim_end_matches('\n').to_string(),
        }
    }

    /// 1-based line number within the file.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn line(&self) -> &str {
        &self.line
    }
}

/// Message shapes that name a parent object, keyed on message field 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentShape {
    /// `<path> <tag> Registered <kind> <name> parent <parent> ...`
    Registered,
    /// `<path> <tag> Link <child> to <parent> ...`
    Link,
}

impl ParentShape {
    const KEY_FIELD: usize = 2;

    fn detect(fields: &[String]) -> Option<Self> {
        match fields.get(Self::KEY_FIELD).map(String::as_str) {
            Some("Registered") => Some(ParentShape::Registered),
            Some("Link") => Some(ParentShape::Link),
            _ => None,
        }
    }

    /// Message field holding the parent for this shape.
    pub fn parent_field(&self) -> usize {
        match self {
            ParentShape::Registered => 6,
            ParentShape::Link => 5,
        }
    }
}

/// A fully decoded CaRT log line.
///
/// Built by [`super::classify::classify`]; immutable afterwards. Derived values
/// (`filename`, `lineno`, `parent`, ...) are computed on request and return
/// `None` when the line does not have the required shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructuredRecord {
    pub(crate) index: usize,
    pub(crate) pid: u32,
    pub(crate) level: Level,
    pub(crate) preamble: String,
    pub(crate) fields: Vec<String>,
    pub(crate) trace: bool,
    pub(crate) function: Option<String>,
    pub(crate) descriptor: Option<String>,
    /// Message fields joined with single spaces.
    pub(crate) msg: String,
}

impl StructuredRecord {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn pid(&self) -> u32 {
        self.pid
    }

    pub fn level(&self) -> Level {
        self.level
    }

    /// Timestamp, host, pid, facility and level exactly as written.
    pub fn preamble(&self) -> &str {
        &self.preamble
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn field(&self, idx: usize) -> Option<&str> {
        self.fields.get(idx).map(String::as_str)
    }

    pub fn is_trace(&self) -> bool {
        self.trace
    }

    /// Function named by the tag. Always set on trace records.
    pub fn function(&self) -> Option<&str> {
        self.function.as_deref()
    }

    /// Descriptor correlating trace events. Always set on trace records,
    /// empty for a `(nil)` descriptor.
    pub fn descriptor(&self) -> Option<&str> {
        self.descriptor.as_deref()
    }

    /// Reconstructed message. Runs of whitespace collapse to one space.
    pub fn msg(&self) -> &str {
        &self.msg
    }

    /// Message without the `path:lineno` field.
    pub fn get_msg(&self) -> String {
        self.fields.iter().skip(1).map(String::as_str).collect::<Vec<_>>().join(" ")
    }

    /// Message with pointers and GAH revisions redacted, prefixed by
    /// `function() `. `None` when the line names no function.
    pub fn get_anon_msg(&self) -> Option<String> {
        let function = self.function.as_deref()?;
        Some(anon::anonymize(
            function,
            self.fields.iter().skip(2).map(String::as_str),
        ))
    }

    /// Source file from the `path:lineno` field.
    pub fn filename(&self) -> Option<&str> {
        self.location().map(|(path, _)| path)
    }

    /// Source line from the `path:lineno` field.
    pub fn lineno(&self) -> Option<u32> {
        self.location().map(|(_, line)| line)
    }

    fn location(&self) -> Option<(&str, u32)> {
        let field = self.fields.first()?;
        let mut parts = field.split(':');
        let (path, line) = (parts.next()?, parts.next()?);
        if parts.next().is_some() {
            return None;
        }
        Some((path, line.parse().ok()?))
    }

    pub fn parent_shape(&self) -> Option<ParentShape> {
        ParentShape::detect(&self.fields)
    }

    /// Parent object named by `Registered` and `Link` messages.
    pub fn parent(&self) -> Option<&str> {
        let shape = self.parent_shape()?;
        self.field(shape.parent_field())
    }

    /// Substring match against the message only.
    pub fn contains(&self, needle: &str) -> bool {
        self.msg.contains(needle)
    }

    /// Suffix match against the message only.
    pub fn ends_with(&self, suffix: &str) -> bool {
        self.msg.ends_with(suffix)
    }

    /// Printable line; `mark` swaps the separator for ` ** ` so the line
    /// stands out in a listing.
    pub fn to_str(&self, mark: bool) -> String {
        let sep = if mark { " ** " } else { "    " };
        format!("{}{}{}", self.preamble, sep, self.msg)
    }
}

/// One line of a log file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Record {
    Raw(RawRecord),
    Structured(StructuredRecord),
}

impl Record {
    pub fn index(&self) -> usize {
        match self {
            Record::Raw(raw) => raw.index,
            Record::Structured(rec) => rec.index,
        }
    }

    /// Raw records have no pid.
    pub fn pid(&self) -> Option<u32> {
        match self {
            Record::Raw(_) => None,
            Record::Structured(rec) => Some(rec.pid),
        }
    }

    pub fn is_raw(&self) -> bool {
        matches!(self, Record::Raw(_))
    }

    pub fn is_trace(&self) -> bool {
        match self {
            Record::Raw(_) => false,
            Record::Structured(rec) => rec.trace,
        }
    }

    pub fn as_structured(&self) -> Option<&StructuredRecord> {
        match self {
            Record::Raw(_) => None,
            Record::Structured(rec) => Some(rec),
        }
    }

    /// Raw lines print verbatim whatever `mark` says.
    pub fn to_str(&self, mark: bool) -> String {
        match self {
            Record::Raw(raw) => raw.line.clone(),
            Record::Structured(rec) => rec.to_str(mark),
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_str(false))
    }
}

impl From<RawRecord> for Record {
    fn from(raw: RawRecord) -> Self {
        Record::Raw(raw)
    }
}

impl From<StructuredRecord> for Record {
    fn from(rec: StructuredRecord) -> Self {
        Record::Structured(rec)
    }
}
