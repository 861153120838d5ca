//! Tag token handling: decides whether a line is a trace record and pulls the
//! function name and descriptor out of `name(descriptor)` tags.

/// Marker used by older log files in place of a `name(descriptor)` tag.
pub const LEGACY_TRACE_MARKER: &str = "TRACE:";

/// Descriptor text the logger prints for a NULL pointer.
pub const NIL_DESCRIPTOR: &str = "(nil)";

/// Position of the tag within the message fields (field 0 is `path:lineno`).
pub const TAG_FIELD: usize = 1;

/// What the tag token says about a line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagInfo {
    pub trace: bool,
    pub function: Option<String>,
    pub descriptor: Option<String>,
}

/// Inspect the tag in `fields`, dropping a legacy `TRACE:` marker in place.
///
/// - `TRACE:` marks a trace line; the token after it becomes the tag.
/// - `name()` names the function but is not a trace line.
/// - `name(descriptor)` is a trace line.
/// - anything else carries no function metadata.
pub fn resolve_tag(fields: &mut Vec<String>) -> TagInfo {
    let Some(tag) = fields.get(TAG_FIELD) else {
        return TagInfo::default();
    };

    if tag == LEGACY_TRACE_MARKER {
        fields.remove(TAG_FIELD);
        let (function, descriptor) = fields
            .get(TAG_FIELD)
            .map(|tag| split_trace_tag(tag))
            .unwrap_or_default();
        return TagInfo {
            trace: true,
            function: Some(function),
            descriptor: Some(descriptor),
        };
    }

    if let Some(name) = tag.strip_suffix("()") {
        return TagInfo {
            trace: false,
            function: Some(name.to_string()),
            descriptor: None,
        };
    }

    if tag.ends_with(')') {
        let (function, descriptor) = split_trace_tag(tag);
        return TagInfo {
            trace: true,
            function: Some(function),
            descriptor: Some(descriptor),
        };
    }

    TagInfo::default()
}

/// Split `name(descriptor)` into its parts, normalizing `(nil)` to "".
fn split_trace_tag(tag: &str) -> (String, String) {
    match tag.find('(') {
        Some(open) => {
            let inner = &tag[open + 1..];
            let inner = inner.strip_suffix(')').unwrap_or(inner);
            let descriptor = if inner == NIL_DESCRIPTOR { "" } else { inner };
            (tag[..open].to_string(), descriptor.to_string())
        }
        None => (tag.strip_suffix(')').unwrap_or(tag).to_string(), String::new()),
    }
}
