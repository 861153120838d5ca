/// Redaction of run-specific values so messages from many runs can be grouped.
///
/// Pointers (`0x...`) and the fid/revision parts of GAH handles change from one
/// run to the next; everything else is left alone.

use std::borrow::Cow;

const POINTER_PREFIX: &str = "0x";
const POINTER_REDACTED: &str = "0x...";
const GAH_PREFIX: &str = "Gah(";

/// Redact a single message token.
pub fn anonymize_token(token: &str) -> Cow<'_, str> {
    if let Some(root) = gah_root(token) {
        return Cow::Owned(format!("{}{}.-.-)", GAH_PREFIX, root));
    }
    if token.starts_with(POINTER_PREFIX) {
        return Cow::Borrowed(POINTER_REDACTED);
    }
    Cow::Borrowed(token)
}

/// Root component of a `Gah(root.fid.revision)` token.
fn gah_root(token: &str) -> Option<&str> {
    let inner = token.strip_prefix(GAH_PREFIX)?.strip_suffix(')')?;
    let mut parts = inner.split('.');
    let root = parts.next()?;
    // Exactly three components.
    match (parts.next(), parts.next(), parts.next()) {
        (Some(_), Some(_), None) => Some(root),
        _ => None,
    }
}

/// Render `function() tok tok ...` with every token redacted.
pub fn anonymize<'a, I>(function: &str, tokens: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let body: Vec<Cow<'_, str>> = tokens.into_iter().map(anonymize_token).collect();
    format!("{}() {}", function, body.join(" "))
}
