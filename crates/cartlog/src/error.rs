use thiserror::Error;

/// Errors raised while scanning or iterating a CaRT log file.
///
/// Running off the end of a file is not an error: iterators simply return
/// `None`. Lines that do not look like CaRT log lines are not errors either,
/// they come back as raw records.
#[derive(Debug, Error)]
pub enum LogError {
    /// A structured line carried a level or pid token that could not be decoded.
    #[error("Invalid log file: unrecognized token '{token}' on line {index}")]
    InvalidLogFile { token: String, index: usize },

    /// Iterator reset to a pid that never appeared in the file.
    #[error("Invalid pid: {0} does not appear in the log file")]
    InvalidPid(u32),

    /// The log source was closed while an iterator still needed the file.
    #[error("Log source is closed")]
    Closed,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LogError {
    /// The offending token for `InvalidLogFile`, if this is one.
    pub fn token(&self) -> Option<&str> {
        match self {
            LogError::InvalidLogFile { token, .. } => Some(token.as_str()),
            _ => None,
        }
    }
}
