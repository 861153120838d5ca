use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// CaRT log severity, most severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    Fatal,
    Crit,
    Err,
    Warn,
    Note,
    Info,
    Dbug,
}

impl Level {
    pub const ALL: [Level; 7] = [
        Level::Fatal,
        Level::Crit,
        Level::Err,
        Level::Warn,
        Level::Note,
        Level::Info,
        Level::Dbug,
    ];

    /// Numeric severity rank, 1 (FATAL) through 7 (DBUG).
    pub fn rank(&self) -> u8 {
        match self {
            Level::Fatal => 1,
            Level::Crit => 2,
            Level::Err => 3,
            Level::Warn => 4,
            Level::Note => 5,
            Level::Info => 6,
            Level::Dbug => 7,
        }
    }

    /// The token as it appears in a log line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Fatal => "FATAL",
            Level::Crit => "CRIT",
            Level::Err => "ERR",
            Level::Warn => "WARN",
            Level::Note => "NOTE",
            Level::Info => "INFO",
            Level::Dbug => "DBUG",
        }
    }
}

impl FromStr for Level {
    type Err = String;

    /// Exact, case-sensitive match against the log vocabulary.
    fn from_str(token: &str) -> Result<Self, String> {
        Level::ALL
            .iter()
            .copied()
            .find(|level| level.as_str() == token)
            .ok_or_else(|| token.to_string())
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranks_follow_vocabulary_order() {
        let ranks: Vec<u8> = Level::ALL.iter().map(|l| l.rank()).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_parse_known_levels() {
        for level in Level::ALL {
            assert_eq!(level.as_str().parse::<Level>(), Ok(level));
        }
        assert_eq!("INFO".parse::<Level>().map(|l| l.rank()), Ok(6));
    }

    #[test]
    fn test_parse_rejects_unknown_and_lowercase() {
        assert_eq!("XTRA".parse::<Level>(), Err("XTRA".to_string()));
        assert!("info".parse::<Level>().is_err());
        assert!("DEBUG".parse::<Level>().is_err());
    }

    #[test]
    fn test_more_severe_sorts_first() {
        assert!(Level::Fatal < Level::Dbug);
        assert!(Level::Err < Level::Warn);
    }
}
