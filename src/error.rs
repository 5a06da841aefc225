//! Level configuration errors

use core::fmt;

/// Raised when level data cannot be turned into a playable world.
///
/// Parsing and validation fail fast: the first problem found is reported.
#[derive(Clone, Debug, PartialEq)]
pub enum LevelConfigError {
    NoLevels,
    EmptyPlatforms { level: String },
    EmptyEnemies { level: String },
    EmptyCollectibles { level: String },
    Malformed { line: usize, reason: String },
    UnknownEnemyKind { line: usize, kind: String },
    UnknownItemTier { line: usize, tier: String },
    OutOfRange { level: String, what: String, value: f32 },
    LevelIndexOutOfRange { index: usize, count: usize },
    Io { path: String, message: String },
}

impl fmt::Display for LevelConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoLevels => write!(f, "level configuration invalid: no levels defined"),
            Self::EmptyPlatforms { level } => {
                write!(f, "level configuration invalid: '{}' has no platforms", level)
            }
            Self::EmptyEnemies { level } => {
                write!(f, "level configuration invalid: '{}' has no enemies", level)
            }
            Self::EmptyCollectibles { level } => {
                write!(f, "level configuration invalid: '{}' has no collectibles", level)
            }
            Self::Malformed { line, reason } => {
                write!(f, "level configuration invalid: line {}: {}", line, reason)
            }
            Self::UnknownEnemyKind { line, kind } => write!(
                f,
                "level configuration invalid: line {}: unknown enemy kind '{}'",
                line, kind
            ),
            Self::UnknownItemTier { line, tier } => write!(
                f,
                "level configuration invalid: line {}: unknown item tier '{}'",
                line, tier
            ),
            Self::OutOfRange { level, what, value } => write!(
                f,
                "level configuration invalid: '{}' {} = {} is outside 0..1",
                level, what, value
            ),
            Self::LevelIndexOutOfRange { index, count } => write!(
                f,
                "level index {} out of range ({} levels loaded)",
                index, count
            ),
            Self::Io { path, message } => write!(f, "failed to read {}: {}", path, message),
        }
    }
}

impl std::error::Error for LevelConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_mentions_level_and_line() {
        let err = LevelConfigError::EmptyEnemies {
            level: "Basic Training".to_string(),
        };
        assert!(err.to_string().contains("Basic Training"));

        let err = LevelConfigError::Malformed {
            line: 7,
            reason: "expected 4 numbers".to_string(),
        };
        assert!(err.to_string().contains("line 7"));
    }
}
