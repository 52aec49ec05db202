//! Console levels understood by the Chrome Logger extension

use serde::{Deserialize, Serialize};

use crate::error::ConsoleError;

/// A console method a row is replayed through in the browser
///
/// Serializes to the wire tag: plain `log` rows carry an empty string to
/// keep the header short, every other level carries its method name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LevelTag {
    #[serde(rename = "")]
    Log,
    #[serde(rename = "info")]
    Info,
    #[serde(rename = "warn")]
    Warn,
    #[serde(rename = "error")]
    Error,
    #[serde(rename = "group")]
    Group,
    #[serde(rename = "groupEnd")]
    GroupEnd,
    #[serde(rename = "groupCollapsed")]
    GroupCollapsed,
    #[serde(rename = "table")]
    Table,
}

impl LevelTag {
    /// Every supported level, in console-method order
    pub const ALL: [LevelTag; 8] = [
        LevelTag::Log,
        LevelTag::Info,
        LevelTag::Warn,
        LevelTag::Error,
        LevelTag::Group,
        LevelTag::GroupEnd,
        LevelTag::GroupCollapsed,
        LevelTag::Table,
    ];

    /// Console method name, as accepted by [`LevelTag::from_str`](std::str::FromStr)
    pub fn as_str(&self) -> &'static str {
        match self {
            LevelTag::Log => "log",
            LevelTag::Info => "info",
            LevelTag::Warn => "warn",
            LevelTag::Error => "error",
            LevelTag::Group => "group",
            LevelTag::GroupEnd => "groupEnd",
            LevelTag::GroupCollapsed => "groupCollapsed",
            LevelTag::Table => "table",
        }
    }

    /// Tag written into the `type` column
    pub fn as_wire(&self) -> &'static str {
        match self {
            LevelTag::Log => "",
            other => other.as_str(),
        }
    }

    /// Group markers structure the console output and never carry a call-site
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            LevelTag::Group | LevelTag::GroupEnd | LevelTag::GroupCollapsed
        )
    }

    /// Only `groupEnd` may be logged without arguments
    pub fn allows_empty(&self) -> bool {
        matches!(self, LevelTag::GroupEnd)
    }
}

impl std::fmt::Display for LevelTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for LevelTag {
    type Err = ConsoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LevelTag::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| ConsoleError::UnsupportedLevel {
                level: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_levels() {
        for level in LevelTag::ALL {
            let parsed: LevelTag = level.as_str().parse().unwrap();
            assert_eq!(parsed, level);
        }
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = "bogus".parse::<LevelTag>().unwrap_err();
        assert!(matches!(err, ConsoleError::UnsupportedLevel { ref level } if level == "bogus"));

        // Method names are case-sensitive, like the console API.
        assert!("groupend".parse::<LevelTag>().is_err());
        // The empty wire tag is not a method name.
        assert!("".parse::<LevelTag>().is_err());
    }

    #[test]
    fn test_wire_tags() {
        assert_eq!(LevelTag::Log.as_wire(), "");
        assert_eq!(LevelTag::GroupCollapsed.as_wire(), "groupCollapsed");
        assert_eq!(serde_json::to_string(&LevelTag::Log).unwrap(), "\"\"");
        assert_eq!(serde_json::to_string(&LevelTag::Warn).unwrap(), "\"warn\"");

        let parsed: LevelTag = serde_json::from_str("\"\"").unwrap();
        assert_eq!(parsed, LevelTag::Log);
    }

    #[test]
    fn test_structural_levels() {
        let structural: Vec<_> = LevelTag::ALL
            .into_iter()
            .filter(LevelTag::is_structural)
            .collect();
        assert_eq!(
            structural,
            vec![LevelTag::Group, LevelTag::GroupEnd, LevelTag::GroupCollapsed]
        );
        assert!(LevelTag::GroupEnd.allows_empty());
        assert!(!LevelTag::Group.allows_empty());
    }
}
