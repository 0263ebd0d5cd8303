use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// One of the three fixed task categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Daily,
    Weekly,
    Monthly,
}

impl Section {
    /// Display, cursor and persistence order
    pub const ALL: [Section; 3] = [Section::Daily, Section::Weekly, Section::Monthly];

    /// Human label ("Daily", "Weekly", "Monthly")
    pub fn label(self) -> &'static str {
        match self {
            Section::Daily => "Daily",
            Section::Weekly => "Weekly",
            Section::Monthly => "Monthly",
        }
    }

    /// Position in `Section::ALL`
    pub fn ordinal(self) -> usize {
        match self {
            Section::Daily => 0,
            Section::Weekly => 1,
            Section::Monthly => 2,
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Section::Daily => write!(f, "daily"),
            Section::Weekly => write!(f, "weekly"),
            Section::Monthly => write!(f, "monthly"),
        }
    }
}

/// Error for unknown section names
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown section '{0}' (expected daily, weekly or monthly)")]
pub struct UnknownSection(pub String);

impl FromStr for Section {
    type Err = UnknownSection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "daily" | "d" => Ok(Section::Daily),
            "weekly" | "w" => Ok(Section::Weekly),
            "monthly" | "m" => Ok(Section::Monthly),
            _ => Err(UnknownSection(s.to_string())),
        }
    }
}
