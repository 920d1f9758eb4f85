//! Sort and filter selectors with their stable wire names.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Display ordering for the task list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOption {
    /// Newest first.
    #[default]
    Date,
    /// Ascending by text.
    Alphabetical,
    /// Open tasks before finished ones.
    Completed,
}

/// Subset of tasks to display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOption {
    #[default]
    All,
    Active,
    Completed,
}

impl SortOption {
    pub const ALL: [SortOption; 3] = [Self::Date, Self::Alphabetical, Self::Completed];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Alphabetical => "alphabetical",
            Self::Completed => "completed",
        }
    }
}

impl FilterOption {
    pub const ALL: [FilterOption; 3] = [Self::All, Self::Active, Self::Completed];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }
}

/// Input did not name a known sort or filter option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownOptionError {
    pub kind: &'static str,
    pub value: String,
}

impl Display for UnknownOptionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown {} option `{}`", self.kind, self.value)
    }
}

impl Error for UnknownOptionError {}

impl FromStr for SortOption {
    type Err = UnknownOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|option| option.as_str() == normalized)
            .ok_or_else(|| UnknownOptionError {
                kind: "sort",
                value: s.to_string(),
            })
    }
}

impl FromStr for FilterOption {
    type Err = UnknownOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|option| option.as_str() == normalized)
            .ok_or_else(|| UnknownOptionError {
                kind: "filter",
                value: s.to_string(),
            })
    }
}

impl Display for SortOption {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Display for FilterOption {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::{FilterOption, SortOption};

    #[test]
    fn options_parse_wire_names_case_insensitively() {
        assert_eq!(" Date ".parse::<SortOption>().unwrap(), SortOption::Date);
        assert_eq!(
            "ALPHABETICAL".parse::<SortOption>().unwrap(),
            SortOption::Alphabetical
        );
        assert_eq!("active".parse::<FilterOption>().unwrap(), FilterOption::Active);
    }

    #[test]
    fn unknown_option_reports_kind_and_value() {
        let err = "priority".parse::<SortOption>().unwrap_err();
        assert_eq!(err.to_string(), "unknown sort option `priority`");
    }

    #[test]
    fn display_matches_wire_names() {
        for option in SortOption::ALL {
            assert_eq!(option.to_string().parse::<SortOption>().unwrap(), option);
        }
        assert_eq!(FilterOption::default().to_string(), "all");
        assert_eq!(
            serde_json::to_value(SortOption::Alphabetical).unwrap(),
            "alphabetical"
        );
    }
}
