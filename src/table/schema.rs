use serde::{Deserialize, Serialize};
use std::fmt;

/// Logical columns of the program table.
///
/// Each column accepts a few header spellings; the first one is what the
/// published dataset uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Field,
    Region,
    Rank,
    WorldRank,
    Tuition,
    Stipend,
    StateAvgStipend,
    GlassdoorStar,
    Title,
    Description,
    University,
    Duration,
    City,
    Latitude,
    Longitude,
    PostPhdSalary,
    PostPhdEmployment,
    RequiredIncome,
    Food,
    Housing,
    Transportation,
    Medical,
    EnoughIncome,
}

impl Column {
    pub const ALL: [Column; 23] = [
        Column::Field,
        Column::Region,
        Column::Rank,
        Column::WorldRank,
        Column::Tuition,
        Column::Stipend,
        Column::StateAvgStipend,
        Column::GlassdoorStar,
        Column::Title,
        Column::Description,
        Column::University,
        Column::Duration,
        Column::City,
        Column::Latitude,
        Column::Longitude,
        Column::PostPhdSalary,
        Column::PostPhdEmployment,
        Column::RequiredIncome,
        Column::Food,
        Column::Housing,
        Column::Transportation,
        Column::Medical,
        Column::EnoughIncome,
    ];

    /// Header names accepted for this column. Keep in sync with the serde
    /// attributes on `ProgramRecord`.
    pub fn headers(&self) -> &'static [&'static str] {
        match self {
            Column::Field => &["field"],
            Column::Region => &["State", "region"],
            Column::Rank => &["USARank", "USA Rank", "rank"],
            Column::WorldRank => &["WorldRank", "World Rank"],
            Column::Tuition => &["Tuition", "tuition"],
            Column::Stipend => &["Salary_avg", "Salary/Stipend", "stipend"],
            Column::StateAvgStipend => &["State_Avg_Salary", "State Avg Salary/Stipend"],
            Column::GlassdoorStar => &["Star", "Glassdoor Star"],
            Column::Title => &["study_name", "Project Title"],
            Column::Description => &["summary", "Description"],
            Column::University => &["University"],
            Column::Duration => &["Duration"],
            Column::City => &["City"],
            Column::Latitude => &["LATITUDE"],
            Column::Longitude => &["LONGITUDE"],
            Column::PostPhdSalary => &["PostPhdSalary"],
            Column::PostPhdEmployment => &["PostPhdEmploy"],
            Column::RequiredIncome => &["Required Income"],
            Column::Food => &["Food"],
            Column::Housing => &["Housing"],
            Column::Transportation => &["Transportation"],
            Column::Medical => &["Medical"],
            Column::EnoughIncome => &["Enough Income"],
        }
    }

    /// Resolve a CSV header to its column, ignoring surrounding whitespace.
    pub fn from_header(header: &str) -> Option<Column> {
        let header = header.trim();
        Column::ALL
            .iter()
            .copied()
            .find(|c| c.headers().iter().any(|h| *h == header))
    }

    /// Human-readable label used in messages and table headings.
    pub fn label(&self) -> &'static str {
        match self {
            Column::Field => "field",
            Column::Region => "state",
            Column::Rank => "USA rank",
            Column::WorldRank => "world rank",
            Column::Tuition => "tuition",
            Column::Stipend => "stipend",
            Column::StateAvgStipend => "state average stipend",
            Column::GlassdoorStar => "Glassdoor stars",
            Column::Title => "project title",
            Column::Description => "description",
            Column::University => "university",
            Column::Duration => "duration",
            Column::City => "city",
            Column::Latitude => "latitude",
            Column::Longitude => "longitude",
            Column::PostPhdSalary => "post-PhD salary",
            Column::PostPhdEmployment => "post-PhD employment",
            Column::RequiredIncome => "required income",
            Column::Food => "food",
            Column::Housing => "housing",
            Column::Transportation => "transportation",
            Column::Medical => "medical",
            Column::EnoughIncome => "enough income",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_from_header_canonical_and_alias() {
        assert_eq!(Column::from_header("USARank"), Some(Column::Rank));
        assert_eq!(Column::from_header("USA Rank"), Some(Column::Rank));
        assert_eq!(Column::from_header(" Salary/Stipend "), Some(Column::Stipend));
        assert_eq!(Column::from_header("State"), Some(Column::Region));
    }

    #[test]
    fn test_from_header_unknown() {
        assert_eq!(Column::from_header("Unnamed: 0"), None);
    }

    #[test]
    fn test_headers_are_unique_across_columns() {
        let mut seen = HashSet::new();
        for column in Column::ALL {
            for header in column.headers() {
                assert!(seen.insert(*header), "duplicate header {}", header);
            }
        }
    }
}
