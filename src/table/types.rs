use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;

use super::schema::Column;

/// Region assigned to records whose state is blank.
pub const UNKNOWN_REGION: &str = "Unknown";

/// One doctoral program listing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ProgramRecord {
    #[serde(default)]
    pub field: String,
    #[serde(rename(deserialize = "State"), alias = "region", default)]
    pub region: String,
    /// USA rank, lower is better
    #[serde(rename(deserialize = "USARank"), alias = "USA Rank", alias = "rank", default, deserialize_with = "lenient_number")]
    pub rank: Option<f64>,
    #[serde(rename(deserialize = "WorldRank"), alias = "World Rank", default, deserialize_with = "lenient_number")]
    pub world_rank: Option<f64>,
    #[serde(rename(deserialize = "Tuition"), alias = "tuition", default, deserialize_with = "lenient_number")]
    pub tuition: Option<f64>,
    #[serde(rename(deserialize = "Salary_avg"), alias = "Salary/Stipend", alias = "stipend", default, deserialize_with = "lenient_number")]
    pub stipend: Option<f64>,
    #[serde(rename(deserialize = "State_Avg_Salary"), alias = "State Avg Salary/Stipend", default, deserialize_with = "lenient_number")]
    pub state_avg_stipend: Option<f64>,
    #[serde(rename(deserialize = "Star"), alias = "Glassdoor Star", default, deserialize_with = "lenient_number")]
    pub glassdoor_star: Option<f64>,
    #[serde(rename(deserialize = "study_name"), alias = "Project Title", default)]
    pub title: String,
    #[serde(rename(deserialize = "summary"), alias = "Description", default)]
    pub description: String,
    #[serde(rename(deserialize = "University"), default)]
    pub university: String,
    #[serde(rename(deserialize = "Duration"), default)]
    pub duration: Option<String>,
    #[serde(rename(deserialize = "City"), default)]
    pub city: String,
    #[serde(rename(deserialize = "LATITUDE"), default, deserialize_with = "lenient_number")]
    pub latitude: Option<f64>,
    #[serde(rename(deserialize = "LONGITUDE"), default, deserialize_with = "lenient_number")]
    pub longitude: Option<f64>,
    #[serde(rename(deserialize = "PostPhdSalary"), default, deserialize_with = "lenient_number")]
    pub post_phd_salary: Option<f64>,
    #[serde(rename(deserialize = "PostPhdEmploy"), default, deserialize_with = "lenient_number")]
    pub post_phd_employment: Option<f64>,
    #[serde(rename(deserialize = "Required Income"), default, deserialize_with = "lenient_number")]
    pub required_income: Option<f64>,
    #[serde(rename(deserialize = "Food"), default, deserialize_with = "lenient_number")]
    pub food: Option<f64>,
    #[serde(rename(deserialize = "Housing"), default, deserialize_with = "lenient_number")]
    pub housing: Option<f64>,
    #[serde(rename(deserialize = "Transportation"), default, deserialize_with = "lenient_number")]
    pub transportation: Option<f64>,
    #[serde(rename(deserialize = "Medical"), default, deserialize_with = "lenient_number")]
    pub medical: Option<f64>,
    #[serde(rename(deserialize = "Enough Income"), default)]
    pub enough_income: Option<String>,
}

impl ProgramRecord {
    /// Stipend left over after the required annual income for one adult.
    pub fn affordability(&self) -> Option<f64> {
        Some(self.stipend? - self.required_income?)
    }

    /// Numeric value of a column, if the column is numeric and the value present.
    pub fn number(&self, column: Column) -> Option<f64> {
        let value = match column {
            Column::Rank => self.rank,
            Column::WorldRank => self.world_rank,
            Column::Tuition => self.tuition,
            Column::Stipend => self.stipend,
            Column::StateAvgStipend => self.state_avg_stipend,
            Column::GlassdoorStar => self.glassdoor_star,
            Column::Latitude => self.latitude,
            Column::Longitude => self.longitude,
            Column::PostPhdSalary => self.post_phd_salary,
            Column::PostPhdEmployment => self.post_phd_employment,
            Column::RequiredIncome => self.required_income,
            Column::Food => self.food,
            Column::Housing => self.housing,
            Column::Transportation => self.transportation,
            Column::Medical => self.medical,
            _ => None,
        };
        value.filter(|v| v.is_finite())
    }
}

/// Entry of the world university ranking table.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct WorldRankEntry {
    #[serde(deserialize_with = "lenient_number")]
    pub rank: Option<f64>,
    pub name: String,
    #[serde(rename(deserialize = "Latitude"), alias = "latitude", default, deserialize_with = "lenient_number")]
    pub latitude: Option<f64>,
    #[serde(rename(deserialize = "Longitude"), alias = "longitude", default, deserialize_with = "lenient_number")]
    pub longitude: Option<f64>,
}

/// The loaded program table and the columns its source provided.
#[derive(Debug, Clone, Default)]
pub struct ProgramTable {
    records: Vec<ProgramRecord>,
    columns: BTreeSet<Column>,
}

impl ProgramTable {
    pub fn new(records: Vec<ProgramRecord>, columns: BTreeSet<Column>) -> Self {
        Self { records, columns }
    }

    /// Build a table that claims every column; handy for in-memory data.
    pub fn from_records(records: Vec<ProgramRecord>) -> Self {
        Self {
            records,
            columns: Column::ALL.into_iter().collect(),
        }
    }

    pub fn records(&self) -> &[ProgramRecord] {
        &self.records
    }

    pub fn has_column(&self, column: Column) -> bool {
        self.columns.contains(&column)
    }

    pub fn columns(&self) -> &BTreeSet<Column> {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Parse a spreadsheet-style number: "$12,500", " 87% ", "3.5".
pub fn parse_number(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | '%'))
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_number))
}
