use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};

use super::schema::Column;
use super::types::{ProgramRecord, ProgramTable, WorldRankEntry};
use crate::diagnostics::Warning;

/// Default number of rows in the browse listing.
pub const DEFAULT_BROWSE_LIMIT: usize = 40;
/// Rows shown in the cost-of-living view.
pub const COST_VIEW_LIMIT: usize = 15;

/// Columns the cost-of-living view displays.
pub const COST_COLUMNS: [Column; 8] = [
    Column::Tuition,
    Column::Stipend,
    Column::RequiredIncome,
    Column::Food,
    Column::Housing,
    Column::Transportation,
    Column::Medical,
    Column::EnoughIncome,
];

/// Column a browse listing is sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Criterion {
    WorldRank,
    UsaRank,
    GlassdoorStar,
    Tuition,
    Stipend,
    StateAvgStipend,
}

impl Criterion {
    pub fn column(&self) -> Column {
        match self {
            Criterion::WorldRank => Column::WorldRank,
            Criterion::UsaRank => Column::Rank,
            Criterion::GlassdoorStar => Column::GlassdoorStar,
            Criterion::Tuition => Column::Tuition,
            Criterion::Stipend => Column::Stipend,
            Criterion::StateAvgStipend => Column::StateAvgStipend,
        }
    }

    /// Ranks and costs read best when small; everything else when large.
    pub fn ascending(&self) -> bool {
        matches!(
            self,
            Criterion::WorldRank | Criterion::UsaRank | Criterion::Tuition
        )
    }
}

/// A browse listing and the warnings produced while building it.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BrowseResult<'a> {
    pub rows: Vec<&'a ProgramRecord>,
    pub warnings: Vec<Warning>,
}

/// Records of one field sorted by `criterion`, best first, truncated to `limit`.
///
/// Records without a value for the criterion come last in input order.
/// When the source has no such column the listing is empty.
pub fn browse_by_criterion<'a>(
    table: &'a ProgramTable,
    field: &str,
    criterion: Criterion,
    limit: usize,
) -> BrowseResult<'a> {
    browse_requiring(table, field, criterion, limit, &[])
}

/// Same ordering as `browse_by_criterion`, for the cost-of-living view.
/// Every cost column has to be present as well.
pub fn browse_costs<'a>(
    table: &'a ProgramTable,
    field: &str,
    criterion: Criterion,
    limit: usize,
) -> BrowseResult<'a> {
    browse_requiring(table, field, criterion, limit, &COST_COLUMNS)
}

fn browse_requiring<'a>(
    table: &'a ProgramTable,
    field: &str,
    criterion: Criterion,
    limit: usize,
    extra: &[Column],
) -> BrowseResult<'a> {
    let column = criterion.column();
    let required: BTreeSet<Column> = std::iter::once(column).chain(extra.iter().copied()).collect();
    let warnings: Vec<Warning> = required
        .into_iter()
        .filter(|c| !table.has_column(*c))
        .map(|column| Warning::InputShape { column })
        .collect();
    if !warnings.is_empty() {
        return BrowseResult {
            rows: Vec::new(),
            warnings,
        };
    }

    let mut rows: Vec<&ProgramRecord> = table
        .records()
        .iter()
        .filter(|r| r.field == field)
        .collect();

    // sort_by is stable, so equal values keep input order
    rows.sort_by(|a, b| match (a.number(column), b.number(column)) {
        (Some(x), Some(y)) => {
            let ord = x.partial_cmp(&y).unwrap_or(Ordering::Equal);
            if criterion.ascending() {
                ord
            } else {
                ord.reverse()
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    rows.truncate(limit);
    BrowseResult {
        rows,
        warnings: Vec::new(),
    }
}

/// Distinct fields in the order they first appear.
pub fn fields(table: &ProgramTable) -> Vec<&str> {
    let mut seen = HashSet::new();
    table
        .records()
        .iter()
        .map(|r| r.field.as_str())
        .filter(|f| seen.insert(*f))
        .collect()
}

/// Distinct regions, sorted. Includes the "Unknown" sentinel when present.
pub fn regions(table: &ProgramTable) -> Vec<&str> {
    table
        .records()
        .iter()
        .map(|r| r.region.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// World ranking entries by ascending rank, unranked last, truncated to `limit`.
pub fn world_ranking(entries: &[WorldRankEntry], limit: usize) -> Vec<&WorldRankEntry> {
    let mut rows: Vec<&WorldRankEntry> = entries.iter().collect();
    rows.sort_by(|a, b| match (a.rank, b.rank) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    rows.truncate(limit);
    rows
}

/// Job market figures published per field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldOutlook {
    pub field: String,
    pub post_phd_salary: Option<f64>,
    pub post_phd_employment: Option<f64>,
}

/// Outlook for a field, taken from its first listing.
pub fn field_outlook(table: &ProgramTable, field: &str) -> Option<FieldOutlook> {
    table
        .records()
        .iter()
        .find(|r| r.field == field)
        .map(|r| FieldOutlook {
            field: r.field.clone(),
            post_phd_salary: r.post_phd_salary,
            post_phd_employment: r.post_phd_employment,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::UNKNOWN_REGION;

    fn record(field: &str, region: &str, title: &str, rank: Option<f64>, stipend: Option<f64>) -> ProgramRecord {
        ProgramRecord {
            field: field.to_string(),
            region: region.to_string(),
            title: title.to_string(),
            rank,
            stipend,
            ..Default::default()
        }
    }

    fn sample_table() -> ProgramTable {
        ProgramTable::from_records(vec![
            record("Chemistry", "CA", "c1", Some(20.0), Some(30000.0)),
            record("Chemistry", "NY", "c2", Some(5.0), Some(25000.0)),
            record("Biology", "TX", "b1", Some(1.0), Some(50000.0)),
            record("Chemistry", UNKNOWN_REGION, "c3", None, Some(40000.0)),
            record("Chemistry", "CA", "c4", Some(5.0), None),
        ])
    }

    fn titles(rows: &[&ProgramRecord]) -> Vec<String> {
        rows.iter().map(|r| r.title.clone()).collect()
    }

    #[test]
    fn test_browse_rank_ascending_missing_last() {
        let table = sample_table();
        let rows = browse_by_criterion(&table, "Chemistry", Criterion::UsaRank, 10).rows;
        // c2 and c4 tie at 5 and keep input order
        assert_eq!(titles(&rows), vec!["c2", "c4", "c1", "c3"]);
    }

    #[test]
    fn test_browse_stipend_descending() {
        let table = sample_table();
        let rows = browse_by_criterion(&table, "Chemistry", Criterion::Stipend, 10).rows;
        assert_eq!(titles(&rows), vec!["c3", "c1", "c2", "c4"]);
    }

    #[test]
    fn test_browse_limit() {
        let table = sample_table();
        let rows = browse_by_criterion(&table, "Chemistry", Criterion::Stipend, 2).rows;
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_browse_unknown_field() {
        let table = sample_table();
        let result = browse_by_criterion(&table, "Nonexistent", Criterion::Tuition, 10);
        assert!(result.rows.is_empty());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_browse_absent_column_is_empty_with_warning() {
        let columns = [Column::Field, Column::Region, Column::Rank].into_iter().collect();
        let mut records = vec![
            record("Chemistry", "CA", "c1", Some(30.0), None),
            record("Chemistry", "NY", "c2", Some(1.0), None),
        ];
        records[1].world_rank = Some(4.0);
        let table = ProgramTable::new(records, columns);

        let result = browse_by_criterion(&table, "Chemistry", Criterion::WorldRank, 10);
        assert!(result.rows.is_empty());
        assert_eq!(
            result.warnings,
            vec![Warning::InputShape {
                column: Column::WorldRank
            }]
        );

        // The column that is present still sorts
        let rows = browse_by_criterion(&table, "Chemistry", Criterion::UsaRank, 10).rows;
        assert_eq!(titles(&rows), vec!["c2", "c1"]);
    }

    #[test]
    fn test_browse_loaded_table_without_world_rank() {
        let csv = "field,State,USARank\nChem,CA,30\nChem,NY,1\n";
        let table = crate::table::read_programs(csv.as_bytes()).unwrap();

        let result = browse_by_criterion(&table, "Chem", Criterion::WorldRank, 10);
        assert!(result.rows.is_empty());
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_browse_costs_requires_cost_columns() {
        let columns = [Column::Field, Column::Region, Column::Rank, Column::Tuition, Column::Stipend]
            .into_iter()
            .collect();
        let table = ProgramTable::new(vec![record("Chemistry", "CA", "c1", Some(1.0), Some(1.0))], columns);

        let result = browse_costs(&table, "Chemistry", Criterion::UsaRank, 10);
        assert!(result.rows.is_empty());
        assert_eq!(
            result.warnings,
            vec![
                Warning::InputShape { column: Column::RequiredIncome },
                Warning::InputShape { column: Column::Food },
                Warning::InputShape { column: Column::Housing },
                Warning::InputShape { column: Column::Transportation },
                Warning::InputShape { column: Column::Medical },
                Warning::InputShape { column: Column::EnoughIncome },
            ]
        );
    }

    #[test]
    fn test_browse_costs_with_all_columns() {
        let table = sample_table();
        let result = browse_costs(&table, "Chemistry", Criterion::Stipend, COST_VIEW_LIMIT);
        assert!(result.warnings.is_empty());
        assert_eq!(titles(&result.rows), vec!["c3", "c1", "c2", "c4"]);
    }

    #[test]
    fn test_fields_first_appearance_order() {
        let table = sample_table();
        assert_eq!(fields(&table), vec!["Chemistry", "Biology"]);
    }

    #[test]
    fn test_regions_sorted_with_unknown() {
        let table = sample_table();
        assert_eq!(regions(&table), vec!["CA", "NY", "TX", "Unknown"]);
    }

    #[test]
    fn test_world_ranking_sorted_and_truncated() {
        let entry = |rank: Option<f64>, name: &str| WorldRankEntry {
            rank,
            name: name.to_string(),
            latitude: None,
            longitude: None,
        };
        let entries = vec![
            entry(Some(3.0), "Cambridge"),
            entry(None, "Unranked"),
            entry(Some(1.0), "Oxford"),
            entry(Some(2.0), "Stanford"),
        ];

        let names: Vec<&str> = world_ranking(&entries, 10).iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Oxford", "Stanford", "Cambridge", "Unranked"]);
        assert_eq!(world_ranking(&entries, 2).len(), 2);
    }

    #[test]
    fn test_field_outlook_uses_first_listing() {
        let mut records = vec![
            record("Physics", "CA", "p1", None, None),
            record("Physics", "NY", "p2", None, None),
        ];
        records[0].post_phd_salary = Some(110000.0);
        records[0].post_phd_employment = Some(92.5);
        records[1].post_phd_salary = Some(1.0);
        let table = ProgramTable::from_records(records);

        let outlook = field_outlook(&table, "Physics").unwrap();
        assert_eq!(outlook.post_phd_salary, Some(110000.0));
        assert_eq!(outlook.post_phd_employment, Some(92.5));
        assert!(field_outlook(&table, "Art").is_none());
    }
}
