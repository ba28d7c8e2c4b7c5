use serde::{Deserialize, Serialize};

use super::aggregate::{summarize_records, GroupStats};
use super::quartile::OutlierBounds;
use crate::diagnostics::Warning;
use crate::table::{Column, ProgramRecord, ProgramTable};

/// Categorical column programs are grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum GroupKey {
    Field,
    Region,
    University,
    City,
}

impl GroupKey {
    pub fn column(&self) -> Column {
        match self {
            GroupKey::Field => Column::Field,
            GroupKey::Region => Column::Region,
            GroupKey::University => Column::University,
            GroupKey::City => Column::City,
        }
    }

    pub fn label_of(&self, record: &ProgramRecord) -> String {
        match self {
            GroupKey::Field => record.field.clone(),
            GroupKey::Region => record.region.clone(),
            GroupKey::University => record.university.clone(),
            GroupKey::City => record.city.clone(),
        }
    }
}

/// Numeric column summarized per group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ValueColumn {
    Tuition,
    Stipend,
    Rank,
    WorldRank,
    StateAvgStipend,
    RequiredIncome,
    GlassdoorStar,
    /// Stipend minus required income
    Affordability,
}

impl ValueColumn {
    /// Source columns the value is read or derived from.
    pub fn sources(&self) -> &'static [Column] {
        match self {
            ValueColumn::Tuition => &[Column::Tuition],
            ValueColumn::Stipend => &[Column::Stipend],
            ValueColumn::Rank => &[Column::Rank],
            ValueColumn::WorldRank => &[Column::WorldRank],
            ValueColumn::StateAvgStipend => &[Column::StateAvgStipend],
            ValueColumn::RequiredIncome => &[Column::RequiredIncome],
            ValueColumn::GlassdoorStar => &[Column::GlassdoorStar],
            ValueColumn::Affordability => &[Column::Stipend, Column::RequiredIncome],
        }
    }

    pub fn value_of(&self, record: &ProgramRecord) -> Option<f64> {
        match self {
            ValueColumn::Affordability => record.affordability(),
            other => record.number(other.sources()[0]),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ValueColumn::Affordability => "affordability",
            other => other.sources()[0].label(),
        }
    }
}

/// Outlier-trimmed per-group means of one column of the program table.
#[derive(Debug, Clone, Serialize)]
pub struct RobustSummary<'a> {
    pub group_key: GroupKey,
    pub value_column: ValueColumn,
    pub cleaned: Vec<&'a ProgramRecord>,
    pub order: Vec<String>,
    pub groups: Vec<GroupStats>,
    pub bounds: Option<OutlierBounds>,
    pub outliers: usize,
    pub warnings: Vec<Warning>,
}

impl<'a> RobustSummary<'a> {
    fn empty(group_key: GroupKey, value_column: ValueColumn, warnings: Vec<Warning>) -> Self {
        Self {
            group_key,
            value_column,
            cleaned: Vec::new(),
            order: Vec::new(),
            groups: Vec::new(),
            bounds: None,
            outliers: 0,
            warnings,
        }
    }
}

/// Drop IQR outliers of `value_column` across the whole table, then average
/// per `group_key` and order groups by ascending mean.
pub fn summarize_by_group<'a>(
    table: &'a ProgramTable,
    group_key: GroupKey,
    value_column: ValueColumn,
) -> RobustSummary<'a> {
    let missing: Vec<Warning> = std::iter::once(group_key.column())
        .chain(value_column.sources().iter().copied())
        .filter(|c| !table.has_column(*c))
        .map(|column| Warning::InputShape { column })
        .collect();
    if !missing.is_empty() {
        return RobustSummary::empty(group_key, value_column, missing);
    }

    let summary = summarize_records(
        table.records(),
        |r| group_key.label_of(r),
        |r| value_column.value_of(r),
    );

    let mut warnings = Vec::new();
    if summary.coercion_failures > 0 {
        warnings.push(Warning::Coercion {
            column: value_column,
            count: summary.coercion_failures,
        });
    }

    RobustSummary {
        group_key,
        value_column,
        cleaned: summary.cleaned,
        order: summary.order,
        groups: summary.groups,
        bounds: summary.bounds,
        outliers: summary.outliers,
        warnings,
    }
}
