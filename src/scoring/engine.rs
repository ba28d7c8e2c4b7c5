use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeSet;

use super::config::ScoreWeights;
use super::normalize::MinMax;
use super::validation::weight_sum_warning;
use crate::diagnostics::Warning;
use crate::table::{Column, ProgramRecord, ProgramTable};

/// Allowed distance of the weight sum from 1.0 before warning.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

const SCORED_COLUMNS: [Column; 3] = [Column::Rank, Column::Tuition, Column::Stipend];

/// Parameters of one ranking request.
#[derive(Debug, Clone)]
pub struct TopProgramsRequest {
    pub field: String,
    pub weights: ScoreWeights,
    /// Empty means every region is allowed
    pub allowed_regions: BTreeSet<String>,
    pub k: usize,
}

impl TopProgramsRequest {
    pub fn new(field: impl Into<String>, weights: ScoreWeights, k: usize) -> Self {
        Self {
            field: field.into(),
            weights,
            allowed_regions: BTreeSet::new(),
            k,
        }
    }

    pub fn with_regions<I, S>(mut self, regions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_regions = regions.into_iter().map(Into::into).collect();
        self
    }

    fn region_allowed(&self, region: &str) -> bool {
        self.allowed_regions.is_empty() || self.allowed_regions.contains(region)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FactorContribution {
    pub column: Column,
    pub value: f64,      // raw column value
    pub normalized: f64, // min-max over the candidate set
    pub weight: f64,
    pub contribution: f64, // share of the final score
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoredProgram<'a> {
    pub record: &'a ProgramRecord,
    /// `None` when the record lacks rank, tuition or stipend
    pub score: Option<f64>,
    pub breakdown: Vec<FactorContribution>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RankedPrograms<'a> {
    pub programs: Vec<ScoredProgram<'a>>,
    /// Size of the candidate set the scores were normalized over
    pub candidates: usize,
    pub warnings: Vec<Warning>,
}

struct Scales {
    rank: Option<MinMax>,
    tuition: Option<MinMax>,
    stipend: Option<MinMax>,
}

/// Rank the programs of one field by weighted rank, tuition and stipend.
///
/// Normalization runs over the field's candidates only, so scores from
/// different requests are not comparable. The region filter applies after
/// scoring and before truncation to `k`.
pub fn compute_top_programs<'a>(
    table: &'a ProgramTable,
    request: &TopProgramsRequest,
) -> RankedPrograms<'a> {
    let mut warnings: Vec<Warning> = weight_sum_warning(&request.weights).into_iter().collect();

    let missing: Vec<Column> = SCORED_COLUMNS
        .iter()
        .copied()
        .filter(|c| !table.has_column(*c))
        .collect();
    if !missing.is_empty() {
        warnings.extend(missing.into_iter().map(|column| Warning::InputShape { column }));
        return RankedPrograms {
            warnings,
            ..Default::default()
        };
    }

    let candidates: Vec<&ProgramRecord> = table
        .records()
        .iter()
        .filter(|r| r.field == request.field)
        .collect();
    if candidates.is_empty() {
        return RankedPrograms {
            warnings,
            ..Default::default()
        };
    }

    let scales = Scales {
        rank: MinMax::fit(candidates.iter().map(|r| r.rank)),
        tuition: MinMax::fit(candidates.iter().map(|r| r.tuition)),
        stipend: MinMax::fit(candidates.iter().map(|r| r.stipend)),
    };
    for (column, scale) in [
        (Column::Rank, &scales.rank),
        (Column::Tuition, &scales.tuition),
        (Column::Stipend, &scales.stipend),
    ] {
        if scale.as_ref().is_some_and(MinMax::is_degenerate) {
            warnings.push(Warning::DegenerateRange { column });
        }
    }

    let candidate_count = candidates.len();
    let mut scored: Vec<ScoredProgram> = candidates
        .into_iter()
        .map(|record| score_record(record, &scales, &request.weights))
        .collect();

    // Stable: equal scores keep input order, unscored records go last
    scored.sort_by(|a, b| match (a.score, b.score) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    scored.retain(|s| request.region_allowed(&s.record.region));
    scored.truncate(request.k);

    RankedPrograms {
        programs: scored,
        candidates: candidate_count,
        warnings,
    }
}

fn score_record<'a>(
    record: &'a ProgramRecord,
    scales: &Scales,
    weights: &ScoreWeights,
) -> ScoredProgram<'a> {
    let factors = [
        (Column::Rank, record.rank, scales.rank, weights.rank, true),
        (Column::Tuition, record.tuition, scales.tuition, weights.tuition, true),
        (Column::Stipend, record.stipend, scales.stipend, weights.stipend, false),
    ];

    let mut breakdown = Vec::with_capacity(factors.len());
    for (column, value, scale, weight, lower_is_better) in factors {
        let (Some(value), Some(scale)) = (value, scale) else {
            return ScoredProgram {
                record,
                score: None,
                breakdown: Vec::new(),
            };
        };
        let normalized = scale.normalize(value);
        let merit = if lower_is_better {
            1.0 - normalized
        } else {
            normalized
        };
        breakdown.push(FactorContribution {
            column,
            value,
            normalized,
            weight,
            contribution: merit * weight,
        });
    }

    let score = breakdown.iter().map(|f| f.contribution).sum();
    ScoredProgram {
        record,
        score: Some(score),
        breakdown,
    }
}
