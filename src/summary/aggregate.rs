use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;

use super::quartile::{BoxStats, OutlierBounds};

/// Statistics of one group after outlier removal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupStats {
    pub group: String,
    pub mean: f64,
    pub count: usize,
    pub spread: BoxStats,
}

/// Result of trimming outliers and grouping.
#[derive(Debug, Clone, Serialize)]
pub struct GroupedSummary<T> {
    /// Records inside the bounds, in input order
    pub cleaned: Vec<T>,
    /// Group labels ascending by mean
    pub order: Vec<String>,
    /// Same order as `order`
    pub groups: Vec<GroupStats>,
    pub bounds: Option<OutlierBounds>,
    pub outliers: usize,
    pub coercion_failures: usize,
}

impl<T> Default for GroupedSummary<T> {
    fn default() -> Self {
        Self {
            cleaned: Vec::new(),
            order: Vec::new(),
            groups: Vec::new(),
            bounds: None,
            outliers: 0,
            coercion_failures: 0,
        }
    }
}

/// Trim IQR outliers from any record type, then group and average.
///
/// `value` returning `None` (or a non-finite number) counts as a coercion
/// failure; that record is left out of this summary only. Outlier bounds
/// come from the whole input, not from each group.
pub fn summarize_records<'a, R, K, V>(records: &'a [R], key: K, value: V) -> GroupedSummary<&'a R>
where
    K: Fn(&R) -> String,
    V: Fn(&R) -> Option<f64>,
{
    let mut coercion_failures = 0usize;
    let numeric: Vec<(&R, f64)> = records
        .iter()
        .filter_map(|r| match value(r).filter(|v| v.is_finite()) {
            Some(v) => Some((r, v)),
            None => {
                coercion_failures += 1;
                None
            }
        })
        .collect();

    let values: Vec<f64> = numeric.iter().map(|(_, v)| *v).collect();
    let Some(bounds) = OutlierBounds::from_values(&values) else {
        return GroupedSummary {
            coercion_failures,
            ..Default::default()
        };
    };

    let (kept, dropped): (Vec<(&R, f64)>, Vec<(&R, f64)>) =
        numeric.into_iter().partition(|(_, v)| bounds.contains(*v));

    // Groups in first-appearance order so equal means stay deterministic
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut buckets: Vec<(String, Vec<f64>)> = Vec::new();
    for &(record, v) in &kept {
        let label = key(record);
        let slot = *index.entry(label.clone()).or_insert_with(|| {
            buckets.push((label, Vec::new()));
            buckets.len() - 1
        });
        buckets[slot].1.push(v);
    }

    let mut groups: Vec<GroupStats> = buckets
        .into_iter()
        .filter_map(|(group, values)| {
            let spread = BoxStats::from_values(&values)?;
            let mean = values.iter().sum::<f64>() / values.len() as f64;
            Some(GroupStats {
                group,
                mean,
                count: values.len(),
                spread,
            })
        })
        .collect();
    groups.sort_by(|a, b| a.mean.partial_cmp(&b.mean).unwrap_or(Ordering::Equal));

    GroupedSummary {
        cleaned: kept.into_iter().map(|(r, _)| r).collect(),
        order: groups.iter().map(|g| g.group.clone()).collect(),
        groups,
        bounds: Some(bounds),
        outliers: dropped.len(),
        coercion_failures,
    }
}
