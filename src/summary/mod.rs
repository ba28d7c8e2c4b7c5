pub mod aggregate;
pub mod grouping;
pub mod quartile;

pub use aggregate::{summarize_records, GroupStats, GroupedSummary};
pub use grouping::{summarize_by_group, GroupKey, RobustSummary, ValueColumn};
pub use quartile::{quantile, BoxStats, OutlierBounds, IQR_MULTIPLIER};
