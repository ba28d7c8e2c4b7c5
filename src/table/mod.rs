pub mod browse;
pub mod loader;
pub mod schema;
pub mod types;

pub use browse::{
    browse_by_criterion, browse_costs, field_outlook, fields, regions, world_ranking, BrowseResult,
    Criterion, FieldOutlook, COST_COLUMNS, COST_VIEW_LIMIT, DEFAULT_BROWSE_LIMIT,
};
pub use loader::{load_programs, load_world_rankings, read_programs, read_world_rankings, LoadError};
pub use schema::Column;
pub use types::{parse_number, ProgramRecord, ProgramTable, WorldRankEntry, UNKNOWN_REGION};
