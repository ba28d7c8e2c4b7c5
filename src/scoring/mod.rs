pub mod config;
pub mod engine;
pub mod normalize;
pub mod validation;

pub use config::*;
pub use engine::{
    compute_top_programs, FactorContribution, RankedPrograms, ScoredProgram, TopProgramsRequest,
    WEIGHT_SUM_TOLERANCE,
};
pub use normalize::MinMax;
pub use validation::{validate_scoring, weight_sum_warning};
