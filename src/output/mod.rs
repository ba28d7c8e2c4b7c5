pub mod formatter;
pub mod json;

pub use formatter::{
    format_browse_table, format_browse_tsv, format_cost_table, format_cost_tsv,
    format_field_outlook, format_fields, format_money, format_number, format_ranked_detail,
    format_ranked_table, format_ranked_tsv, format_score, format_summary_table,
    format_summary_tsv, format_warning, format_world_table, should_use_colors,
};
pub use json::render_json;
