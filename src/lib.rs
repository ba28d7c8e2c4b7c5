pub mod config;
pub mod diagnostics;
pub mod output;
pub mod scoring;
pub mod summary;
pub mod table;
