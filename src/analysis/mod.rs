pub mod composition;
pub mod composition_stats;
pub mod ranking;
