pub mod analyze;
pub mod stats;
