pub mod collector;

pub use collector::{FindingsCollector, SavedReports};
