pub mod orchestrator;

pub use orchestrator::{Inspector, InspectorOptions};
