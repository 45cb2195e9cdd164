pub mod cli;
pub mod query;

pub use cli::{AwsCli, CommandOutput, CommandRunner};
pub use query::filter_criteria;
