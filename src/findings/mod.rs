pub mod extract;
pub mod kind;
pub mod normalize;
pub mod path;
pub mod record;

pub use kind::ResourceKind;
pub use normalize::normalize;
pub use record::NormalizedFinding;
