pub mod booking;
pub mod context;
mod dependencies;
pub mod schedule;

pub use context::{DeadlineExceeded, OperationContext};
pub use dependencies::ServiceDependencies;
