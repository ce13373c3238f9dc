//! Scanner integration test modules

pub mod failures;
pub mod outcomes;
pub mod progress;
