pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{InMemorySource, JsonSnapshotStore};
pub use config::EngineConfig;
pub use crate::core::engine::{evaluate, AssignmentEngine};
pub use domain::request::{AssignmentRequest, AssignmentRequestPayload};
pub use domain::result::AssignmentResult;
pub use utils::error::{AssignError, Result};
