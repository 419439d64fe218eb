pub mod alternatives;
pub mod conflict;
pub mod engine;
pub mod filter;
pub mod scoring;
pub mod selector;

pub use crate::domain::model::{Area, Table, TableAvailability};
pub use crate::domain::ports::{AvailabilitySource, TableQuery};
pub use crate::utils::error::Result;
