// Adapters layer: concrete availability sources behind the domain port.

pub mod json_file;
pub mod memory;

pub use json_file::JsonSnapshotStore;
pub use memory::InMemorySource;
