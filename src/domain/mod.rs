// Domain layer: models, request/result types and the persistence port.

pub mod model;
pub mod ports;
pub mod request;
pub mod result;
pub mod time;
