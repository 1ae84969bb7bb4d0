mod registry;
mod service;

pub use registry::*;
pub use service::*;
