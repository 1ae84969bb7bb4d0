pub mod loopback_engine;

pub use loopback_engine::*;
pub use test_server::*;
