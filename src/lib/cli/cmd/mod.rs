pub mod create_config;
pub mod create_config_schema;
#[cfg(feature = "serve-static")]
pub mod serve;

pub use create_config::create_config;
pub use create_config_schema::create_config_schema;
#[cfg(feature = "serve-static")]
pub use serve::runtime_serve as serve;
pub use test::test;
