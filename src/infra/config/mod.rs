pub mod env_source;
pub mod service_account;

pub use env_source::EnvConfigSource;
