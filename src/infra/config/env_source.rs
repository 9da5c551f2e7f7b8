use crate::core::bootstrap::ConfigSource;

/// Reads configuration from the process environment.
///
/// Call `load_dotenv` first if a `.env` file should be honoured. Variables
/// already present in the environment are never overwritten by the file.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvConfigSource;

impl EnvConfigSource {
    pub fn new() -> Self {
        Self
    }

    /// Loads `.env` from the working directory (or a parent) if there is one.
    pub fn load_dotenv() {
        match dotenv::dotenv() {
            Ok(path) => tracing::debug!("Loaded environment from {}", path.display()),
            Err(e) if e.not_found() => tracing::debug!("No .env file found"),
            Err(e) => tracing::warn!("Ignoring unreadable .env file: {}", e),
        }
    }
}

impl ConfigSource for EnvConfigSource {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}
