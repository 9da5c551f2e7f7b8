use std::fmt;
use std::path::{Path, PathBuf};

use super::config_source::{non_blank, ConfigSource};

pub const SERVICE_ACCOUNT_PATH_KEY: &str = "SERVICE_ACCOUNT_PATH";
pub const DRIVE_FOLDER_ID_KEY: &str = "DRIVE_FOLDER_ID";
pub const MODEL_API_KEY_KEY: &str = "OPENAI_API_KEY";

pub const BASE_URL_KEY: &str = "BASE_URL";
pub const MODEL_NAME_KEY: &str = "OPENAI_MODEL";

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o";

/// The three values every later stage depends on.
///
/// Only the bootstrap configurator can build one, and nothing can change it
/// afterwards: the fields are private and there are no setters.
#[derive(Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    service_account_path: PathBuf,
    drive_folder_id: String,
    model_api_key: String,
}

impl RuntimeConfig {
    pub(super) fn new(
        service_account_path: PathBuf,
        drive_folder_id: String,
        model_api_key: String,
    ) -> Self {
        Self {
            service_account_path,
            drive_folder_id,
            model_api_key,
        }
    }

    /// Path to the Google service account JSON key.
    pub fn service_account_path(&self) -> &Path {
        &self.service_account_path
    }

    /// Drive folder the tool server is scoped to.
    pub fn drive_folder_id(&self) -> &str {
        &self.drive_folder_id
    }

    /// Key for the OpenAI-compatible model client. The tool server never sees
    /// it, and nothing in this binary talks to the model yet, hence the allow.
    #[allow(dead_code)]
    pub fn model_api_key(&self) -> &str {
        &self.model_api_key
    }
}

// Keeps the model key out of logs and panic messages.
impl fmt::Debug for RuntimeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuntimeConfig")
            .field("service_account_path", &self.service_account_path)
            .field("drive_folder_id", &self.drive_folder_id)
            .field("model_api_key", &"<redacted>")
            .finish()
    }
}

/// Where and which language model the agents talk to.
/// Both values are optional and fall back to the OpenAI defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSettings {
    pub base_url: String,
    pub model: String,
}

impl ModelSettings {
    pub fn from_source(source: &impl ConfigSource) -> Self {
        Self {
            base_url: non_blank(source, BASE_URL_KEY)
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: non_blank(source, MODEL_NAME_KEY).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        }
    }
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }
}
