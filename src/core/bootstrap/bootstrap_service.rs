// Bootstrap configurator - turns raw configuration values into a RuntimeConfig.
//
// Runs once, before any subprocess or network client exists. Only cheap local
// checks happen here; permission problems and disabled Google APIs are left
// for the tool server to report later.

use std::fs::File;
use std::path::PathBuf;

use thiserror::Error;

use super::bootstrap_models::{
    RuntimeConfig, DRIVE_FOLDER_ID_KEY, MODEL_API_KEY_KEY, SERVICE_ACCOUNT_PATH_KEY,
};
use super::config_source::{non_blank, ConfigSource};

// ============================================================================
// ERRORS
// ============================================================================

/// Local misconfiguration found at start-up. Each variant names the key to fix.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(
        "Service account file not found: {reason}. Download the service account JSON key \
         from the Google Cloud Console and point SERVICE_ACCOUNT_PATH at it \
         (conventionally ./credentials/service_account.json)."
    )]
    ServiceAccountFileNotFound {
        path: Option<PathBuf>,
        reason: String,
    },

    #[error(
        "DRIVE_FOLDER_ID not configured. Set it to the ID segment of your Google Drive \
         folder URL (https://drive.google.com/drive/folders/<ID>)."
    )]
    DriveFolderNotConfigured,

    #[error(
        "OPENAI_API_KEY not configured. Set it to the API key of your OpenAI-compatible \
         model provider."
    )]
    ModelApiKeyNotConfigured,
}

// ============================================================================
// CONFIGURATOR
// ============================================================================

pub struct BootstrapConfigurator<S: ConfigSource> {
    source: S,
}

impl<S: ConfigSource> BootstrapConfigurator<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Resolves the runtime config, stopping at the first failed check.
    ///
    /// Checks run in a fixed order: service account file, then Drive folder,
    /// then model key.
    pub fn resolve(&self) -> Result<RuntimeConfig, BootstrapError> {
        let service_account_path = self.resolve_service_account_path()?;

        let drive_folder_id = non_blank(&self.source, DRIVE_FOLDER_ID_KEY)
            .ok_or(BootstrapError::DriveFolderNotConfigured)?;

        let model_api_key = non_blank(&self.source, MODEL_API_KEY_KEY)
            .ok_or(BootstrapError::ModelApiKeyNotConfigured)?;

        tracing::debug!(
            service_account_path = %service_account_path.display(),
            drive_folder_id = %drive_folder_id,
            "Bootstrap configuration resolved"
        );

        Ok(RuntimeConfig::new(
            service_account_path,
            drive_folder_id,
            model_api_key,
        ))
    }

    fn resolve_service_account_path(&self) -> Result<PathBuf, BootstrapError> {
        let raw = non_blank(&self.source, SERVICE_ACCOUNT_PATH_KEY).ok_or_else(|| {
            BootstrapError::ServiceAccountFileNotFound {
                path: None,
                reason: format!("{} is not set", SERVICE_ACCOUNT_PATH_KEY),
            }
        })?;
        let path = PathBuf::from(raw);

        let not_found = |reason: String| BootstrapError::ServiceAccountFileNotFound {
            path: Some(path.clone()),
            reason,
        };

        let metadata = std::fs::metadata(&path)
            .map_err(|e| not_found(format!("{}: {}", path.display(), e)))?;
        if !metadata.is_file() {
            return Err(not_found(format!("{} is not a regular file", path.display())));
        }

        // Opening proves read access without pulling the key into memory.
        File::open(&path).map_err(|e| not_found(format!("{}: {}", path.display(), e)))?;

        Ok(path)
    }
}
