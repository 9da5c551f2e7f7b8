// Tool server service - owns the hand-off from a validated RuntimeConfig to
// the external Google Sheets tool server.
//
// The service doesn't know how the server is reached; that's the launcher's
// job (see infra/tool_server). It only decides what gets launched and reports
// how it ended. Nothing is retried: a failed server is surfaced as-is.

use async_trait::async_trait;
use std::process::ExitStatus;
use thiserror::Error;

use super::tool_server_models::{ToolServerCommand, ToolServerLaunch};
use crate::core::bootstrap::RuntimeConfig;

// ============================================================================
// ERRORS
// ============================================================================

/// Failures that happen after bootstrap, on the tool server side.
#[derive(Debug, Error)]
pub enum DownstreamServiceError {
    #[error("Failed to launch tool server `{program}`: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Tool server transport error: {0}")]
    Transport(#[from] std::io::Error),

    #[error("Tool server exited with {0}")]
    Exited(ExitStatus),
}

// ============================================================================
// LAUNCHER TRAIT (PORT)
// ============================================================================

/// Starts a tool server and keeps it connected until it finishes.
#[async_trait]
pub trait ToolServerLauncher: Send + Sync {
    /// Runs the server described by `launch` to completion.
    ///
    /// Returns the exit status of a server that exited cleanly; anything else
    /// is a `DownstreamServiceError`.
    async fn serve(&self, launch: &ToolServerLaunch) -> Result<ExitStatus, DownstreamServiceError>;
}

// ============================================================================
// SERVICE
// ============================================================================

pub struct ToolServerService<L: ToolServerLauncher> {
    launcher: L,
    command: ToolServerCommand,
}

impl<L: ToolServerLauncher> ToolServerService<L> {
    pub fn new(launcher: L, command: ToolServerCommand) -> Self {
        Self { launcher, command }
    }

    /// Builds the launch for `config` and runs the tool server with it.
    ///
    /// Taking a `RuntimeConfig` means the server can only start after a
    /// successful bootstrap.
    pub async fn run(&self, config: &RuntimeConfig) -> Result<(), DownstreamServiceError> {
        let launch = ToolServerLaunch::new(config, self.command.clone());

        tracing::info!(
            command = %launch.command.display(),
            drive_folder_id = %config.drive_folder_id(),
            "Starting tool server"
        );

        match self.launcher.serve(&launch).await {
            Ok(status) => {
                tracing::info!("Tool server finished ({})", status);
                Ok(())
            }
            Err(e) => {
                tracing::error!("Tool server failed: {}", e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::bootstrap::bootstrap_models::{
        DRIVE_FOLDER_ID_KEY, MODEL_API_KEY_KEY, SERVICE_ACCOUNT_PATH_KEY,
    };
    use crate::core::bootstrap::BootstrapConfigurator;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use tempfile::NamedTempFile;

    /// Records what it was asked to launch and pretends the server exited.
    struct RecordingLauncher {
        launches: Mutex<Vec<ToolServerLaunch>>,
        fail: bool,
    }

    impl RecordingLauncher {
        fn new(fail: bool) -> Self {
            Self {
                launches: Mutex::new(Vec::new()),
                fail,
            }
        }
    }

    #[async_trait]
    impl ToolServerLauncher for RecordingLauncher {
        async fn serve(
            &self,
            launch: &ToolServerLaunch,
        ) -> Result<ExitStatus, DownstreamServiceError> {
            self.launches.lock().unwrap().push(launch.clone());
            if self.fail {
                return Err(DownstreamServiceError::Launch {
                    program: launch.command.program.clone(),
                    source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such program"),
                });
            }
            Ok(success_status())
        }
    }

    #[cfg(unix)]
    fn success_status() -> ExitStatus {
        use std::os::unix::process::ExitStatusExt;
        ExitStatus::from_raw(0)
    }

    #[cfg(windows)]
    fn success_status() -> ExitStatus {
        use std::os::windows::process::ExitStatusExt;
        ExitStatus::from_raw(0)
    }

    fn config(key: &NamedTempFile) -> RuntimeConfig {
        let source: HashMap<String, String> = [
            (SERVICE_ACCOUNT_PATH_KEY, key.path().to_str().unwrap()),
            (DRIVE_FOLDER_ID_KEY, "abc123"),
            (MODEL_API_KEY_KEY, "sk-test"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        BootstrapConfigurator::new(source).resolve().unwrap()
    }

    #[tokio::test]
    async fn test_launch_carries_drive_scope_but_not_model_key() {
        let key = NamedTempFile::new().unwrap();
        let config = config(&key);
        let service =
            ToolServerService::new(RecordingLauncher::new(false), ToolServerCommand::default());

        service.run(&config).await.unwrap();

        let launches = service.launcher.launches.lock().unwrap();
        assert_eq!(launches.len(), 1);
        let launch = &launches[0];
        assert_eq!(launch.command, ToolServerCommand::default());
        assert_eq!(
            launch.env,
            vec![
                (
                    SERVICE_ACCOUNT_PATH_KEY.to_string(),
                    key.path().to_str().unwrap().to_string()
                ),
                (DRIVE_FOLDER_ID_KEY.to_string(), "abc123".to_string()),
            ]
        );
        assert!(launch.env.iter().all(|(_, value)| value != "sk-test"));
    }

    #[tokio::test]
    async fn test_launcher_failure_is_passed_through() {
        let key = NamedTempFile::new().unwrap();
        let config = config(&key);
        let service = ToolServerService::new(
            RecordingLauncher::new(true),
            ToolServerCommand::new("missing-tool-server", vec![]),
        );

        let err = service.run(&config).await.unwrap_err();
        match err {
            DownstreamServiceError::Launch { program, .. } => {
                assert_eq!(program, "missing-tool-server")
            }
            other => panic!("expected Launch error, got {:?}", other),
        }
    }
}
