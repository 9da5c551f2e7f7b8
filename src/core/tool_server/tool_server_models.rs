use crate::core::bootstrap::bootstrap_models::{DRIVE_FOLDER_ID_KEY, SERVICE_ACCOUNT_PATH_KEY};
use crate::core::bootstrap::config_source::{non_blank, ConfigSource};
use crate::core::bootstrap::RuntimeConfig;

pub const TOOL_SERVER_COMMAND_KEY: &str = "TOOL_SERVER_COMMAND";
pub const TOOL_SERVER_ARGS_KEY: &str = "TOOL_SERVER_ARGS";

const DEFAULT_PROGRAM: &str = "uvx";
const DEFAULT_ARGS: &[&str] = &["mcp-google-sheets@latest"];

/// Program and arguments used to start the Google Sheets tool server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolServerCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl ToolServerCommand {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Reads `TOOL_SERVER_COMMAND` / `TOOL_SERVER_ARGS`, falling back to
    /// `uvx mcp-google-sheets@latest`. Blank values count as unset.
    /// Arguments are split on whitespace, so none of them can contain a space.
    ///
    /// Overriding only the args keeps the default program, but overriding the
    /// program drops the default args.
    pub fn from_source(source: &impl ConfigSource) -> Self {
        let custom_program = non_blank(source, TOOL_SERVER_COMMAND_KEY);
        let custom_args = non_blank(source, TOOL_SERVER_ARGS_KEY)
            .map(|raw| raw.split_whitespace().map(str::to_string).collect());

        match (custom_program, custom_args) {
            (None, None) => Self::default(),
            (None, Some(args)) => Self::new(DEFAULT_PROGRAM, args),
            (Some(program), args) => Self::new(program, args.unwrap_or_default()),
        }
    }

    /// Shell-ish rendering for log lines.
    pub fn display(&self) -> String {
        if self.args.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, self.args.join(" "))
        }
    }
}

impl Default for ToolServerCommand {
    fn default() -> Self {
        Self::new(
            DEFAULT_PROGRAM,
            DEFAULT_ARGS.iter().map(|a| a.to_string()).collect(),
        )
    }
}

/// Everything needed to start one tool server process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolServerLaunch {
    pub command: ToolServerCommand,
    /// Extra environment for the child, in the order it is applied.
    pub env: Vec<(String, String)>,
}

impl ToolServerLaunch {
    /// The tool server gets the key path and folder scope. The model key
    /// stays with the host.
    pub fn new(config: &RuntimeConfig, command: ToolServerCommand) -> Self {
        Self {
            command,
            env: vec![
                (
                    SERVICE_ACCOUNT_PATH_KEY.to_string(),
                    config.service_account_path().to_string_lossy().into_owned(),
                ),
                (
                    DRIVE_FOLDER_ID_KEY.to_string(),
                    config.drive_folder_id().to_string(),
                ),
            ],
        }
    }
}
