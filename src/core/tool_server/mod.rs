pub mod tool_server_models;
pub mod tool_server_service;

pub use tool_server_models::{ToolServerCommand, ToolServerLaunch};
pub use tool_server_service::{DownstreamServiceError, ToolServerLauncher, ToolServerService};
