// The core module holds the start-up rules and the tool server hand-off.
// Nothing in here touches the process environment or spawns processes;
// the infra layer provides those pieces.

#[path = "bootstrap/mod.rs"]
pub mod bootstrap;

#[path = "tool_server/mod.rs"]
pub mod tool_server;

#[path = "app/app_error.rs"]
pub mod app_error;

pub use app_error::AppError;
