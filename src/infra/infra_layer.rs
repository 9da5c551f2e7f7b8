// The infra module talks to the outside world: the process environment, the
// service account key on disk, and the tool server child process.

#[path = "config/mod.rs"]
pub mod config;

#[path = "tool_server/mod.rs"]
pub mod tool_server;
