pub mod stdio_bridge;

pub use stdio_bridge::StdioBridge;
