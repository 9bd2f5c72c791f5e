//! Startup compatibility gate for game-server plugins.
//!
//! Before a plugin activates, the gate verifies that the server platform,
//! the host runtime, and the plugin's own release metadata all satisfy the
//! configured version bounds, and tells the host whether startup may
//! proceed. A failing gate means the host must abort its own activation.

pub mod core;
pub mod utils;

pub use crate::core::environment::{ReleaseInfo, VersionSource};
pub use crate::core::gate::{CompatGate, GateOutcome};
pub use crate::core::messages::{ConsoleSink, LogSink, Message, RecordingSink};
pub use crate::core::version::{is_newer, Version};
pub use crate::utils::config::GateConfig;
pub use crate::utils::error::{GateError, Result};
