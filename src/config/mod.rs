//! Tool Configuration Module
//!
//! Units, input table layouts, survey processing options and output settings
//! loaded from TOML.
//!
//! ## Loading Order
//!
//! 1. `BOREHOLE_TOOLS_CONFIG` environment variable (path to TOML file)
//! 2. `borehole_tools.toml` in the current working directory
//! 3. Built-in defaults
//!
//! Command-line flags are applied on top by the binary.
//!
//! ## Usage
//!
//! ```ignore
//! // In main():
//! config::init(ToolConfig::load());
//!
//! // Later in the binary:
//! let interval = config::get().survey.interval;
//! ```
//!
//! Library code never calls `get()`; it takes the values it needs as
//! parameters.

mod tool_config;
pub mod defaults;
pub mod validation;

pub use tool_config::*;

use std::sync::OnceLock;

/// Global tool configuration, initialized once at startup.
static TOOL_CONFIG: OnceLock<ToolConfig> = OnceLock::new();

/// Initialize the global tool configuration.
///
/// A second call is ignored with a warning.
pub fn init(config: ToolConfig) {
    if TOOL_CONFIG.set(config).is_err() {
        tracing::warn!("config::init() called more than once, ignoring");
    }
}

/// Get a reference to the global tool configuration.
///
/// Falls back to the built-in defaults when `init()` has not been called.
pub fn get() -> &'static ToolConfig {
    TOOL_CONFIG.get_or_init(|| {
        tracing::warn!("config::get() called before config::init(), using defaults");
        ToolConfig::default()
    })
}

/// Check whether the config has been initialized.
pub fn is_initialized() -> bool {
    TOOL_CONFIG.get().is_some()
}
