// SPDX-FileCopyrightText: 2026 Vitrine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the Vitrine conversation engine.
//!
//! Provides TOML configuration parsing with strict validation
//! (`deny_unknown_fields`), XDG file hierarchy lookup, and environment
//! variable overrides.

pub mod loader;
pub mod model;

pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::VitrineConfig;

use vitrine_core::VitrineError;

/// Load configuration from the XDG hierarchy and surface errors as
/// [`VitrineError::Config`].
pub fn load() -> Result<VitrineConfig, VitrineError> {
    loader::load_config().map_err(|e| VitrineError::Config(e.to_string()))
}
