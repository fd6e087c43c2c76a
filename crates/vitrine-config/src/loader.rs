// SPDX-FileCopyrightText: 2026 Vitrine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./vitrine.toml` > `~/.config/vitrine/vitrine.toml`
//! > `/etc/vitrine/vitrine.toml` with environment variable overrides via the
//! `VITRINE_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::VitrineConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/vitrine/vitrine.toml` (system-wide)
/// 3. `~/.config/vitrine/vitrine.toml` (user XDG config)
/// 4. `./vitrine.toml` (local directory)
/// 5. `VITRINE_*` environment variables
pub fn load_config() -> Result<VitrineConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(VitrineConfig::default()))
        .merge(Toml::file("/etc/vitrine/vitrine.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("vitrine/vitrine.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("vitrine.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<VitrineConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(VitrineConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<VitrineConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(VitrineConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `VITRINE_STORAGE_DATABASE_PATH` must
/// map to `storage.database_path`, not `storage.database.path`.
fn env_provider() -> Env {
    Env::prefixed("VITRINE_").map(|key| {
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("agent_", "agent.", 1)
            .replacen("server_", "server.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("merchant_", "merchant.", 1)
            .replacen("responder_", "responder.", 1)
            .replacen("transport_", "transport.", 1);
        mapped.into()
    })
}
