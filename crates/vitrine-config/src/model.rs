// SPDX-FileCopyrightText: 2026 Vitrine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Vitrine conversation engine.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup.

use serde::{Deserialize, Serialize};

/// Top-level Vitrine configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct VitrineConfig {
    /// Engine identity and logging settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// HTTP server settings (dashboard read API + transport webhook).
    #[serde(default)]
    pub server: ServerConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Merchant identity used by the payment-code encoder.
    #[serde(default)]
    pub merchant: MerchantConfig,

    /// External fallback responder settings.
    #[serde(default)]
    pub responder: ResponderConfig,

    /// Messaging bridge transport settings.
    #[serde(default)]
    pub transport: TransportConfig,
}

/// Engine identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Label used when the transport cannot resolve a display name.
    #[serde(default = "default_fallback_name")]
    pub fallback_name: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            fallback_name: default_fallback_name(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_fallback_name() -> String {
    "Cliente".to_string()
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("vitrine").join("vitrine.db"))
        .and_then(|p| p.to_str().map(String::from))
        .unwrap_or_else(|| "vitrine.db".to_string())
}

/// Merchant identity embedded in generated payment codes.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MerchantConfig {
    /// Merchant display name (EMV tag 59).
    #[serde(default = "default_merchant_name")]
    pub name: String,

    /// Merchant city (EMV tag 60).
    #[serde(default = "default_merchant_city")]
    pub city: String,

    /// PIX key (CPF/CNPJ, phone, or random key) the code pays into.
    #[serde(default = "default_pix_key")]
    pub pix_key: String,
}

impl Default for MerchantConfig {
    fn default() -> Self {
        Self {
            name: default_merchant_name(),
            city: default_merchant_city(),
            pix_key: default_pix_key(),
        }
    }
}

fn default_merchant_name() -> String {
    "Vitor".to_string()
}

fn default_merchant_city() -> String {
    "Sao Paulo".to_string()
}

fn default_pix_key() -> String {
    "16997454758".to_string()
}

/// External fallback responder configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ResponderConfig {
    /// API key for the text-generation service. `None` selects the local
    /// canned responder.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Base URL of the text-generation API.
    #[serde(default = "default_responder_base_url")]
    pub base_url: String,

    /// Upper bound on a single responder call, in seconds.
    #[serde(default = "default_responder_timeout")]
    pub timeout_secs: u64,
}

impl Default for ResponderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_responder_base_url(),
            timeout_secs: default_responder_timeout(),
        }
    }
}

fn default_responder_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_responder_timeout() -> u64 {
    8
}

/// Messaging bridge transport configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TransportConfig {
    /// Base URL of the external messaging bridge. `None` leaves the
    /// transport disconnected; the read API still serves.
    #[serde(default)]
    pub bridge_url: Option<String>,
}
