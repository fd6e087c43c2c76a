// SPDX-FileCopyrightText: 2026 Vitrine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fallback responder adapters.
//!
//! The dialog engine holds a [`vitrine_core::FallbackResponder`]; this crate
//! provides the two implementations: [`GeminiResponder`] for the external
//! text-generation API and [`CannedResponder`] for keyless setups.

pub mod canned;
pub mod gemini;

pub use canned::CannedResponder;
pub use gemini::GeminiResponder;

use std::sync::Arc;

use vitrine_config::model::ResponderConfig;
use vitrine_core::FallbackResponder;

/// Picks the responder implied by the config: the external client when an
/// API key is present, the local canned table otherwise.
pub fn from_config(config: &ResponderConfig) -> Arc<dyn FallbackResponder> {
    if config.api_key.is_some() {
        match GeminiResponder::new(config) {
            Ok(responder) => return Arc::new(responder),
            Err(e) => {
                tracing::warn!(error = %e, "responder client unavailable, using canned replies");
            }
        }
    }
    Arc::new(CannedResponder::new())
}
