// SPDX-FileCopyrightText: 2026 Vitrine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions for Vitrine's external collaborators.
//!
//! The engine depends on nothing beyond these narrow contracts; the real
//! transport and fallback responder are adapters implementing them.

pub mod channel;
pub mod responder;

pub use channel::ChannelAdapter;
pub use responder::FallbackResponder;
