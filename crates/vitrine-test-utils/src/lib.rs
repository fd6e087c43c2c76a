// SPDX-FileCopyrightText: 2026 Vitrine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared mock adapters for deterministic Vitrine tests.

pub mod mock_channel;
pub mod mock_responder;

pub use mock_channel::MockChannel;
pub use mock_responder::MockResponder;
