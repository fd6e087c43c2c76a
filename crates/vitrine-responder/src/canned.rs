// SPDX-FileCopyrightText: 2026 Vitrine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deterministic local responder used when no API key is configured.
//!
//! Answers from a small keyword table so development setups work offline
//! and tests stay reproducible.

use async_trait::async_trait;

use vitrine_core::{FallbackResponder, VitrineError};

/// Keyword-table responder. Pure: same input, same reply.
#[derive(Debug, Clone, Copy, Default)]
pub struct CannedResponder;

impl CannedResponder {
    pub fn new() -> Self {
        Self
    }

    fn reply_for(text: &str, name: &str) -> String {
        let lower = text.trim().to_lowercase();

        if lower.contains("orçamento") || lower.contains("orcamento") {
            return format!(
                "Perfeito {name}! Vamos criar um orçamento personalizado para você. 🚀\n\n\
                 Por favor, me diga:\n\
                 1. Qual tipo de projeto você precisa?\n\
                 2. Tem algum prazo específico?\n\
                 3. Orçamento aproximado?"
            );
        }

        match lower.as_str() {
            "oi" => format!("Olá {name}! 😊 Como posso ajudar você hoje?"),
            "ola" | "olá" => format!("Olá {name}! 😊 Em que posso ser útil?"),
            "obrigado" => format!("De nada {name}! Fico feliz em ajudar! 🚀"),
            "obrigada" => format!("Por nada {name}! Estou aqui para o que precisar! 💫"),
            _ => format!(
                "Olá {name}! Sou seu assistente virtual. Posso ajudar com:\n\n\
                 🛒 Orçamento de templates\n\
                 📅 Agendamento de atendimento\n\
                 💬 Dúvidas sobre serviços\n\n\
                 Digite \"orçamento\" para começarmos!"
            ),
        }
    }
}

#[async_trait]
impl FallbackResponder for CannedResponder {
    async fn respond(&self, text: &str, display_name: &str) -> Result<String, VitrineError> {
        Ok(Self::reply_for(text, display_name))
    }
}
