// SPDX-FileCopyrightText: 2026 Vitrine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outbound message rendering.
//!
//! All user-facing texts live here so the router stays free of formatting
//! concerns. Texts use the transport's lightweight markdown (asterisks for
//! bold) and Brazilian Portuguese throughout.

use chrono::DateTime;
use vitrine_catalog::Template;
use vitrine_core::types::reference_timezone;
use vitrine_pix::PixCode;
use vitrine_schedule::TimeSlot;
use vitrine_storage::ScheduleRecord;

/// How many catalog entries the listing shows before asking for a number.
const CATALOG_PREVIEW: usize = 8;
/// Description prefix length in the catalog listing.
const DESCRIPTION_PREVIEW: usize = 60;

pub fn quote_greeting(name: &str) -> String {
    format!(
        "Olá {name}, agradeço por você ter entrado em contato conosco 😊. \
         Para o nosso orçamento você deve escolher uma das opções abaixo:"
    )
}

pub fn quote_options() -> String {
    "💎 *ESCOLHA UMA OPÇÃO:*\n\n\
     🎨 *1. ESCOLHER UM MODELO DE SITE*\n\
     👨‍💼 *2. FALAR COM ATENDIMENTO HUMANO*\n\
     💬 *3. DESCREVER MEU PROJETO*"
        .to_string()
}

pub fn welcome(name: &str) -> String {
    format!(
        "👋 Olá {name}! Seja bem-vindo(a)! 😊\n\n\
         Sou seu assistente virtual e posso ajudar você com:\n\n\
         🎨 *Orçamento de sites e templates*\n\
         📅 *Agendamento de atendimento*\n\
         💬 *Tirar dúvidas sobre nossos serviços*\n\n\
         Digite *\"orçamento\"* para começarmos!"
    )
}

pub fn project_prompt() -> String {
    "📝 Por favor, descreva brevemente seu projeto que entraremos em contato \
     para um orçamento personalizado!"
        .to_string()
}

pub fn project_prompt_detailed() -> String {
    "📝 Perfeito! Por favor, descreva brevemente seu projeto:\n\n\
     • Tipo de site necessário\n\
     • Funcionalidades desejadas\n\
     • Prazo estimado\n\n\
     Enviaremos um orçamento personalizado! 🚀"
        .to_string()
}

pub fn budget_invalid() -> String {
    "❌ Por favor, escolha uma opção válida:\n\n\
     1 - Escolher modelo de site\n\
     2 - Atendimento humano\n\
     3 - Descrever meu projeto"
        .to_string()
}

pub fn catalog_intro() -> String {
    "Entendi! Olhe a lista abaixo e escolha uma das opções:".to_string()
}

pub fn catalog(templates: &[Template]) -> String {
    let mut message = format!(
        "🎨 *CATÁLOGO DE TEMPLATES* - {} modelos disponíveis\n\n",
        templates.len()
    );

    for template in templates.iter().take(CATALOG_PREVIEW) {
        let preview: String = template.description.chars().take(DESCRIPTION_PREVIEW).collect();
        message.push_str(&format!("*{}.* 🏷️ {}\n", template.id, template.name));
        message.push_str(&format!(
            "   💵 R$ {} | 📦 {}\n",
            template.price, template.delivery
        ));
        message.push_str(&format!("   📝 {preview}...\n"));
        message.push_str(&format!(
            "   🏷️ {} | ⭐ {}\n\n",
            template.category,
            template.features.iter().take(2).copied().collect::<Vec<_>>().join(", ")
        ));
    }

    message.push_str("📋 *INSTRUÇÕES:*\n");
    message.push_str("Digite o *NÚMERO* do template que gostou para ver detalhes\n");
    message.push_str("Ou digite *voltar* para o menu principal");
    message
}

pub fn template_not_found() -> String {
    "❌ Template não encontrado. Digite o número correto ou *voltar* para o menu."
        .to_string()
}

pub fn template_details(template: &Template) -> String {
    let features = template
        .features
        .iter()
        .map(|f| format!("✅ {f}"))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "🎯 *{} - DETALHES COMPLETOS*\n\n\
         📝 {}\n\n\
         💰 *Investimento:* R$ {}\n\
         📦 *Entrega:* {}\n\
         🏷️ *Categoria:* {}\n\n\
         ⭐ *INCLUI:*\n{}\n\n\
         💎 *PRÓXIMOS PASSOS:*\n\
         1️⃣ - *PAGAR AGORA* e iniciar projeto imediatamente\n\
         2️⃣ - *AGENDAR ATENDIMENTO* para tirar dúvidas\n\
         3️⃣ - *VER MAIS TEMPLATES*\n\
         4️⃣ - *VOLTAR* ao menu principal",
        template.name,
        template.description,
        template.price,
        template.delivery,
        template.category,
        features,
    )
}

pub fn payment_invalid() -> String {
    "❌ Por favor, escolha uma opção válida (1, 2, 3 ou 4).".to_string()
}

pub fn pix_message(template: &Template, code: &PixCode) -> String {
    format!(
        "💎 *PAGAMENTO VIA PIX* 💎\n\n\
         🛒 *Produto:* {}\n\
         💵 *Valor:* R$ {}\n\n\
         📱 *PIX COPIA E COLA:*\n\
         {}\n\n\
         ⚠️ *INSTRUÇÕES:*\n\
         1. Copie o código acima e pague no aplicativo do seu banco\n\
         2. Envie o comprovante para confirmarmos\n\
         3. Iniciaremos seu projeto imediatamente!\n\n\
         🚀 *Após o pagamento, seu site estará pronto em {}!*",
        template.name, template.price, code.payload, template.delivery,
    )
}

pub fn schedule_list(slots: &[TimeSlot]) -> String {
    let mut message = "📅 *AGENDAMENTO DE ATENDIMENTO*\n\n\
         Escolha um horário disponível para nosso atendimento:\n\n"
        .to_string();

    for (index, slot) in slots.iter().enumerate() {
        message.push_str(&format!("{}. 🕐 {}\n", index + 1, slot));
    }

    message.push_str("\n💡 *INSTRUÇÕES:*\n");
    message.push_str("Digite o *NÚMERO* do horário desejado\n");
    message.push_str("Ou digite *voltar* para o menu principal");
    message
}

pub fn slot_invalid() -> String {
    "❌ Horário inválido. Escolha um número da lista ou digite *voltar*.".to_string()
}

pub fn schedule_confirmation(record: &ScheduleRecord) -> String {
    format!(
        "✅ *AGENDAMENTO CONFIRMADO!*\n\n\
         👤 *Cliente:* {}\n\
         📅 *Data:* {}\n\
         ⏰ *Horário:* {}\n\n\
         💡 *INFORMAÇÕES IMPORTANTES:*\n\
         • Estaremos disponíveis no horário agendado\n\
         • Você receberá uma lembrança 1 hora antes\n\
         • Para reagendar ou cancelar, entre em contato\n\n\
         Obrigado por confiar em nosso trabalho! 🚀",
        record.name,
        format_date_br(&record.scheduled_for),
        record.slot,
    )
}

pub fn back_to_menu() -> String {
    "Voltando ao menu principal...".to_string()
}

/// Fixed local reply substituted when the fallback responder errors out.
pub fn responder_unavailable(name: &str) -> String {
    format!(
        "Olá {name}! No momento estou com limitações técnicas. \
         Por favor, use os comandos:\n\n\
         \"orçamento\" - Para solicitar orçamento\n\
         \"atendimento\" - Para agendar horário"
    )
}

pub fn processing_error() -> String {
    "❌ Ocorreu um erro. Tente novamente.".to_string()
}

/// Renders an RFC 3339 instant as dd/mm/yyyy in the reference timezone.
fn format_date_br(rfc3339: &str) -> String {
    DateTime::parse_from_rfc3339(rfc3339)
        .map(|at| {
            at.with_timezone(&reference_timezone())
                .format("%d/%m/%Y")
                .to_string()
        })
        .unwrap_or_else(|_| rfc3339.to_string())
}
