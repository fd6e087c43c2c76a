// SPDX-FileCopyrightText: 2026 Vitrine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-state input classification.
//!
//! Each state owns an ordered rule list evaluated top to bottom; the first
//! matching rule wins. All matching runs over a single shared normalization
//! of the raw input (trim + lowercase).

/// Shared preprocessing applied before any rule runs.
pub fn normalize(input: &str) -> String {
    input.trim().to_lowercase()
}

/// How a keyword matches the normalized input.
#[derive(Debug, Clone, Copy)]
enum Pattern {
    /// The whole input equals the keyword.
    Exact(&'static str),
    /// The input contains the keyword anywhere.
    Contains(&'static str),
}

impl Pattern {
    fn matches(self, input: &str) -> bool {
        match self {
            Pattern::Exact(word) => input == word,
            Pattern::Contains(word) => input.contains(word),
        }
    }
}

struct Rule<I: Copy> {
    patterns: &'static [Pattern],
    intent: I,
}

fn first_match<I: Copy>(rules: &[Rule<I>], input: &str, fallback: I) -> I {
    rules
        .iter()
        .find(|rule| rule.patterns.iter().any(|p| p.matches(input)))
        .map(|rule| rule.intent)
        .unwrap_or(fallback)
}

/// What the participant asked for from the top-level menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuIntent {
    Quote,
    Catalog,
    Schedule,
    Project,
    Greeting,
    Fallback,
}

const MENU_RULES: &[Rule<MenuIntent>] = &[
    Rule {
        patterns: &[Pattern::Contains("orçamento"), Pattern::Contains("orcamento")],
        intent: MenuIntent::Quote,
    },
    Rule {
        patterns: &[
            Pattern::Exact("1"),
            Pattern::Contains("template"),
            Pattern::Contains("modelo"),
        ],
        intent: MenuIntent::Catalog,
    },
    Rule {
        patterns: &[
            Pattern::Exact("2"),
            Pattern::Contains("atendimento"),
            Pattern::Contains("humano"),
        ],
        intent: MenuIntent::Schedule,
    },
    Rule {
        patterns: &[Pattern::Exact("3"), Pattern::Contains("projeto")],
        intent: MenuIntent::Project,
    },
    Rule {
        patterns: &[
            Pattern::Contains("olá"),
            Pattern::Contains("ola"),
            Pattern::Exact("oi"),
        ],
        intent: MenuIntent::Greeting,
    },
];

pub fn classify_menu(input: &str) -> MenuIntent {
    first_match(MENU_RULES, input, MenuIntent::Fallback)
}

/// Choice made on the three-option quote menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetIntent {
    Catalog,
    Schedule,
    Project,
    Invalid,
}

const BUDGET_RULES: &[Rule<BudgetIntent>] = &[
    Rule {
        patterns: &[
            Pattern::Contains("1"),
            Pattern::Contains("escolher"),
            Pattern::Contains("modelo"),
        ],
        intent: BudgetIntent::Catalog,
    },
    Rule {
        patterns: &[
            Pattern::Contains("2"),
            Pattern::Contains("atendimento"),
            Pattern::Contains("humano"),
        ],
        intent: BudgetIntent::Schedule,
    },
    Rule {
        patterns: &[
            Pattern::Contains("3"),
            Pattern::Contains("projeto"),
            Pattern::Contains("descrever"),
        ],
        intent: BudgetIntent::Project,
    },
];

pub fn classify_budget(input: &str) -> BudgetIntent {
    first_match(BUDGET_RULES, input, BudgetIntent::Invalid)
}

/// Choice made while the catalog is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateIntent {
    Back,
    Select(u32),
    Invalid,
}

pub fn classify_template_selection(input: &str) -> TemplateIntent {
    // "voltar"/"0" take priority over numeric parsing.
    if input == "voltar" || input == "0" {
        return TemplateIntent::Back;
    }
    match input.parse::<u32>() {
        Ok(id) => TemplateIntent::Select(id),
        Err(_) => TemplateIntent::Invalid,
    }
}

/// Choice made on the four-option payment prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentIntent {
    Pay,
    Schedule,
    Catalog,
    Back,
    Invalid,
}

const PAYMENT_RULES: &[Rule<PaymentIntent>] = &[
    Rule {
        patterns: &[
            Pattern::Contains("1"),
            Pattern::Contains("pagar"),
            Pattern::Contains("comprar"),
        ],
        intent: PaymentIntent::Pay,
    },
    Rule {
        patterns: &[
            Pattern::Contains("2"),
            Pattern::Contains("agendar"),
            Pattern::Contains("atendimento"),
        ],
        intent: PaymentIntent::Schedule,
    },
    Rule {
        patterns: &[
            Pattern::Contains("3"),
            Pattern::Contains("mais"),
            Pattern::Contains("templates"),
        ],
        intent: PaymentIntent::Catalog,
    },
    Rule {
        patterns: &[Pattern::Contains("4"), Pattern::Contains("voltar")],
        intent: PaymentIntent::Back,
    },
];

pub fn classify_payment(input: &str) -> PaymentIntent {
    first_match(PAYMENT_RULES, input, PaymentIntent::Invalid)
}

/// Choice made while the slot list is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotIntent {
    Back,
    Select(usize),
    Invalid,
}

pub fn classify_slot_selection(input: &str) -> SlotIntent {
    if input == "voltar" || input == "0" {
        return SlotIntent::Back;
    }
    match input.parse::<usize>() {
        Ok(index) => SlotIntent::Select(index),
        Err(_) => SlotIntent::Invalid,
    }
}
