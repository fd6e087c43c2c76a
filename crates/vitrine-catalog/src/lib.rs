// SPDX-FileCopyrightText: 2026 Vitrine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Static product catalog.
//!
//! The listing is generated once, by a pure function of the template id, so
//! every call observes byte-identical data. Prices are strictly increasing
//! in the id and categories cycle with period 4.

use std::sync::LazyLock;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use strum::Display;

/// Number of templates in the catalog. Ids are dense `1..=TEMPLATE_COUNT`.
pub const TEMPLATE_COUNT: u32 = 40;

const PRICE_BASE: Decimal = dec!(50.00);
const PRICE_STEP: Decimal = dec!(50.00);

const FEATURES: [&str; 3] = ["Design Responsivo", "Otimizado SEO", "Suporte 30 dias"];
const DELIVERY: &str = "3-5 dias úteis";

/// Site category a template belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
pub enum Category {
    #[strum(serialize = "E-commerce")]
    #[serde(rename = "E-commerce")]
    Ecommerce,
    #[strum(serialize = "Landing Page")]
    #[serde(rename = "Landing Page")]
    LandingPage,
    Blog,
    #[strum(serialize = "Institucional")]
    #[serde(rename = "Institucional")]
    Institutional,
}

const CATEGORY_CYCLE: [Category; 4] = [
    Category::Ecommerce,
    Category::LandingPage,
    Category::Blog,
    Category::Institutional,
];

/// A sellable site template.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Template {
    pub id: u32,
    pub name: String,
    pub description: String,
    /// Price in BRL with two decimal places.
    pub price: Decimal,
    pub category: Category,
    /// Ordered feature list shown in catalog and detail views.
    pub features: Vec<&'static str>,
    /// Delivery estimate band.
    pub delivery: &'static str,
}

static CATALOG: LazyLock<Vec<Template>> =
    LazyLock::new(|| (1..=TEMPLATE_COUNT).map(build_template).collect());

fn build_template(id: u32) -> Template {
    Template {
        id,
        name: format!("Template {id}"),
        description: format!(
            "Descrição detalhada do template {id} com design moderno e responsivo"
        ),
        price: PRICE_BASE + PRICE_STEP * Decimal::from(id),
        category: CATEGORY_CYCLE[((id - 1) % 4) as usize],
        features: FEATURES.to_vec(),
        delivery: DELIVERY,
    }
}

/// The full ordered template listing.
pub fn templates() -> &'static [Template] {
    &CATALOG
}

/// Look up a template by id.
pub fn find(id: u32) -> Option<&'static Template> {
    if id == 0 {
        return None;
    }
    CATALOG.get((id - 1) as usize)
}
