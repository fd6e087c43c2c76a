// SPDX-FileCopyrightText: 2026 Vitrine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deterministic PIX payment-code encoder.
//!
//! Builds an EMV merchant-presented (MPM) "copia e cola" payload: a flat
//! sequence of type-length-value fields closed by a CRC-16/CCITT-FALSE
//! checksum. Encoding is pure — identical inputs always produce an
//! identical payload, and every declared TLV length matches its value.

mod crc;

pub use crc::crc16;

use rust_decimal::Decimal;

const TAG_PAYLOAD_FORMAT: &str = "00";
const TAG_MERCHANT_ACCOUNT: &str = "26";
const TAG_CATEGORY_CODE: &str = "52";
const TAG_CURRENCY: &str = "53";
const TAG_AMOUNT: &str = "54";
const TAG_COUNTRY: &str = "58";
const TAG_MERCHANT_NAME: &str = "59";
const TAG_MERCHANT_CITY: &str = "60";
const TAG_ADDITIONAL_DATA: &str = "62";
const TAG_CRC: &str = "63";

const SUB_GUI: &str = "00";
const SUB_KEY: &str = "01";
const SUB_REFERENCE: &str = "05";

/// Scheme identifier carried in the merchant account info field.
const PIX_GUI: &str = "br.gov.bcb.pix";

const MAX_NAME_LEN: usize = 25;
const MAX_CITY_LEN: usize = 15;
const MAX_REFERENCE_LEN: usize = 25;

/// Merchant identity embedded in every generated code.
#[derive(Debug, Clone)]
pub struct Merchant {
    /// Beneficiary display name (EMV tag 59).
    pub name: String,
    /// Merchant city (EMV tag 60).
    pub city: String,
    /// PIX key the code pays into (CPF/CNPJ, phone, or random key).
    pub key: String,
}

/// A generated payment code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixCode {
    /// Full scannable payload, checksum included.
    pub payload: String,
    /// The four uppercase hex digits of the trailing CRC field.
    pub checksum: String,
}

/// Encoder bound to a merchant identity.
#[derive(Debug, Clone)]
pub struct PixEncoder {
    merchant: Merchant,
}

impl PixEncoder {
    pub fn new(merchant: Merchant) -> Self {
        Self { merchant }
    }

    /// Encodes a payment of `amount` BRL with a free-text `reference`
    /// (surfaced to the payer as the transaction identification).
    pub fn encode(&self, amount: Decimal, reference: &str) -> PixCode {
        let mut amount = amount;
        amount.rescale(2);

        let account = [
            field(SUB_GUI, PIX_GUI),
            field(SUB_KEY, &self.merchant.key),
        ]
        .concat();
        let additional = field(SUB_REFERENCE, &sanitize_reference(reference));

        let mut payload = String::new();
        payload.push_str(&field(TAG_PAYLOAD_FORMAT, "01"));
        payload.push_str(&field(TAG_MERCHANT_ACCOUNT, &account));
        payload.push_str(&field(TAG_CATEGORY_CODE, "0000"));
        payload.push_str(&field(TAG_CURRENCY, "986"));
        payload.push_str(&field(TAG_AMOUNT, &amount.to_string()));
        payload.push_str(&field(TAG_COUNTRY, "BR"));
        payload.push_str(&field(
            TAG_MERCHANT_NAME,
            &sanitize_text(&self.merchant.name, MAX_NAME_LEN),
        ));
        payload.push_str(&field(
            TAG_MERCHANT_CITY,
            &sanitize_text(&self.merchant.city, MAX_CITY_LEN),
        ));
        payload.push_str(&field(TAG_ADDITIONAL_DATA, &additional));

        // The checksum covers everything up to and including its own
        // id + length prefix.
        payload.push_str(TAG_CRC);
        payload.push_str("04");
        let checksum = format!("{:04X}", crc16(payload.as_bytes()));
        payload.push_str(&checksum);

        PixCode { payload, checksum }
    }
}

/// Renders one TLV field: two-digit id, two-digit value length, value.
fn field(id: &str, value: &str) -> String {
    debug_assert!(value.len() <= 99, "TLV value exceeds two-digit length");
    format!("{id}{:02}{value}", value.len())
}

/// Uppercases and restricts to the ASCII subset the EMV spec tolerates,
/// then truncates to `max` bytes.
fn sanitize_text(input: &str, max: usize) -> String {
    let cleaned: String = input
        .to_uppercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
        .collect();
    cleaned.trim().chars().take(max).collect()
}

/// Transaction references are alphanumeric only; an empty result falls back
/// to the scheme's "no reference" marker.
fn sanitize_reference(input: &str) -> String {
    let cleaned: String = input
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .take(MAX_REFERENCE_LEN)
        .collect();
    if cleaned.is_empty() {
        "***".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn encoder() -> PixEncoder {
        PixEncoder::new(Merchant {
            name: "Vitor".to_string(),
            city: "Sao Paulo".to_string(),
            key: "16997454758".to_string(),
        })
    }

    /// Walks a TLV payload asserting every declared length matches its value
    /// and the whole string is consumed. Returns the parsed (id, value) list.
    fn parse_tlv(payload: &str) -> Vec<(String, String)> {
        let mut fields = Vec::new();
        let mut rest = payload;
        while !rest.is_empty() {
            assert!(rest.len() >= 4, "truncated TLV header in {rest:?}");
            let id = &rest[..2];
            let len: usize = rest[2..4].parse().expect("numeric length prefix");
            assert!(rest.len() >= 4 + len, "declared length overruns payload");
            fields.push((id.to_string(), rest[4..4 + len].to_string()));
            rest = &rest[4 + len..];
        }
        fields
    }

    #[test]
    fn encoding_is_deterministic() {
        let a = encoder().encode(dec!(10.00), "Template 1");
        let b = encoder().encode(dec!(10.00), "Template 1");
        assert_eq!(a, b);
    }

    #[test]
    fn any_input_change_changes_the_payload() {
        let base = encoder().encode(dec!(10.00), "Template 1");

        let amount = encoder().encode(dec!(10.01), "Template 1");
        assert_ne!(base.payload, amount.payload);

        let reference = encoder().encode(dec!(10.00), "Template 2");
        assert_ne!(base.payload, reference.payload);

        let key = PixEncoder::new(Merchant {
            name: "Vitor".to_string(),
            city: "Sao Paulo".to_string(),
            key: "00000000000".to_string(),
        })
        .encode(dec!(10.00), "Template 1");
        assert_ne!(base.payload, key.payload);
    }

    #[test]
    fn every_tlv_length_is_consistent() {
        let code = encoder().encode(dec!(1250.00), "Template 25");
        let fields = parse_tlv(&code.payload);

        let ids: Vec<&str> = fields.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(
            ids,
            ["00", "26", "52", "53", "54", "58", "59", "60", "62", "63"]
        );

        // Nested merchant-account and additional-data templates are TLV too.
        let account = &fields[1].1;
        let subs = parse_tlv(account);
        assert_eq!(subs[0], ("00".to_string(), "br.gov.bcb.pix".to_string()));
        assert_eq!(subs[1], ("01".to_string(), "16997454758".to_string()));

        let additional = &fields[8].1;
        let subs = parse_tlv(additional);
        assert_eq!(subs[0], ("05".to_string(), "Template25".to_string()));
    }

    #[test]
    fn checksum_recomputes_over_payload_prefix() {
        let code = encoder().encode(dec!(10.00), "Template 1");
        // Everything except the checksum's own four-digit value.
        let covered = &code.payload[..code.payload.len() - 4];
        assert!(covered.ends_with("6304"));
        assert_eq!(format!("{:04X}", crc16(covered.as_bytes())), code.checksum);
        assert!(code.payload.ends_with(&code.checksum));
    }

    #[test]
    fn payload_carries_expected_static_fields() {
        let code = encoder().encode(dec!(10.00), "Template 1");
        assert!(code.payload.starts_with("000201"));
        assert!(code.payload.contains("br.gov.bcb.pix"));
        assert!(code.payload.contains("52040000"));
        assert!(code.payload.contains("5303986"));
        assert!(code.payload.contains("540510.00"));
        assert!(code.payload.contains("5802BR"));
        assert!(code.payload.contains("5905VITOR"));
        assert!(code.payload.contains("6009SAO PAULO"));
    }

    #[test]
    fn amount_always_renders_two_decimal_places() {
        let code = encoder().encode(dec!(100), "x");
        assert!(code.payload.contains("5406100.00"));
    }

    #[test]
    fn empty_reference_falls_back_to_marker() {
        let code = encoder().encode(dec!(10.00), "  !!  ");
        assert!(code.payload.contains("0503***"));
    }

    #[test]
    fn long_merchant_fields_are_truncated() {
        let code = PixEncoder::new(Merchant {
            name: "Um Nome De Loja Extremamente Comprido Demais".to_string(),
            city: "Sao Jose dos Campos".to_string(),
            key: "k".to_string(),
        })
        .encode(dec!(1.00), "r");

        let fields = parse_tlv(&code.payload);
        let name = fields.iter().find(|(id, _)| id == "59").unwrap();
        let city = fields.iter().find(|(id, _)| id == "60").unwrap();
        assert!(name.1.len() <= 25);
        assert!(city.1.len() <= 15);
    }
}
