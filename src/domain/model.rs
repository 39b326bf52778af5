use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Header labels of the grouped quote table.
pub mod columns {
    pub const QUOTE_ID: &str = "Quote ID";
    pub const DATE: &str = "Date";
    pub const CLIENT_NAME: &str = "Client Name";
    pub const EMAIL: &str = "Email";
    pub const ORGANIZATION: &str = "Organization";
    pub const SERVICES: &str = "Services";
    pub const GRAND_TOTAL: &str = "Grand Total";
    pub const NOTES: &str = "Notes";

    pub const REQUIRED: [&str; 2] = [QUOTE_ID, SERVICES];
    pub const ALL: [&str; 8] = [
        QUOTE_ID,
        DATE,
        CLIENT_NAME,
        EMAIL,
        ORGANIZATION,
        SERVICES,
        GRAND_TOTAL,
        NOTES,
    ];
}

/// One data row of the table, keyed by header label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowFields {
    /// 0-based index among the data rows (the header row is not counted).
    pub index: usize,
    pub values: HashMap<String, String>,
}

impl RowFields {
    pub fn get(&self, header: &str) -> Option<&str> {
        self.values.get(header).map(String::as_str)
    }

    /// 1-based row number as it appears in the table, header included.
    pub fn table_row_number(&self) -> usize {
        self.index + 2
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteRecord {
    pub quote_id: String,
    pub date: String,
    pub client_name: String,
    pub email: String,
    pub organization: String,
    pub grand_total: String,
    pub notes: String,
    pub services_raw: String,
}

impl QuoteRecord {
    /// Absent fields become empty text.
    pub fn from_fields(fields: &RowFields) -> Self {
        let text = |header: &str| fields.get(header).unwrap_or_default().to_string();

        Self {
            quote_id: quote_id_of(fields),
            date: text(columns::DATE),
            client_name: text(columns::CLIENT_NAME),
            email: text(columns::EMAIL),
            organization: text(columns::ORGANIZATION),
            grand_total: text(columns::GRAND_TOTAL),
            notes: text(columns::NOTES),
            services_raw: text(columns::SERVICES),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceLineItem {
    #[serde(rename = "Service_Type", default, deserialize_with = "display_text")]
    pub service_type: String,
    #[serde(rename = "Language_Pair", default, deserialize_with = "display_text")]
    pub language_pair: String,
    #[serde(rename = "Modality", default, deserialize_with = "display_text")]
    pub modality: String,
    #[serde(rename = "Word_Count", default, deserialize_with = "display_text")]
    pub word_count: String,
    #[serde(rename = "Duration_hrs", default, deserialize_with = "display_text")]
    pub duration_hours: String,
    #[serde(rename = "Rate", default, deserialize_with = "display_text")]
    pub rate: String,
    #[serde(rename = "Details", default, deserialize_with = "display_text")]
    pub details: String,
    #[serde(rename = "Total", default, deserialize_with = "display_text")]
    pub total: String,
}

// Scalars are kept as the text they were written with; null reads as empty.
fn display_text<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => Ok(String::new()),
        serde_json::Value::String(text) => Ok(text),
        serde_json::Value::Number(number) => Ok(number_text(&number)),
        serde_json::Value::Bool(flag) => Ok(flag.to_string()),
        other => Err(de::Error::custom(format!(
            "expected text or a number, found {}",
            other
        ))),
    }
}

// Integral floats print without a fraction, so `100.0` and `1e2` both read `100`.
fn number_text(number: &serde_json::Number) -> String {
    match number.as_f64() {
        Some(value) if number.is_f64() && value.fract() == 0.0 && value.abs() < i64::MAX as f64 => {
            (value as i64).to_string()
        }
        _ => number.to_string(),
    }
}

/// Identity of a row for log lines: its quote id, or its table row number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowId {
    pub quote_id: String,
    pub row_number: usize,
}

impl RowId {
    pub fn of(fields: &RowFields) -> Self {
        Self {
            quote_id: quote_id_of(fields),
            row_number: fields.table_row_number(),
        }
    }
}

/// Quote ids are compared and displayed without surrounding whitespace.
fn quote_id_of(fields: &RowFields) -> String {
    fields
        .get(columns::QUOTE_ID)
        .map(str::trim)
        .unwrap_or_default()
        .to_string()
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.quote_id.is_empty() {
            write!(f, "row {}", self.row_number)
        } else {
            write!(f, "Quote ID {}", self.quote_id)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Error parsing Services JSON for {row}: {reason}")]
pub struct ParseFailure {
    pub row: RowId,
    pub reason: String,
}

/// Long-form rendering of one quote, one entry per paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pub title: String,
    pub blocks: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowMode {
    Document,
    Column,
}

impl fmt::Display for RowMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowMode::Document => write!(f, "document"),
            RowMode::Column => write!(f, "column"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Emission {
    Document { locator: String },
    Cell { row: usize, column: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    Emitted(Emission),
    Skipped(ParseFailure),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub rows: usize,
    pub emitted: usize,
    pub skipped: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(index: usize, pairs: &[(&str, &str)]) -> RowFields {
        RowFields {
            index,
            values: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    #[test]
    fn test_record_from_fields_fills_absent_with_empty_text() {
        let row = fields(0, &[("Quote ID", "Q1"), ("Services", "[]")]);
        let record = QuoteRecord::from_fields(&row);

        assert_eq!(record.quote_id, "Q1");
        assert_eq!(record.services_raw, "[]");
        assert_eq!(record.notes, "");
        assert_eq!(record.grand_total, "");
    }

    #[test]
    fn test_record_and_row_id_share_trimmed_quote_id() {
        let row = fields(0, &[("Quote ID", " Q1 "), ("Services", "[]")]);

        assert_eq!(QuoteRecord::from_fields(&row).quote_id, "Q1");
        assert_eq!(RowId::of(&row).quote_id, "Q1");
    }

    #[test]
    fn test_service_item_accepts_numbers_and_nulls() {
        let item: ServiceLineItem = serde_json::from_str(
            r#"{"Service_Type":"Interpreting","Word_Count":null,"Duration_hrs":2.5,"Total":100,"Rate":true}"#,
        )
        .unwrap();

        assert_eq!(item.service_type, "Interpreting");
        assert_eq!(item.word_count, "");
        assert_eq!(item.duration_hours, "2.5");
        assert_eq!(item.total, "100");
        assert_eq!(item.rate, "true");
        assert_eq!(item.language_pair, "");
    }

    #[test]
    fn test_integral_floats_render_without_fraction() {
        let item: ServiceLineItem = serde_json::from_str(
            r#"{"Total":100.0,"Rate":1e2,"Word_Count":-0.0,"Duration_hrs":1.50}"#,
        )
        .unwrap();

        assert_eq!(item.total, "100");
        assert_eq!(item.rate, "100");
        assert_eq!(item.word_count, "0");
        assert_eq!(item.duration_hours, "1.5");
    }

    #[test]
    fn test_service_item_rejects_nested_values() {
        let result: std::result::Result<ServiceLineItem, _> =
            serde_json::from_str(r#"{"Service_Type":{"name":"x"}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_service_item_serializes_with_sheet_keys_in_order() {
        let item = ServiceLineItem {
            service_type: "Translation".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.starts_with(r#"{"Service_Type":"Translation","Language_Pair":"""#));
        assert!(json.ends_with(r#""Total":""}"#));
    }

    #[test]
    fn test_row_id_display() {
        let with_id = RowId::of(&fields(0, &[("Quote ID", " Q7 ")]));
        assert_eq!(with_id.to_string(), "Quote ID Q7");

        let without_id = RowId::of(&fields(3, &[("Quote ID", "")]));
        assert_eq!(without_id.to_string(), "row 5");
    }
}
