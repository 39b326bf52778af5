//! Folds a flat sheet (one service line per row) into the grouped quote table,
//! one row per quote with its services serialized as a JSON array.

use crate::core::reader::RecordReader;
use crate::domain::model::{columns, RowFields, ServiceLineItem};
use crate::utils::error::{DocgenError, Result};
use std::collections::HashMap;

pub mod flat_columns {
    pub const SERVICE_TYPE: &str = "Service Type";
    pub const LANGUAGE_PAIR: &str = "Language Pair";
    pub const MODALITY: &str = "Modality";
    pub const WORD_COUNT: &str = "Word Count";
    pub const DURATION: &str = "Duration (hrs)";
    pub const RATE: &str = "Rate";
    pub const DETAILS: &str = "Details";
    pub const TOTAL: &str = "Total";
}

pub const NUM_SERVICES: &str = "Num Services";

pub const GROUPED_HEADER: [&str; 9] = [
    columns::QUOTE_ID,
    columns::DATE,
    columns::CLIENT_NAME,
    columns::EMAIL,
    columns::ORGANIZATION,
    columns::NOTES,
    columns::SERVICES,
    columns::GRAND_TOTAL,
    NUM_SERVICES,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupedQuote {
    pub quote_id: String,
    pub date: String,
    pub client_name: String,
    pub email: String,
    pub organization: String,
    pub notes: String,
    pub grand_total: String,
    pub services: Vec<ServiceLineItem>,
}

impl GroupedQuote {
    fn open(quote_id: String, fields: &RowFields) -> Self {
        let text = |header: &str| fields.get(header).unwrap_or_default().to_string();

        Self {
            quote_id,
            date: text(columns::DATE),
            client_name: text(columns::CLIENT_NAME),
            email: text(columns::EMAIL),
            organization: text(columns::ORGANIZATION),
            notes: text(columns::NOTES),
            grand_total: String::new(),
            services: Vec::new(),
        }
    }

    pub fn to_row(&self) -> Result<Vec<String>> {
        Ok(vec![
            self.quote_id.clone(),
            self.date.clone(),
            self.client_name.clone(),
            self.email.clone(),
            self.organization.clone(),
            self.notes.clone(),
            serde_json::to_string(&self.services)?,
            self.grand_total.clone(),
            self.services.len().to_string(),
        ])
    }
}

fn service_from_flat_row(fields: &RowFields) -> ServiceLineItem {
    let text = |header: &str| fields.get(header).unwrap_or_default().to_string();

    ServiceLineItem {
        service_type: text(flat_columns::SERVICE_TYPE),
        language_pair: text(flat_columns::LANGUAGE_PAIR),
        modality: text(flat_columns::MODALITY),
        word_count: text(flat_columns::WORD_COUNT),
        duration_hours: text(flat_columns::DURATION),
        rate: text(flat_columns::RATE),
        details: text(flat_columns::DETAILS),
        total: text(flat_columns::TOTAL),
    }
}

/// Groups flat rows by quote id, keeping quotes in first-seen order.
///
/// Rows without a quote id are dropped. Quote metadata comes from the first
/// row of each quote; the grand total is the first non-empty `Grand Total`
/// cell, copied as written.
pub fn group_flat_rows(block: Vec<Vec<String>>) -> Result<Vec<GroupedQuote>> {
    let reader = RecordReader::new(block)?;
    if !reader.headers().iter().any(|h| h == columns::QUOTE_ID) {
        return Err(DocgenError::MissingColumnError {
            column: columns::QUOTE_ID.to_string(),
        });
    }

    let mut quotes: Vec<GroupedQuote> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut dropped = 0usize;

    for fields in reader {
        let quote_id = fields
            .get(columns::QUOTE_ID)
            .map(str::trim)
            .unwrap_or_default()
            .to_string();
        if quote_id.is_empty() {
            dropped += 1;
            continue;
        }

        let position = match positions.get(&quote_id) {
            Some(position) => *position,
            None => {
                quotes.push(GroupedQuote::open(quote_id.clone(), &fields));
                positions.insert(quote_id, quotes.len() - 1);
                quotes.len() - 1
            }
        };

        let quote = &mut quotes[position];
        if quote.grand_total.is_empty() {
            if let Some(total) = fields.get(columns::GRAND_TOTAL).filter(|t| !t.trim().is_empty()) {
                quote.grand_total = total.to_string();
            }
        }
        quote.services.push(service_from_flat_row(&fields));
    }

    if dropped > 0 {
        tracing::warn!(rows = dropped, "Dropped flat rows without a quote id");
    }
    tracing::info!(quotes = quotes.len(), "Grouped flat rows into quotes");

    Ok(quotes)
}

/// Header row plus one row per grouped quote.
pub fn grouped_table(quotes: &[GroupedQuote]) -> Result<Vec<Vec<String>>> {
    let mut rows = Vec::with_capacity(quotes.len() + 1);
    rows.push(GROUPED_HEADER.iter().map(|h| h.to_string()).collect());
    for quote in quotes {
        rows.push(quote.to_row()?);
    }
    Ok(rows)
}
