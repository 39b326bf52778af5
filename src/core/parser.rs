use crate::domain::model::{ParseFailure, RowId, ServiceLineItem};

pub type ParseResult = std::result::Result<Vec<ServiceLineItem>, ParseFailure>;

/// Decodes the JSON array held in a quote's `Services` cell.
pub struct ServicePayloadParser;

impl ServicePayloadParser {
    /// Anything other than an array of objects is a failure for the whole row.
    pub fn parse(row: &RowId, raw: &str) -> ParseResult {
        let payload = raw.trim();
        if payload.is_empty() {
            return Err(ParseFailure {
                row: row.clone(),
                reason: "services field is empty".to_string(),
            });
        }

        serde_json::from_str::<Vec<ServiceLineItem>>(payload).map_err(|e| ParseFailure {
            row: row.clone(),
            reason: e.to_string(),
        })
    }
}
