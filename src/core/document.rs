use crate::domain::model::{QuoteRecord, RenderedDocument, ServiceLineItem};

pub const HEADING: &str = "PROFESSIONAL SERVICE QUOTATION";
pub const SERVICES_HEADING: &str = "\nSERVICES INCLUDED:\n";
pub const SERVICE_SEPARATOR: &str = "---";

/// Renders a quote as the paragraph sequence of a standalone quotation document.
///
/// The block order is relied on by whoever reads the generated documents:
/// heading, the five metadata lines, the services heading, nine blocks per
/// service (eight fields and a separator), grand total, notes.
pub struct DocumentRenderer;

impl DocumentRenderer {
    pub fn title(record: &QuoteRecord) -> String {
        format!("Quote - {}", record.quote_id)
    }

    pub fn render(record: &QuoteRecord, items: &[ServiceLineItem]) -> RenderedDocument {
        let mut blocks = Vec::with_capacity(9 + items.len() * 9);

        blocks.push(HEADING.to_string());
        blocks.push(format!("Quote ID: {}", record.quote_id));
        blocks.push(format!("Date: {}", record.date));
        blocks.push(format!("Client: {}", record.client_name));
        blocks.push(format!("Email: {}", record.email));
        blocks.push(format!("Organization: {}", record.organization));
        blocks.push(SERVICES_HEADING.to_string());

        for item in items {
            blocks.push(format!("Service Type: {}", item.service_type));
            blocks.push(format!("Language Pair: {}", item.language_pair));
            blocks.push(format!("Modality: {}", item.modality));
            blocks.push(format!("Word Count: {}", item.word_count));
            blocks.push(format!("Duration (hrs): {}", item.duration_hours));
            blocks.push(format!("Rate: {}", item.rate));
            blocks.push(format!("Details: {}", item.details));
            blocks.push(format!("Total: {} USD", item.total));
            blocks.push(SERVICE_SEPARATOR.to_string());
        }

        blocks.push(format!("\nGrand Total: {} USD", record.grand_total));
        blocks.push(format!("\nNotes:\n{}", record.notes));

        RenderedDocument {
            title: Self::title(record),
            blocks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> QuoteRecord {
        QuoteRecord {
            quote_id: "Q1".to_string(),
            date: "2024-05-01".to_string(),
            client_name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            organization: "Analytical Ltd".to_string(),
            grand_total: "140".to_string(),
            notes: String::new(),
            services_raw: String::new(),
        }
    }

    fn translation() -> ServiceLineItem {
        ServiceLineItem {
            service_type: "Translation".to_string(),
            language_pair: "EN-FR".to_string(),
            modality: "Written".to_string(),
            word_count: "1000".to_string(),
            duration_hours: "".to_string(),
            rate: "0.1".to_string(),
            details: "Legal contract".to_string(),
            total: "100".to_string(),
        }
    }

    #[test]
    fn test_render_block_order() {
        let doc = DocumentRenderer::render(&record(), &[translation()]);

        assert_eq!(doc.title, "Quote - Q1");
        assert_eq!(
            doc.blocks,
            vec![
                "PROFESSIONAL SERVICE QUOTATION",
                "Quote ID: Q1",
                "Date: 2024-05-01",
                "Client: Ada",
                "Email: ada@example.com",
                "Organization: Analytical Ltd",
                "\nSERVICES INCLUDED:\n",
                "Service Type: Translation",
                "Language Pair: EN-FR",
                "Modality: Written",
                "Word Count: 1000",
                "Duration (hrs): ",
                "Rate: 0.1",
                "Details: Legal contract",
                "Total: 100 USD",
                "---",
                "\nGrand Total: 140 USD",
                "\nNotes:\n",
            ]
        );
    }

    #[test]
    fn test_render_without_services_keeps_frame() {
        let doc = DocumentRenderer::render(&record(), &[]);

        assert_eq!(doc.blocks.len(), 9);
        assert_eq!(doc.blocks[6], SERVICES_HEADING);
        assert_eq!(doc.blocks[7], "\nGrand Total: 140 USD");
        assert!(!doc.blocks.iter().any(|b| b == SERVICE_SEPARATOR));
    }

    #[test]
    fn test_render_one_group_per_service() {
        let mut second = translation();
        second.service_type = "Interpreting".to_string();
        let doc = DocumentRenderer::render(&record(), &[translation(), second]);

        assert_eq!(doc.blocks.len(), 9 + 18);
        assert_eq!(doc.blocks[7], "Service Type: Translation");
        assert_eq!(doc.blocks[16], "Service Type: Interpreting");
        assert_eq!(
            doc.blocks.iter().filter(|b| *b == SERVICE_SEPARATOR).count(),
            2
        );
    }

    #[test]
    fn test_notes_never_render_placeholder_text() {
        let mut with_notes = record();
        with_notes.notes = "Rush delivery".to_string();

        let doc = DocumentRenderer::render(&with_notes, &[]);
        assert_eq!(doc.blocks.last().unwrap(), "\nNotes:\nRush delivery");

        let empty = DocumentRenderer::render(&record(), &[]);
        let notes = empty.blocks.last().unwrap();
        assert!(!notes.contains("undefined"));
        assert!(!notes.contains("null"));
    }
}
