use crate::domain::model::ServiceLineItem;

pub const DEFAULT_BULLET: &str = "•";

/// Compact services summary for a single cell; carries no quote metadata.
#[derive(Debug, Clone)]
pub struct ColumnRenderer {
    bullet: String,
}

impl ColumnRenderer {
    pub fn new(bullet: impl Into<String>) -> Self {
        Self {
            bullet: bullet.into(),
        }
    }

    pub fn render(&self, items: &[ServiceLineItem]) -> String {
        items
            .iter()
            .map(|item| {
                format!(
                    "{} {} | {} | {} | {} words | {} hrs | {} USD | Total: {} USD\n{}",
                    self.bullet,
                    item.service_type,
                    item.language_pair,
                    item.modality,
                    item.word_count,
                    item.duration_hours,
                    item.rate,
                    item.total,
                    item.details
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

impl Default for ColumnRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_BULLET)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(service_type: &str, details: &str) -> ServiceLineItem {
        ServiceLineItem {
            service_type: service_type.to_string(),
            language_pair: "EN-ES".to_string(),
            modality: "Remote".to_string(),
            word_count: "500".to_string(),
            duration_hours: "2".to_string(),
            rate: "45".to_string(),
            details: details.to_string(),
            total: "90".to_string(),
        }
    }

    #[test]
    fn test_render_single_item() {
        let text = ColumnRenderer::default().render(&[item("Interpreting", "Court hearing")]);
        assert_eq!(
            text,
            "• Interpreting | EN-ES | Remote | 500 words | 2 hrs | 45 USD | Total: 90 USD\nCourt hearing"
        );
    }

    #[test]
    fn test_render_separates_items_with_blank_line() {
        let text = ColumnRenderer::default().render(&[item("A", "first"), item("B", "second")]);
        let parts: Vec<&str> = text.split("\n\n").collect();

        assert_eq!(parts.len(), 2);
        assert!(parts[0].starts_with("• A |"));
        assert!(parts[0].ends_with("\nfirst"));
        assert!(parts[1].starts_with("• B |"));
    }

    #[test]
    fn test_render_empty_sequence() {
        assert_eq!(ColumnRenderer::default().render(&[]), "");
    }

    #[test]
    fn test_render_is_deterministic() {
        let renderer = ColumnRenderer::new("-");
        let items = vec![item("A", "x"), item("B", "y")];
        assert_eq!(renderer.render(&items), renderer.render(&items.clone()));
        assert!(renderer.render(&items).starts_with("- A |"));
    }
}
