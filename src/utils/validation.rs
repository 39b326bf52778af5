use crate::utils::error::{DocgenError, Result};
use std::collections::HashSet;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(DocgenError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(DocgenError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(DocgenError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(DocgenError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(DocgenError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_file_extension(field_name: &str, file: &str, allowed_extensions: &[&str]) -> Result<()> {
    let allowed_set: HashSet<&str> = allowed_extensions.iter().copied().collect();

    match std::path::Path::new(file)
        .extension()
        .and_then(|ext| ext.to_str())
    {
        Some(extension) if allowed_set.contains(extension.to_ascii_lowercase().as_str()) => Ok(()),
        Some(extension) => Err(DocgenError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: file.to_string(),
            reason: format!(
                "Unsupported file extension: {}. Allowed extensions: {}",
                extension,
                allowed_extensions.join(", ")
            ),
        }),
        None => Err(DocgenError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: file.to_string(),
            reason: "File has no extension or invalid filename".to_string(),
        }),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(DocgenError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// CSV delimiters must fit in a single ASCII byte.
pub fn validate_delimiter(field_name: &str, value: &str) -> Result<u8> {
    match value.as_bytes() {
        [byte] if byte.is_ascii() => Ok(*byte),
        _ => Err(DocgenError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Delimiter must be exactly one ASCII character".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("source.url", "https://example.com/export?format=csv").is_ok());
        assert!(validate_url("source.url", "http://example.com").is_ok());
        assert!(validate_url("source.url", "").is_err());
        assert!(validate_url("source.url", "invalid-url").is_err());
        assert!(validate_url("source.url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension("source.path", "quotes.csv", &["csv", "tsv"]).is_ok());
        assert!(validate_file_extension("source.path", "Quotes.TSV", &["csv", "tsv"]).is_ok());
        assert!(validate_file_extension("source.path", "quotes.xlsx", &["csv", "tsv"]).is_err());
        assert!(validate_file_extension("source.path", "quotes", &["csv", "tsv"]).is_err());
    }

    #[test]
    fn test_validate_delimiter() {
        assert_eq!(validate_delimiter("source.delimiter", ";").unwrap(), b';');
        assert!(validate_delimiter("source.delimiter", "").is_err());
        assert!(validate_delimiter("source.delimiter", ",,").is_err());
        assert!(validate_delimiter("source.delimiter", "•").is_err());
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("documents.output_dir", "./out").is_ok());
        assert!(validate_path("documents.output_dir", "").is_err());
        assert!(validate_path("documents.output_dir", "a\0b").is_err());
    }
}
