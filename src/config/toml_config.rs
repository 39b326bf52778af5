use crate::core::column::DEFAULT_BULLET;
use crate::core::ConfigProvider;
use crate::domain::model::columns;
use crate::utils::error::{DocgenError, Result};
use crate::utils::validation::{
    validate_delimiter, validate_file_extension, validate_non_empty_string, validate_path,
    validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_DOCUMENTS_DIR: &str = "./output/documents";
pub const DEFAULT_SUMMARY_HEADER: &str = "Services Summary";

const TABLE_EXTENSIONS: [&str; 2] = ["csv", "tsv"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub documents: DocumentsConfig,
    #[serde(default)]
    pub column: ColumnConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    pub path: Option<String>,
    pub url: Option<String>,
    pub delimiter: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentsConfig {
    pub output_dir: Option<String>,
    /// When set, documents go into this ZIP archive inside `output_dir`.
    pub archive: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ColumnConfig {
    pub header: Option<String>,
    pub bullet: Option<String>,
    /// Where the updated table is written; defaults to the source file.
    pub output_path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub json: Option<bool>,
    pub verbose: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DocgenError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| DocgenError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SHEET_URL})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| DocgenError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }

    pub fn verbose(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.verbose).unwrap_or(false)
    }

    /// Column mode must have somewhere to write the table back to.
    pub fn validate_for_column_mode(&self) -> Result<()> {
        if self.source.url.is_some() && self.column.output_path.is_none() {
            return Err(DocgenError::MissingConfigError {
                field: "column.output_path (required when the table comes from a URL)"
                    .to_string(),
            });
        }
        if columns::ALL.contains(&self.summary_header()) {
            return Err(DocgenError::InvalidConfigValueError {
                field: "column.header".to_string(),
                value: self.summary_header().to_string(),
                reason: "names an input column of the quote table".to_string(),
            });
        }
        Ok(())
    }

    pub fn validate_config(&self) -> Result<()> {
        match (&self.source.path, &self.source.url) {
            (Some(path), None) => {
                validate_path("source.path", path)?;
                validate_file_extension("source.path", path, &TABLE_EXTENSIONS)?;
            }
            (None, Some(url)) => validate_url("source.url", url)?,
            (Some(_), Some(_)) => {
                return Err(DocgenError::ConfigValidationError {
                    field: "source".to_string(),
                    message: "set either source.path or source.url, not both".to_string(),
                })
            }
            (None, None) => {
                return Err(DocgenError::MissingConfigError {
                    field: "source.path or source.url".to_string(),
                })
            }
        }

        if let Some(delimiter) = &self.source.delimiter {
            validate_delimiter("source.delimiter", delimiter)?;
        }

        validate_path("documents.output_dir", self.documents_dir())?;
        if let Some(archive) = &self.documents.archive {
            validate_path("documents.archive", archive)?;
            validate_file_extension("documents.archive", archive, &["zip"])?;
        }

        if let Some(output) = &self.column.output_path {
            validate_path("column.output_path", output)?;
            validate_file_extension("column.output_path", output, &TABLE_EXTENSIONS)?;
        }
        validate_non_empty_string("column.header", self.summary_header())?;

        Ok(())
    }
}

pub(crate) fn delimiter_for_path(path: &str) -> u8 {
    let is_tsv = Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("tsv"))
        .unwrap_or(false);
    if is_tsv {
        b'\t'
    } else {
        b','
    }
}

impl ConfigProvider for TomlConfig {
    fn source_path(&self) -> Option<&str> {
        self.source.path.as_deref()
    }

    fn source_url(&self) -> Option<&str> {
        self.source.url.as_deref()
    }

    fn delimiter(&self) -> u8 {
        match (&self.source.delimiter, &self.source.path) {
            (Some(delimiter), _) => delimiter.as_bytes().first().copied().unwrap_or(b','),
            (None, Some(path)) => delimiter_for_path(path),
            (None, None) => b',',
        }
    }

    fn documents_dir(&self) -> &str {
        self.documents
            .output_dir
            .as_deref()
            .unwrap_or(DEFAULT_DOCUMENTS_DIR)
    }

    fn archive_name(&self) -> Option<&str> {
        self.documents.archive.as_deref()
    }

    fn summary_header(&self) -> &str {
        self.column.header.as_deref().unwrap_or(DEFAULT_SUMMARY_HEADER)
    }

    fn bullet(&self) -> &str {
        self.column.bullet.as_deref().unwrap_or(DEFAULT_BULLET)
    }

    fn table_output(&self) -> Option<&str> {
        self.column.output_path.as_deref()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
