use crate::config::toml_config::TomlConfig;
use crate::utils::error::{DocgenError, Result};
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "quote-docgen")]
#[command(about = "Render service quotations from a quote table")]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Read the quote table from this CSV/TSV file
    #[arg(long, global = true)]
    pub input: Option<String>,

    /// Read the quote table from this CSV export URL
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Field delimiter of the quote table
    #[arg(long, global = true)]
    pub delimiter: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Create one quotation document per quote row
    GenerateDocs {
        #[arg(long)]
        output_dir: Option<String>,

        /// Bundle the documents into this ZIP archive inside the output directory
        #[arg(long)]
        archive: Option<String>,
    },

    /// Write a services summary into a column next to the quote data
    InjectColumn {
        /// Write the updated table here instead of back to the input file
        #[arg(long)]
        table_output: Option<String>,

        #[arg(long)]
        header: Option<String>,

        #[arg(long)]
        bullet: Option<String>,
    },

    /// Fold a flat sheet (one service per row) into the grouped quote table
    Group {
        #[arg(short, long)]
        output: String,
    },
}

impl Cli {
    /// Command-line flags take precedence over the configuration file.
    pub fn apply_overrides(&self, config: &mut TomlConfig) -> Result<()> {
        match (&self.input, &self.url) {
            (Some(_), Some(_)) => {
                return Err(DocgenError::ConfigValidationError {
                    field: "--input/--url".to_string(),
                    message: "pass either --input or --url, not both".to_string(),
                })
            }
            (Some(input), None) => {
                config.source.path = Some(input.clone());
                config.source.url = None;
            }
            (None, Some(url)) => {
                config.source.url = Some(url.clone());
                config.source.path = None;
            }
            (None, None) => {}
        }

        if let Some(delimiter) = &self.delimiter {
            config.source.delimiter = Some(delimiter.clone());
        }

        match &self.command {
            Command::GenerateDocs {
                output_dir,
                archive,
            } => {
                if let Some(dir) = output_dir {
                    config.documents.output_dir = Some(dir.clone());
                }
                if let Some(archive) = archive {
                    config.documents.archive = Some(archive.clone());
                }
            }
            Command::InjectColumn {
                table_output,
                header,
                bullet,
            } => {
                if let Some(output) = table_output {
                    config.column.output_path = Some(output.clone());
                }
                if let Some(header) = header {
                    config.column.header = Some(header.clone());
                }
                if let Some(bullet) = bullet {
                    config.column.bullet = Some(bullet.clone());
                }
            }
            Command::Group { .. } => {}
        }

        Ok(())
    }
}
