use anyhow::Context;
use clap::Parser;
use quote_docgen::app::commands;
use quote_docgen::utils::error::ErrorSeverity;
use quote_docgen::utils::{logger, validation::Validate};
use quote_docgen::{Cli, Command, DocgenError, TomlConfig, TracingLog};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => TomlConfig::from_file(path)
            .with_context(|| format!("Failed to load config file '{}'", path))?,
        None => TomlConfig::default(),
    };

    // 初始化日誌
    let verbose = cli.verbose || config.verbose();
    if cli.json_logs || config.json_logs() {
        logger::init_json_logger(verbose);
    } else {
        logger::init_cli_logger(verbose);
    }

    tracing::info!("Starting quote-docgen");
    if let Some(path) = &cli.config {
        tracing::info!("📁 Configuration loaded from: {}", path);
    }

    // 驗證配置
    let validated = cli
        .apply_overrides(&mut config)
        .and_then(|_| config.validate())
        .and_then(|_| match cli.command {
            Command::InjectColumn { .. } => config.validate_for_column_mode(),
            _ => Ok(()),
        });
    if let Err(e) = validated {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }
    tracing::debug!("Effective config: {:?}", config);

    let outcome = match &cli.command {
        Command::GenerateDocs { .. } => commands::generate_documents(&config, TracingLog)
            .await
            .map(|summary| {
                println!(
                    "✅ {} document(s) created, {} row(s) skipped",
                    summary.emitted, summary.skipped
                );
            }),
        Command::InjectColumn { .. } => commands::inject_summary_column(&config, TracingLog)
            .await
            .map(|summary| {
                println!(
                    "✅ {} summary cell(s) written, {} row(s) skipped",
                    summary.emitted, summary.skipped
                );
            }),
        Command::Group { output } => {
            commands::group_quotes(&config, output)
                .await
                .map(|(path, quotes)| {
                    println!("✅ {} quote(s) grouped into {}", quotes, path.display());
                })
        }
    };

    if let Err(e) = outcome {
        exit_for(e);
    }

    Ok(())
}

fn exit_for(e: DocgenError) {
    tracing::error!(
        "❌ Batch failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };

    if exit_code > 0 {
        std::process::exit(exit_code);
    }
}
