use anyhow::Result;
use quote_docgen::app::commands;
use quote_docgen::{CsvTable, MemoryLog, TomlConfig};
use std::fs;
use tempfile::TempDir;

const QUOTES_CSV: &str = r#"Quote ID,Client Name,Services,Grand Total,Notes
Q1,Ada,"[{""Service_Type"":""Translation"",""Language_Pair"":""EN-FR"",""Modality"":""Written"",""Word_Count"":1000,""Duration_hrs"":0,""Rate"":0.1,""Details"":""Contract"",""Total"":100},{""Service_Type"":""Interpreting"",""Language_Pair"":""EN-ES"",""Modality"":""Remote"",""Word_Count"":"""",""Duration_hrs"":2,""Rate"":45,""Details"":""Hearing"",""Total"":90}]",190,
Q2,Bob,not json,50,
Q3,Cy,[],0,
"#;

fn write_input(dir: &TempDir) -> Result<std::path::PathBuf> {
    let input = dir.path().join("GroupedQuotes.csv");
    fs::write(&input, QUOTES_CSV)?;
    Ok(input)
}

#[tokio::test]
async fn test_inject_summary_column_in_place() -> Result<()> {
    let dir = TempDir::new()?;
    let input = write_input(&dir)?;
    let config = TomlConfig::from_toml_str(&format!(
        "[source]\npath = \"{}\"\n",
        input.to_str().unwrap().replace('\\', "/")
    ))?;
    let log = MemoryLog::new();

    let summary = commands::inject_summary_column(&config, log.clone()).await?;
    assert_eq!(summary.emitted, 2);
    assert_eq!(summary.skipped, 1);

    let table = CsvTable::from_path(&input, b',')?;
    let rows = table.rows();

    assert_eq!(rows[0].len(), 6);
    assert_eq!(rows[0][5], "Services Summary");
    assert_eq!(
        rows[1][5],
        "• Translation | EN-FR | Written | 1000 words | 0 hrs | 0.1 USD | Total: 100 USD\nContract\n\n\
         • Interpreting | EN-ES | Remote |  words | 2 hrs | 45 USD | Total: 90 USD\nHearing"
    );
    assert_eq!(rows[2][5], "");
    assert_eq!(rows[2][2], "not json");
    assert_eq!(rows[3][5], "");

    // Existing columns are untouched.
    assert_eq!(rows[1][0], "Q1");
    assert_eq!(rows[1][3], "190");

    let lines = log.lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("Error parsing Services JSON for Quote ID Q2: "));
    Ok(())
}

#[tokio::test]
async fn test_rerun_overwrites_the_same_column() -> Result<()> {
    let dir = TempDir::new()?;
    let input = write_input(&dir)?;
    let config = TomlConfig::from_toml_str(&format!(
        "[source]\npath = \"{}\"\n",
        input.to_str().unwrap().replace('\\', "/")
    ))?;

    commands::inject_summary_column(&config, MemoryLog::new()).await?;
    let after_first = fs::read_to_string(&input)?;
    commands::inject_summary_column(&config, MemoryLog::new()).await?;
    let after_second = fs::read_to_string(&input)?;

    assert_eq!(after_first, after_second);
    Ok(())
}

#[tokio::test]
async fn test_table_output_leaves_source_untouched() -> Result<()> {
    let dir = TempDir::new()?;
    let input = write_input(&dir)?;
    let output = dir.path().join("out").join("with_summary.csv");
    let config = TomlConfig::from_toml_str(&format!(
        "[source]\npath = \"{}\"\n[column]\nheader = \"Summary\"\nbullet = \"-\"\noutput_path = \"{}\"\n",
        input.to_str().unwrap().replace('\\', "/"),
        output.to_str().unwrap().replace('\\', "/"),
    ))?;

    commands::inject_summary_column(&config, MemoryLog::new()).await?;

    assert_eq!(fs::read_to_string(&input)?, QUOTES_CSV);

    let table = CsvTable::from_path(&output, b',')?;
    assert_eq!(table.rows()[0][5], "Summary");
    assert!(table.rows()[1][5].starts_with("- Translation |"));
    Ok(())
}
