//! Shared helpers for CLI commands.

use std::fmt;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use console::style;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// How command results are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    Text,
    /// Pretty-printed JSON.
    Json,
    /// YAML.
    Yaml,
}

/// Render a value in the requested format.
pub fn render<T>(value: &T, format: OutputFormat) -> Result<String>
where
    T: Serialize + fmt::Display,
{
    let text = match format {
        OutputFormat::Text => value.to_string(),
        OutputFormat::Json => {
            let mut s = serde_json::to_string_pretty(value).context("Failed to encode JSON")?;
            s.push('\n');
            s
        }
        OutputFormat::Yaml => serde_yaml_ng::to_string(value).context("Failed to encode YAML")?,
    };
    Ok(text)
}

/// Write text to a file, or to stdout if no file is given.
pub fn write_output(text: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, text)
                .with_context(|| format!("Failed to write file: {}", path.display()))?;
            eprintln!(
                "{} Wrote {}",
                style("✓").green().bold(),
                style(path.display()).green()
            );
        }
        None => print!("{text}"),
    }
    Ok(())
}

/// Render a value and write it out.
pub fn emit<T>(value: &T, format: OutputFormat, output: Option<&Path>) -> Result<()>
where
    T: Serialize + fmt::Display,
{
    let mut text = render(value, format)?;
    if !text.ends_with('\n') {
        text.push('\n');
    }
    write_output(&text, output)
}

/// Load a YAML or JSON document.
///
/// Files ending in `.json` are parsed as JSON; anything else as YAML.
pub fn load_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    if !path.exists() {
        anyhow::bail!("File not found: {}", path.display());
    }

    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    match ext.to_lowercase().as_str() {
        "json" => serde_json::from_str(&source)
            .with_context(|| format!("Failed to parse JSON: {}", path.display())),
        _ => serde_yaml_ng::from_str(&source)
            .with_context(|| format!("Failed to parse YAML: {}", path.display())),
    }
}
