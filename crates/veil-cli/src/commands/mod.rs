pub mod mask;
pub mod session;

use anyhow::{Context, Result};
use clap::CommandFactory;
use clap_complete::Shell;
use std::io::Read;
use std::path::Path;
use veil_core::{Document, SYMBOL_CHARACTERS};
use veil_config::Config;

use crate::cli::Cli;

/// Read the whole input text from a file, or from stdin when no path is given
pub fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}

/// Empty document styled from the config
pub fn new_document(config: &Config) -> Document {
    Document::with_style(config.display_mode, config.mask_glyph)
}

pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = arboard::Clipboard::new().context("Clipboard unavailable")?;
    clipboard.set_text(text.to_string())?;
    tracing::debug!(bytes = text.len(), "copied export to clipboard");
    Ok(())
}

pub fn symbols() -> Result<()> {
    let symbols: String = SYMBOL_CHARACTERS.iter().collect();
    println!("{}", symbols);
    Ok(())
}

pub fn completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
    Ok(())
}
