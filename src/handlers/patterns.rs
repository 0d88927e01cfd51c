use std::fs;
use std::path::PathBuf;

use colored::Colorize;

use crate::cli::PatternsCommand;
use crate::error::Result;
use crate::patterns::{PatternLibrary, load_pattern_file};

/// Inspect, validate, or export pattern dictionaries.
pub fn handle_patterns(command: PatternsCommand) -> Result<()> {
    match command {
        PatternsCommand::Show { file } => {
            let library = match &file {
                Some(path) => PatternLibrary::builtin().with_log_patterns_from(path)?,
                None => PatternLibrary::builtin(),
            };
            for (title, set) in [
                ("Pod status patterns (all-of matching)", &library.pod_status),
                ("Describe patterns (any-of matching)", &library.describe),
                ("Log patterns (any-of matching)", &library.logs),
            ] {
                println!("{}", title.bold());
                println!("{}\n", serde_json::to_string_pretty(set)?);
            }
        }
        PatternsCommand::Validate { file } => {
            let set = load_pattern_file(&file)?;
            println!(
                "{} {} defines {} categories with {} patterns",
                "OK:".green(),
                file.display(),
                set.len(),
                set.pattern_count()
            );
        }
        PatternsCommand::Export { output } => {
            let library = PatternLibrary::builtin();
            fs::write(&output, serde_json::to_string_pretty(&library.logs)?)?;
            println!("Error patterns file saved to {}", absolute_or(&output));
        }
    }
    Ok(())
}

fn absolute_or(path: &PathBuf) -> String {
    std::path::absolute(path)
        .unwrap_or_else(|_| path.clone())
        .display()
        .to_string()
}
