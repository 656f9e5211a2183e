//! The `quizmark validate` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use quizmark_core::convert::convert_file;
use quizmark_core::model::ConversionResult;
use quizmark_core::validate::validate_questions;

use super::{input_files, resolve_config};

pub fn execute(input: PathBuf, code_blocks: bool, config_path: Option<PathBuf>) -> Result<()> {
    let config = resolve_config(config_path.as_deref(), None, code_blocks)?;
    let files = input_files(&input, &config)?;
    let options = config.parse_options();

    let mut total_warnings = 0;

    for file in &files {
        let result = convert_file(file, &options)
            .with_context(|| format!("failed to read quiz {}", file.display()))?;

        println!(
            "Quiz: {} ({} questions)",
            result.name_of_markdown,
            result.questions.len()
        );
        if !result.questions.is_empty() {
            println!("{}", summary_table(&result));
        }

        let records: Vec<_> = result.questions.into_iter().map(|q| q.record).collect();
        let warnings = validate_questions(&records);
        for w in &warnings {
            println!("  [{}] WARNING: {}", w.question_index, w.kind);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All quizzes valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}

fn summary_table(result: &ConversionResult) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["#", "Question", "Options", "Correct", "Picture"]);

    for (idx, q) in result.questions.iter().enumerate() {
        let record = &q.record;
        let correct = record
            .correct_option()
            .map(|o| o.option_text.as_str())
            .unwrap_or("-");
        table.add_row(vec![
            Cell::new(idx),
            Cell::new(&record.question),
            Cell::new(record.options.len()),
            Cell::new(correct),
            Cell::new(if record.picture_url.is_empty() { "no" } else { "yes" }),
        ]);
    }

    table
}
