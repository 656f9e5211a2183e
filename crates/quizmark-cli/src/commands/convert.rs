//! The `quizmark convert` command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use quizmark_core::config::QuizmarkConfig;
use quizmark_core::convert::{
    convert_and_write, mirrored_output_path, output_path_for, sibling_output_path,
};

use super::{input_files, resolve_config};

pub fn execute(
    input: PathBuf,
    output_dir: Option<PathBuf>,
    code_blocks: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = resolve_config(config_path.as_deref(), output_dir, code_blocks)?;

    if input.is_dir() {
        return convert_directory(&input, &config);
    }

    let output = output_path_for(&input, config.output_dir.as_deref());
    convert_and_write(&input, &output, &config.parse_options())
        .with_context(|| format!("failed to convert {}", input.display()))?;

    println!(
        "Successfully converted \"{}\" to \"{}\"",
        input.display(),
        output.display()
    );
    Ok(())
}

fn convert_directory(root: &Path, config: &QuizmarkConfig) -> Result<()> {
    let files = input_files(root, config)?;

    if files.is_empty() {
        println!(
            "No markdown files found in \"{}\" or its subdirectories.",
            root.display()
        );
        return Ok(());
    }

    println!(
        "Found {} markdown file(s). Starting conversion...",
        files.len()
    );

    let options = config.parse_options();
    let mut failed = 0;

    for file in &files {
        let output = match &config.output_dir {
            Some(dir) => mirrored_output_path(root, file, dir),
            None => sibling_output_path(file),
        };

        match convert_and_write(file, &output, &options) {
            Ok(_) => println!(
                "Successfully converted \"{}\" to \"{}\"",
                file.display(),
                output.display()
            ),
            Err(e) => {
                tracing::warn!("skipping {}: {}", file.display(), e);
                eprintln!("Error: {e}");
                failed += 1;
            }
        }
    }

    anyhow::ensure!(
        failed == 0,
        "{failed} of {} file(s) failed to convert",
        files.len()
    );
    Ok(())
}
