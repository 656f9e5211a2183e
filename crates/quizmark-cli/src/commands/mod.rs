pub mod convert;
pub mod init;
pub mod validate;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use quizmark_core::config::{load_config_from, QuizmarkConfig};
use quizmark_core::convert::collect_markdown_files;

/// Load the config file and apply command-line overrides.
pub fn resolve_config(
    config_path: Option<&Path>,
    output_dir: Option<PathBuf>,
    code_blocks: bool,
) -> Result<QuizmarkConfig> {
    let mut config = load_config_from(config_path).context("failed to load configuration")?;
    if output_dir.is_some() {
        config.output_dir = output_dir;
    }
    config.capture_code_blocks |= code_blocks;
    Ok(config)
}

/// The quiz files named by `input`: the file itself, or every matching file
/// below a directory.
pub fn input_files(input: &Path, config: &QuizmarkConfig) -> Result<Vec<PathBuf>> {
    if input.is_dir() {
        collect_markdown_files(input, &config.extensions)
            .with_context(|| format!("failed to scan directory: {}", input.display()))
    } else {
        Ok(vec![input.to_path_buf()])
    }
}
