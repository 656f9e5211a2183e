//! Configuration loading.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConvertError;
use crate::parser::ParseOptions;

/// File name searched for in the current directory.
pub const CONFIG_FILE_NAME: &str = "quizmark.toml";

/// Top-level quizmark configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizmarkConfig {
    /// Directory for generated JSON. Unset means the current directory for
    /// single files and next to each source for directory batches.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    /// Capture fenced code blocks into `question_markdown`.
    #[serde(default)]
    pub capture_code_blocks: bool,
    /// File extensions picked up when converting a directory.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

fn default_extensions() -> Vec<String> {
    vec!["md".to_string()]
}

impl Default for QuizmarkConfig {
    fn default() -> Self {
        Self {
            output_dir: None,
            capture_code_blocks: false,
            extensions: default_extensions(),
        }
    }
}

impl QuizmarkConfig {
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            capture_code_blocks: self.capture_code_blocks,
        }
    }

    /// Parse a TOML string (useful for testing).
    pub fn from_toml_str(content: &str, source_path: &Path) -> Result<Self, ConvertError> {
        toml::from_str(content).map_err(|e| ConvertError::Config {
            path: source_path.to_path_buf(),
            message: e.message().to_string(),
        })
    }
}

/// Load config from an explicit path, or from `quizmark.toml` in the current
/// directory if present. Falls back to defaults.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizmarkConfig, ConvertError> {
    let config_path = match path {
        Some(p) if p.exists() => p.to_path_buf(),
        Some(p) => {
            return Err(ConvertError::Config {
                path: p.to_path_buf(),
                message: "config file not found".into(),
            })
        }
        None => {
            let local = PathBuf::from(CONFIG_FILE_NAME);
            if !local.exists() {
                tracing::debug!("no {CONFIG_FILE_NAME} found, using defaults");
                return Ok(QuizmarkConfig::default());
            }
            local
        }
    };

    let content = std::fs::read_to_string(&config_path).map_err(|source| ConvertError::Read {
        path: config_path.clone(),
        source,
    })?;
    let config = QuizmarkConfig::from_toml_str(&content, &config_path)?;
    tracing::debug!(path = %config_path.display(), ?config, "loaded config");
    Ok(config)
}
