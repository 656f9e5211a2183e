//! Conversion error types.
//!
//! Parsing itself never fails; these errors only come from the file boundary
//! around it (reading the source, stat'ing it, writing the JSON output).

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while converting a Markdown quiz file.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The input path does not exist.
    #[error("input not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// The input file could not be read as UTF-8 text.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input file's metadata (modification time) could not be obtained.
    #[error("failed to stat {}: {source}", path.display())]
    Metadata {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The conversion result could not be serialized.
    #[error("failed to serialize {}: {source}", path.display())]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The JSON output could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is missing or malformed.
    #[error("invalid config {}: {message}", path.display())]
    Config { path: PathBuf, message: String },
}

impl ConvertError {
    /// Returns `true` if the error was caused by a missing input.
    pub fn is_not_found(&self) -> bool {
        match self {
            ConvertError::NotFound { .. } => true,
            ConvertError::Read { source, .. } | ConvertError::Metadata { source, .. } => {
                source.kind() == std::io::ErrorKind::NotFound
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_underlying_message() {
        let err = ConvertError::Read {
            path: PathBuf::from("quiz.md"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("quiz.md"));
        assert!(msg.contains("access denied"));
    }

    #[test]
    fn not_found_classification() {
        let missing = ConvertError::Metadata {
            path: PathBuf::from("gone.md"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(missing.is_not_found());
        assert!(ConvertError::NotFound {
            path: PathBuf::from("gone.md")
        }
        .is_not_found());

        let config = ConvertError::Config {
            path: PathBuf::from("quizmark.toml"),
            message: "bad".into(),
        };
        assert!(!config.is_not_found());
    }
}
