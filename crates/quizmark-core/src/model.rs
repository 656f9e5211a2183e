//! Core data model types for quizmark.
//!
//! A converted quiz is a [`ConversionResult`]: the source file name plus an
//! ordered list of questions, each stamped with the source file's
//! modification time.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ConvertError;

/// Value of `correct_answer` when no option has been marked correct.
pub const NO_CORRECT_ANSWER: i64 = -1;

/// One answer choice of a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionRecord {
    /// Option text, trimmed.
    pub option_text: String,
    /// Whether the option was marked with `[x]`.
    pub is_correct: bool,
}

/// One multiple-choice question as parsed from the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    /// Header text with the `####` marker stripped.
    pub question: String,
    /// URL of the last image line in the block, or empty.
    pub picture_url: String,
    /// Index of the last option marked correct, or [`NO_CORRECT_ANSWER`].
    pub correct_answer: i64,
    /// Options in document order.
    pub options: Vec<OptionRecord>,
    /// Raw fenced code block attached to the question, if captured.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub question_markdown: String,
}

impl QuestionRecord {
    /// Start a new question from header text.
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            picture_url: String::new(),
            correct_answer: NO_CORRECT_ANSWER,
            options: Vec::new(),
            question_markdown: String::new(),
        }
    }

    /// Append an option. A correct option always takes over `correct_answer`.
    pub fn push_option(&mut self, option_text: impl Into<String>, is_correct: bool) {
        self.options.push(OptionRecord {
            option_text: option_text.into(),
            is_correct,
        });
        if is_correct {
            self.correct_answer = (self.options.len() - 1) as i64;
        }
    }

    /// The option referenced by `correct_answer`, if any.
    pub fn correct_option(&self) -> Option<&OptionRecord> {
        usize::try_from(self.correct_answer)
            .ok()
            .and_then(|idx| self.options.get(idx))
    }
}

/// A question together with its `updated_at` stamp, as written to JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StampedQuestion {
    #[serde(flatten)]
    pub record: QuestionRecord,
    /// Modification time of the source file.
    #[serde(with = "iso_millis")]
    pub updated_at: DateTime<Utc>,
}

/// The whole-file conversion output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionResult {
    /// Base name of the input file, extension included.
    pub name_of_markdown: String,
    /// Questions in document order.
    pub questions: Vec<StampedQuestion>,
}

impl ConversionResult {
    /// Build a result, stamping every question with the same timestamp.
    pub fn new(
        name_of_markdown: impl Into<String>,
        questions: Vec<QuestionRecord>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            name_of_markdown: name_of_markdown.into(),
            questions: questions
                .into_iter()
                .map(|record| StampedQuestion { record, updated_at })
                .collect(),
        }
    }

    /// Pretty-printed JSON (two-space indent).
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Save the result as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<(), ConvertError> {
        let json = self.to_json().map_err(|source| ConvertError::Serialize {
            path: path.to_path_buf(),
            source,
        })?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| ConvertError::Write {
                path: path.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(path, json).map_err(|source| ConvertError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load a previously written result from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read result from {}", path.display()))?;
        let result: ConversionResult =
            serde_json::from_str(&content).context("failed to parse result JSON")?;
        Ok(result)
    }
}

/// ISO-8601 in UTC with millisecond precision, e.g. `2024-05-01T12:00:00.000Z`.
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(dt: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
