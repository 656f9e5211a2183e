//! Advisory checks over parsed questions.
//!
//! Parsing accepts anything; these checks point out blocks that are probably
//! authoring mistakes without changing what gets converted.

use std::collections::HashMap;
use std::fmt;

use crate::model::QuestionRecord;

/// A warning about one question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// 0-based index of the question in document order.
    pub question_index: usize,
    /// What is wrong.
    pub kind: WarningKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WarningKind {
    EmptyQuestion,
    NoOptions,
    NoCorrectOption,
    MultipleCorrectOptions { count: usize, chosen: usize },
    EmptyOptionText { option_index: usize },
    DuplicateQuestion { first_index: usize },
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WarningKind::EmptyQuestion => write!(f, "question text is empty"),
            WarningKind::NoOptions => write!(f, "question has no options"),
            WarningKind::NoCorrectOption => write!(f, "no option is marked correct"),
            WarningKind::MultipleCorrectOptions { count, chosen } => write!(
                f,
                "{count} options are marked correct, option {chosen} is used"
            ),
            WarningKind::EmptyOptionText { option_index } => {
                write!(f, "option {option_index} has no text")
            }
            WarningKind::DuplicateQuestion { first_index } => {
                write!(f, "same text as question {first_index}")
            }
        }
    }
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "question {}: {}", self.question_index, self.kind)
    }
}

/// Check parsed questions for common authoring mistakes.
pub fn validate_questions(questions: &[QuestionRecord]) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let mut seen: HashMap<&str, usize> = HashMap::new();

    for (idx, q) in questions.iter().enumerate() {
        let mut warn = |kind| {
            warnings.push(ValidationWarning {
                question_index: idx,
                kind,
            })
        };

        if q.question.is_empty() {
            warn(WarningKind::EmptyQuestion);
        } else if let Some(&first_index) = seen.get(q.question.as_str()) {
            warn(WarningKind::DuplicateQuestion { first_index });
        } else {
            seen.insert(&q.question, idx);
        }

        if q.options.is_empty() {
            warn(WarningKind::NoOptions);
            continue;
        }

        let correct = q.options.iter().filter(|o| o.is_correct).count();
        match correct {
            0 => warn(WarningKind::NoCorrectOption),
            1 => {}
            count => warn(WarningKind::MultipleCorrectOptions {
                count,
                chosen: q.correct_answer.max(0) as usize,
            }),
        }

        for (option_index, option) in q.options.iter().enumerate() {
            if option.option_text.is_empty() {
                warn(WarningKind::EmptyOptionText { option_index });
            }
        }
    }

    warnings
}
