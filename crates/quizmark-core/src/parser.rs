//! Markdown quiz parser.
//!
//! Scans a quiz file line by line and assembles question records:
//!
//! ```markdown
//! #### What is 2+2?
//! ![diagram](http://example.com/sum.png)
//! - [ ] 3
//! - [x] 4
//! ```
//!
//! Headers (`####`) open a new question, image lines set its picture URL and
//! checkbox lines append options. Anything else is ignored, as is everything
//! before the first header. Parsing never fails.

use crate::model::QuestionRecord;

/// Marker that opens a new question.
pub const HEADER_MARKER: &str = "####";

/// Marker that opens or closes a fenced code block.
pub const FENCE_MARKER: &str = "```";

/// UTF-8 byte order mark some editors write at the start of a file.
const BOM: char = '\u{feff}';

/// Options controlling how a document is parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Capture fenced code blocks into `question_markdown` instead of
    /// scanning their lines.
    pub capture_code_blocks: bool,
}

/// Classification of a single trimmed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// `#### text`, carrying the trimmed text.
    Header(&'a str),
    /// `![alt](url)` with a non-empty URL.
    Image(&'a str),
    /// `[x] text` or `[ ] text`.
    Option { text: &'a str, is_correct: bool },
    /// Anything else.
    Other,
}

/// Classify a line. Header wins over image, image over option.
pub fn classify(line: &str) -> LineKind<'_> {
    if let Some(text) = match_header(line) {
        LineKind::Header(text)
    } else if let Some(url) = match_image(line) {
        LineKind::Image(url)
    } else if let Some((text, is_correct)) = match_option(line) {
        LineKind::Option { text, is_correct }
    } else {
        LineKind::Other
    }
}

/// Match a `####` header, returning the remaining text trimmed.
pub fn match_header(line: &str) -> Option<&str> {
    line.strip_prefix(HEADER_MARKER).map(str::trim)
}

/// Match an inline image `![alt](url)` anywhere in the line.
///
/// The alt text extends as far right as possible while the URL stops at the
/// first `)` after it. An empty URL is treated as no match.
pub fn match_image(line: &str) -> Option<&str> {
    let start = line.find("![")?;
    let rest = &line[start + 2..];

    let mut limit = rest.len();
    while let Some(mid) = rest[..limit].rfind("](") {
        let after = &rest[mid + 2..];
        if let Some(close) = after.find(')') {
            let url = &after[..close];
            return (!url.is_empty()).then_some(url);
        }
        limit = mid;
    }
    None
}

/// Match the leftmost `[x]` or `[ ]` checkbox, returning the trimmed text
/// after it and whether it is marked correct.
pub fn match_option(line: &str) -> Option<(&str, bool)> {
    line.match_indices('[').find_map(|(idx, _)| {
        let is_correct = match line.get(idx..idx + 3)? {
            "[x]" => true,
            "[ ]" => false,
            _ => return None,
        };
        Some((line[idx + 3..].trim(), is_correct))
    })
}

/// Split content into trimmed, non-empty lines.
pub fn prepare_lines(content: &str) -> Vec<&str> {
    strip_bom(content)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Accumulates questions over a forward scan of lines.
#[derive(Debug, Default)]
pub struct QuestionParser {
    current: Option<QuestionRecord>,
    questions: Vec<QuestionRecord>,
}

impl QuestionParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one trimmed, non-empty line.
    pub fn feed(&mut self, line: &str) {
        let kind = classify(line);

        if let LineKind::Header(text) = kind {
            self.emit_current();
            self.current = Some(QuestionRecord::new(text));
            return;
        }

        let Some(current) = self.current.as_mut() else {
            return;
        };

        match kind {
            LineKind::Image(url) => current.picture_url = url.to_string(),
            LineKind::Option { text, is_correct } => current.push_option(text, is_correct),
            LineKind::Header(_) | LineKind::Other => {}
        }
    }

    /// Start a fenced block on the current question, replacing any earlier one.
    pub fn begin_markdown(&mut self, raw_line: &str) {
        if let Some(current) = self.current.as_mut() {
            current.question_markdown.clear();
            current.question_markdown.push_str(raw_line);
            current.question_markdown.push('\n');
        }
    }

    /// Append a raw line to the current question's fenced block.
    pub fn append_markdown(&mut self, raw_line: &str) {
        if let Some(current) = self.current.as_mut() {
            current.question_markdown.push_str(raw_line);
            current.question_markdown.push('\n');
        }
    }

    /// Finish the scan, emitting the question still being built.
    pub fn finish(mut self) -> Vec<QuestionRecord> {
        self.emit_current();
        self.questions
    }

    fn emit_current(&mut self) {
        if let Some(question) = self.current.take() {
            tracing::debug!(
                question = %question.question,
                options = question.options.len(),
                correct_answer = question.correct_answer,
                "parsed question"
            );
            self.questions.push(question);
        }
    }
}

/// Parse a sequence of trimmed, non-empty lines.
pub fn parse_lines<'a, I>(lines: I) -> Vec<QuestionRecord>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut parser = QuestionParser::new();
    for line in lines {
        parser.feed(line);
    }
    parser.finish()
}

fn strip_bom(content: &str) -> &str {
    content.strip_prefix(BOM).unwrap_or(content)
}

/// Parse raw file content.
pub fn parse_document(content: &str, options: &ParseOptions) -> Vec<QuestionRecord> {
    let content = strip_bom(content);
    if !options.capture_code_blocks {
        return parse_lines(prepare_lines(content));
    }

    let mut parser = QuestionParser::new();
    let mut in_fence = false;

    for raw in content.lines() {
        let line = raw.trim();

        if line.starts_with(FENCE_MARKER) {
            if in_fence {
                parser.append_markdown(raw);
            } else {
                parser.begin_markdown(raw);
            }
            in_fence = !in_fence;
            continue;
        }

        if in_fence {
            parser.append_markdown(raw);
        } else if !line.is_empty() {
            parser.feed(line);
        }
    }

    parser.finish()
}
