//! The `quizmark init` command.

use anyhow::Result;

use quizmark_core::config::CONFIG_FILE_NAME;

const SAMPLE_QUIZ_NAME: &str = "sample-quiz.md";

pub fn execute() -> Result<()> {
    write_if_missing(CONFIG_FILE_NAME, SAMPLE_CONFIG)?;
    write_if_missing(SAMPLE_QUIZ_NAME, SAMPLE_QUIZ)?;

    println!("\nNext steps:");
    println!("  1. Edit {SAMPLE_QUIZ_NAME} or point quizmark at your own quiz");
    println!("  2. Run: quizmark validate {SAMPLE_QUIZ_NAME}");
    println!("  3. Run: quizmark convert {SAMPLE_QUIZ_NAME}");

    Ok(())
}

fn write_if_missing(path: &str, content: &str) -> Result<()> {
    if std::path::Path::new(path).exists() {
        println!("{path} already exists, skipping.");
    } else {
        std::fs::write(path, content)?;
        println!("Created {path}");
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizmark configuration

# Directory for generated JSON (default: current directory, or next to each
# source file when converting a directory).
# output_dir = "json"

# Store fenced ``` blocks in each question's `question_markdown` field.
capture_code_blocks = false

# Extensions picked up when converting a directory.
extensions = ["md"]
"#;

const SAMPLE_QUIZ: &str = r#"# Sample quiz

Anything before the first question header is ignored.

#### What is 2 + 2?
- [ ] 3
- [x] 4
- [ ] 5

#### Which planet is shown?
![planet](https://upload.wikimedia.org/wikipedia/commons/0/02/OSIRIS_Mars_true_color.jpg)
- [ ] Venus
- [x] Mars
- [ ] Jupiter

#### What does this print?
```rust
fn main() {
    println!("{}", 1 + 1);
}
```
- [x] 2
- [ ] 11
"#;
