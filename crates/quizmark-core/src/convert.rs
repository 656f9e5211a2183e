//! File-level conversion: read a Markdown quiz, parse it, stamp it with the
//! file's modification time and write the JSON next to it.

use std::path::{Path, PathBuf};

use chrono::{DateTime, SubsecRound, Utc};

use crate::error::ConvertError;
use crate::model::ConversionResult;
use crate::parser::{parse_document, ParseOptions};

/// Extension of the generated output file.
pub const OUTPUT_EXTENSION: &str = "json";

/// Output file name for an input: `<stem>.json`.
pub fn output_file_name(input: &Path) -> String {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("{stem}.{OUTPUT_EXTENSION}")
}

/// Where the JSON for `input` goes: inside `output_dir` if given, otherwise
/// in the current directory.
pub fn output_path_for(input: &Path, output_dir: Option<&Path>) -> PathBuf {
    let name = output_file_name(input);
    match output_dir {
        Some(dir) => dir.join(name),
        None => PathBuf::from(name),
    }
}

/// Output path next to the source file, used for directory batches.
pub fn sibling_output_path(input: &Path) -> PathBuf {
    input.with_file_name(output_file_name(input))
}

/// Output path for `file` found under `root` during a directory batch,
/// keeping its relative location below `output_dir`.
pub fn mirrored_output_path(root: &Path, file: &Path, output_dir: &Path) -> PathBuf {
    let relative = file.strip_prefix(root).unwrap_or(file);
    output_dir.join(relative.with_file_name(output_file_name(file)))
}

/// Last-modified time of a file, truncated to the millisecond precision it
/// is written with.
pub fn modified_at(path: &Path) -> Result<DateTime<Utc>, ConvertError> {
    let metadata = std::fs::metadata(path).map_err(|source| ConvertError::Metadata {
        path: path.to_path_buf(),
        source,
    })?;
    let modified = metadata.modified().map_err(|source| ConvertError::Metadata {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(DateTime::<Utc>::from(modified).trunc_subsecs(3))
}

/// Read and convert one Markdown quiz file.
pub fn convert_file(path: &Path, options: &ParseOptions) -> Result<ConversionResult, ConvertError> {
    let content = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            ConvertError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ConvertError::Read {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    let updated_at = modified_at(path)?;

    let questions = parse_document(&content, options);
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    tracing::info!(
        file = %path.display(),
        questions = questions.len(),
        "parsed markdown quiz"
    );

    Ok(ConversionResult::new(name, questions, updated_at))
}

/// Convert `input` and write the JSON to `output`.
pub fn convert_and_write(
    input: &Path,
    output: &Path,
    options: &ParseOptions,
) -> Result<ConversionResult, ConvertError> {
    let result = convert_file(input, options)?;
    result.save_json(output)?;
    tracing::debug!(output = %output.display(), "wrote json");
    Ok(result)
}

/// Recursively collect files under `dir` whose extension is one of
/// `extensions`, sorted by path.
pub fn collect_markdown_files(
    dir: &Path,
    extensions: &[String],
) -> Result<Vec<PathBuf>, ConvertError> {
    let mut files = Vec::new();
    walk(dir, extensions, &mut files)?;
    files.sort();
    Ok(files)
}

fn walk(dir: &Path, extensions: &[String], files: &mut Vec<PathBuf>) -> Result<(), ConvertError> {
    let entries = std::fs::read_dir(dir).map_err(|source| ConvertError::Read {
        path: dir.to_path_buf(),
        source,
    })?;

    for entry in entries {
        let entry = entry.map_err(|source| ConvertError::Read {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        let file_type = entry.file_type().map_err(|source| ConvertError::Read {
            path: path.clone(),
            source,
        })?;

        if file_type.is_dir() {
            walk(&path, extensions, files)?;
        } else if file_type.is_symlink() && path.is_dir() {
            tracing::debug!(path = %path.display(), "not following directory symlink");
        } else if path
            .extension()
            .is_some_and(|ext| extensions.iter().any(|e| ext == e.as_str()))
        {
            files.push(path);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUIZ: &str = "# Arithmetic\n\n#### What is 2+2?\n- [ ] 3\n- [x] 4\n- [ ] 5\n\n#### Pick a shape\n![shape](http://x/img.png)\n- [x] circle\n";

    #[test]
    fn output_names() {
        assert_eq!(output_file_name(Path::new("dir/quiz.md")), "quiz.json");
        assert_eq!(output_file_name(Path::new("notes.txt")), "notes.json");
        assert_eq!(output_file_name(Path::new("README")), "README.json");
        assert_eq!(
            output_path_for(Path::new("a/b/quiz.md"), None),
            PathBuf::from("quiz.json")
        );
        assert_eq!(
            output_path_for(Path::new("a/b/quiz.md"), Some(Path::new("out"))),
            PathBuf::from("out/quiz.json")
        );
        assert_eq!(
            sibling_output_path(Path::new("a/b/quiz.md")),
            PathBuf::from("a/b/quiz.json")
        );
    }

    #[test]
    fn convert_file_stamps_every_question() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("arith.md");
        std::fs::write(&path, QUIZ).unwrap();

        let result = convert_file(&path, &ParseOptions::default()).unwrap();
        assert_eq!(result.name_of_markdown, "arith.md");
        assert_eq!(result.questions.len(), 2);
        assert_eq!(result.questions[0].record.correct_answer, 1);
        assert_eq!(result.questions[1].record.picture_url, "http://x/img.png");

        let mtime = modified_at(&path).unwrap();
        assert!(result.questions.iter().all(|q| q.updated_at == mtime));
    }

    #[test]
    fn conversion_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("arith.md");
        std::fs::write(&path, QUIZ).unwrap();

        let first = convert_file(&path, &ParseOptions::default()).unwrap();
        let second = convert_file(&path, &ParseOptions::default()).unwrap();
        assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
    }

    #[test]
    fn convert_and_write_creates_json() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("arith.md");
        let output = dir.path().join("out").join("arith.json");
        std::fs::write(&input, QUIZ).unwrap();

        let written = convert_and_write(&input, &output, &ParseOptions::default()).unwrap();
        let loaded = ConversionResult::load_json(&output).unwrap();
        assert_eq!(loaded, written);
    }

    #[test]
    fn missing_input_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = convert_file(&dir.path().join("nope.md"), &ParseOptions::default()).unwrap_err();
        assert!(matches!(err, ConvertError::NotFound { .. }));
        assert!(err.is_not_found());
    }

    #[test]
    fn non_utf8_input_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bin.md");
        std::fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();
        let err = convert_file(&path, &ParseOptions::default()).unwrap_err();
        assert!(matches!(err, ConvertError::Read { .. }));
    }

    #[test]
    fn unreadable_input_keeps_io_message() {
        let dir = tempfile::tempdir().unwrap();
        let err = convert_file(dir.path(), &ParseOptions::default()).unwrap_err();
        assert!(matches!(err, ConvertError::Read { .. }));
        assert!(!err.is_not_found());
    }

    #[test]
    fn mirrored_paths_keep_subdirectories() {
        let root = Path::new("quizzes");
        let out = Path::new("out");
        assert_eq!(
            mirrored_output_path(root, Path::new("quizzes/a/quiz.md"), out),
            PathBuf::from("out/a/quiz.json")
        );
        assert_eq!(
            mirrored_output_path(root, Path::new("quizzes/b/quiz.md"), out),
            PathBuf::from("out/b/quiz.json")
        );
        assert_eq!(
            mirrored_output_path(root, Path::new("quizzes/top.md"), out),
            PathBuf::from("out/top.json")
        );
    }

    #[cfg(unix)]
    #[test]
    fn directory_symlink_loops_are_not_followed() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("sub")).unwrap();
        std::fs::write(dir.path().join("sub/q.md"), "").unwrap();
        std::os::unix::fs::symlink(dir.path(), dir.path().join("sub/loop")).unwrap();

        let files = collect_markdown_files(dir.path(), &["md".to_string()]).unwrap();
        assert_eq!(files, vec![dir.path().join("sub/q.md")]);
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_markdown_files_are_collected() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("real.md"), "").unwrap();
        std::os::unix::fs::symlink(dir.path().join("real.md"), dir.path().join("link.md")).unwrap();

        let files = collect_markdown_files(dir.path(), &["md".to_string()]).unwrap();
        assert_eq!(
            files,
            vec![dir.path().join("link.md"), dir.path().join("real.md")]
        );
    }

    #[test]
    fn collects_nested_markdown_sorted() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("sub/deeper")).unwrap();
        std::fs::write(dir.path().join("b.md"), "").unwrap();
        std::fs::write(dir.path().join("a.md"), "").unwrap();
        std::fs::write(dir.path().join("skip.txt"), "").unwrap();
        std::fs::write(dir.path().join("sub/deeper/c.md"), "").unwrap();

        let files = collect_markdown_files(dir.path(), &["md".to_string()]).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            names,
            vec![
                PathBuf::from("a.md"),
                PathBuf::from("b.md"),
                PathBuf::from("sub/deeper/c.md"),
            ]
        );
    }
}
