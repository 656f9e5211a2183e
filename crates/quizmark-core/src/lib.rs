//! quizmark-core — Markdown quiz parsing and JSON conversion.
//!
//! [`parser`] turns quiz Markdown into question records, [`convert`] wraps it
//! with the file I/O and timestamping, [`validate`] offers advisory checks.

pub mod config;
pub mod convert;
pub mod error;
pub mod model;
pub mod parser;
pub mod validate;
