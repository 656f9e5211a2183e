//! quizmark CLI — converts Markdown quizzes to JSON.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "quizmark", version, about = "Markdown quiz to JSON converter")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a Markdown quiz file (or a directory of them) to JSON
    Convert {
        /// Path to a .md file or a directory
        input: PathBuf,

        /// Directory for the generated JSON files
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Capture fenced code blocks into `question_markdown`
        #[arg(long)]
        code_blocks: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Check quiz files for authoring mistakes
    Validate {
        /// Path to a .md file or a directory
        input: PathBuf,

        /// Capture fenced code blocks into `question_markdown`
        #[arg(long)]
        code_blocks: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create a starter config and sample quiz
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quizmark=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Convert {
            input,
            output_dir,
            code_blocks,
            config,
        } => commands::convert::execute(input, output_dir, code_blocks, config),
        Commands::Validate {
            input,
            code_blocks,
            config,
        } => commands::validate::execute(input, code_blocks, config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
