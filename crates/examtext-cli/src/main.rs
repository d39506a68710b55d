//! examtext CLI — parse, grade, and render generated exams.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "examtext", version, about = "Exam text parser and grader")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the questions / answers / references sections as JSON
    Sections {
        /// Exam text file
        #[arg(long)]
        input: PathBuf,
    },

    /// Parse an exam text file into a structured model
    Parse {
        /// Exam text file
        #[arg(long)]
        input: PathBuf,

        /// Output format: text, json, markdown
        #[arg(long)]
        format: Option<String>,
    },

    /// Build a model from a generation endpoint response
    Ingest {
        /// Response JSON file
        #[arg(long)]
        response: PathBuf,
    },

    /// Grade a learner's answers against an exam
    Grade {
        /// Exam text file
        #[arg(long)]
        input: PathBuf,

        /// Answers JSON file, e.g. {"1": "B", "2": "free text"}
        #[arg(long)]
        answers: PathBuf,

        /// Output format: text, json
        #[arg(long)]
        format: Option<String>,
    },

    /// Render an exam (and optionally its results) as HTML
    Render {
        /// Exam text file
        #[arg(long)]
        input: PathBuf,

        /// Output HTML file (default: <output_dir>/<input stem>.html)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Answers JSON file; when given, results and the answer key are shown
        #[arg(long)]
        answers: Option<PathBuf>,

        /// Page title (default: input file stem)
        #[arg(long)]
        title: Option<String>,
    },

    /// Check a parsed exam for common authoring issues
    Validate {
        /// Exam text file
        #[arg(long)]
        input: PathBuf,
    },

    /// Create a starter config and sample exam
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("examtext=info".parse().expect("valid directive")),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.config;

    let result = match cli.command {
        Commands::Sections { input } => commands::parse::sections(input),
        Commands::Parse { input, format } => commands::parse::execute(input, format, config),
        Commands::Ingest { response } => commands::ingest::execute(response),
        Commands::Grade {
            input,
            answers,
            format,
        } => commands::grade::execute(input, answers, format, config),
        Commands::Render {
            input,
            output,
            answers,
            title,
        } => commands::render::execute(input, output, answers, title, config),
        Commands::Validate { input } => commands::validate::execute(input),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
