mod batch;
mod error;
mod parser;
mod settings;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};

use settings::Settings;

#[derive(Parser)]
#[command(name = "exam_parser", about = "Convert extracted exam text into structured question records")]
struct Cli {
    /// Characters scanned for answer pairs when a file has no "Respostas:" marker
    #[arg(long, global = true)]
    key_window: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert every .txt file in a directory into a .json file
    Convert {
        /// Directory with extracted text (default: txt/)
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Directory for JSON output (default: json/)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Max files to convert (default: all)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// Parse one text file and print its records as JSON
    Parse {
        file: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let mut settings = Settings::load()?;
    if let Some(window) = cli.key_window {
        settings.key_window = window;
    }
    tracing::debug!(?settings, "configuration loaded");

    let result = match cli.command {
        Commands::Convert { input, output, limit } => {
            let input_dir = input.unwrap_or_else(|| settings.input_dir.clone());
            let output_dir = output.unwrap_or_else(|| settings.output_dir.clone());

            let inputs = batch::list_inputs(&input_dir, limit)?;
            if inputs.is_empty() {
                println!("No .txt files found in {}.", input_dir.display());
                return Ok(());
            }

            println!("Converting {} files...", inputs.len());
            let summary = batch::run(&inputs, &output_dir, &settings.parse_options())?;
            summary.print();
            println!("Output in {}", output_dir.display());
            Ok(())
        }
        Commands::Parse { file } => {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let doc = parser::parse_document(&text, &settings.parse_options());
            if doc.is_empty() {
                tracing::warn!(file = %file.display(), "no questions found");
            }
            println!("{}", serde_json::to_string_pretty(&doc.records)?);
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        eprintln!("\nDone in {}", format_duration(elapsed));
    }

    result
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
