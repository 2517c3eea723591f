use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::error::{BatchError, Result};
use crate::parser::{self, ParseOptions};

const INPUT_EXT: &str = "txt";
const OUTPUT_EXT: &str = "json";

/// What happened to one input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentOutcome {
    Converted {
        output: PathBuf,
        questions: usize,
        answered: usize,
    },
    NoQuestions,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    pub documents: usize,
    pub converted: usize,
    pub empty: usize,
    pub failed: usize,
    pub questions: usize,
    pub answered: usize,
}

impl BatchSummary {
    fn add(&mut self, outcome: &Result<DocumentOutcome>) {
        self.documents += 1;
        match outcome {
            Ok(DocumentOutcome::Converted {
                questions,
                answered,
                ..
            }) => {
                self.converted += 1;
                self.questions += questions;
                self.answered += answered;
            }
            Ok(DocumentOutcome::NoQuestions) => self.empty += 1,
            Err(_) => self.failed += 1,
        }
    }

    pub fn print(&self) {
        println!(
            "Converted {} of {} files ({} without questions, {} failed).",
            self.converted, self.documents, self.empty, self.failed,
        );
        println!(
            "Extracted {} questions, {} with an answer from the key.",
            self.questions, self.answered,
        );
    }
}

/// `.txt` files directly under `dir`, sorted by name. A missing directory
/// yields no files.
pub fn list_inputs(dir: &Path, limit: Option<usize>) -> Result<Vec<PathBuf>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!(dir = %dir.display(), "input directory does not exist");
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(BatchError::ListDir {
                path: dir.to_path_buf(),
                source,
            })
        }
    };

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| match entry {
            Ok(e) => Some(e.path()),
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "skipping unreadable directory entry");
                None
            }
        })
        .filter(|p| p.is_file() && has_input_ext(p))
        .collect();
    files.sort();

    if let Some(n) = limit {
        files.truncate(n);
    }
    Ok(files)
}

fn has_input_ext(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(INPUT_EXT))
}

/// Same base name, `.json` extension, inside `output_dir`.
pub fn output_path(input: &Path, output_dir: &Path) -> PathBuf {
    let mut name = input.file_stem().unwrap_or(input.as_os_str()).to_os_string();
    name.push(".");
    name.push(OUTPUT_EXT);
    output_dir.join(name)
}

/// Parse one text file and write its records. Nothing is written when the
/// document has no questions.
pub fn convert_file(input: &Path, output_dir: &Path, opts: &ParseOptions) -> Result<DocumentOutcome> {
    let text = fs::read_to_string(input).map_err(|source| BatchError::Read {
        path: input.to_path_buf(),
        source,
    })?;

    let doc = parser::parse_document(&text, opts);
    debug!(
        file = %input.display(),
        key_source = ?doc.key_source,
        key_entries = doc.key.len(),
        dropped_blocks = doc.dropped_blocks,
        "parsed document"
    );
    if doc.is_empty() {
        return Ok(DocumentOutcome::NoQuestions);
    }

    let output = output_path(input, output_dir);
    let json = serde_json::to_string_pretty(&doc.records).map_err(|source| BatchError::Serialize {
        path: output.clone(),
        source,
    })?;
    fs::write(&output, json).map_err(|source| BatchError::Write {
        path: output.clone(),
        source,
    })?;

    Ok(DocumentOutcome::Converted {
        output,
        questions: doc.records.len(),
        answered: doc.answered(),
    })
}

/// Convert every input file in parallel. A failing file is counted and
/// logged, never fatal for the rest.
pub fn run(inputs: &[PathBuf], output_dir: &Path, opts: &ParseOptions) -> Result<BatchSummary> {
    fs::create_dir_all(output_dir).map_err(|source| BatchError::CreateDir {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );

    let outcomes: Vec<_> = inputs
        .par_iter()
        .map(|input| {
            let outcome = convert_file(input, output_dir, opts);
            pb.inc(1);
            outcome
        })
        .collect();
    pb.finish_and_clear();

    let mut summary = BatchSummary::default();
    for (input, outcome) in inputs.iter().zip(&outcomes) {
        match outcome {
            Ok(DocumentOutcome::Converted { output, questions, .. }) => {
                info!(file = %input.display(), questions, output = %output.display(), "converted");
            }
            Ok(DocumentOutcome::NoQuestions) => {
                warn!(file = %input.display(), "no questions found");
            }
            Err(e) => {
                warn!(file = %input.display(), error = %e, "conversion failed");
            }
        }
        summary.add(outcome);
    }

    Ok(summary)
}
