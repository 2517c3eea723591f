use std::path::PathBuf;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::parser::answer_key::DEFAULT_KEY_WINDOW;
use crate::parser::sanitize::DEFAULT_NOISE_FRAGMENTS;
use crate::parser::ParseOptions;

const CONFIG_FILE: &str = "exam_parser";
const ENV_PREFIX: &str = "EXAM";

/// Defaults, then `exam_parser.toml`, then `EXAM_*` variables.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub key_window: usize,
    pub noise_fragments: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            input_dir: PathBuf::from("txt"),
            output_dir: PathBuf::from("json"),
            key_window: DEFAULT_KEY_WINDOW,
            noise_fragments: DEFAULT_NOISE_FRAGMENTS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self> {
        Config::builder()
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("noise_fragments"),
            )
            .build()
            .context("loading configuration")?
            .try_deserialize()
            .context("invalid configuration")
    }

    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            key_window: self.key_window,
            noise_fragments: self.noise_fragments.clone(),
        }
    }
}
