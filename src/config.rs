use std::{env, fs};

use anyhow::{ensure, Context};
use serde::Deserialize;

/// Environment variable holding the path of a JSON configuration file.
pub const CONFIG_PATH_VAR: &str = "LSTM_BENCH_CONFIG";

/// Environment variable holding the seed of the weight generator.
pub const SEED_VAR: &str = "SEED";

/// Parameters of a benchmark run.
///
/// Every field is optional in the JSON file, missing ones take the default value.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BenchConfig {
    /// First sequence length to time.
    pub start: usize,
    /// Last sequence length to time, inclusive.
    pub end: usize,
    pub step: usize,

    pub input_size: usize,
    pub hidden_size: usize,
    pub output_size: usize,
    /// Amount of stacked LSTM cells before the projection.
    pub lstm_layers: usize,

    /// Seed for the weight generator, the OS is used when missing.
    pub seed: Option<u64>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            start: 100,
            end: 1000,
            step: 100,
            input_size: 129,
            hidden_size: 300,
            output_size: 2580,
            lstm_layers: 4,
            seed: None,
        }
    }
}

impl BenchConfig {
    /// Loads the configuration.
    ///
    /// Starts from the defaults, replaced by the JSON file at `$LSTM_BENCH_CONFIG` if set, and
    /// finally overrides the seed with `$SEED` if set.
    ///
    /// # Errors
    /// If the file can't be read or parsed, the seed is not a `u64`, or the resulting
    /// configuration is invalid.
    pub fn load() -> anyhow::Result<Self> {
        let mut config = match env::var(CONFIG_PATH_VAR) {
            Ok(path) => {
                let content =
                    fs::read_to_string(&path).with_context(|| format!("cannot read '{path}'"))?;
                Self::from_json(&content).with_context(|| format!("invalid config '{path}'"))?
            }
            Err(_) => Self::default(),
        };

        if let Ok(seed) = env::var(SEED_VAR) {
            let seed = seed
                .parse()
                .with_context(|| format!("{SEED_VAR} must be an unsigned integer, got '{seed}'"))?;
            config.seed = Some(seed);
        }

        config.validate()?;
        Ok(config)
    }

    /// Parses a configuration from JSON, missing fields take the default value.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Checks that every size is positive and the sequence range is not empty.
    ///
    /// # Errors
    /// Describing the first invalid field.
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(self.start > 0, "start must be positive");
        ensure!(self.step > 0, "step must be positive");
        ensure!(
            self.start <= self.end,
            "start ({}) must not exceed end ({})",
            self.start,
            self.end
        );
        ensure!(self.input_size > 0, "input_size must be positive");
        ensure!(self.hidden_size > 0, "hidden_size must be positive");
        ensure!(self.output_size > 0, "output_size must be positive");
        ensure!(self.lstm_layers > 0, "lstm_layers must be positive");
        Ok(())
    }

    /// The sequence lengths to time, `start..=end` by `step`.
    pub fn sequence_lengths(&self) -> impl Iterator<Item = usize> {
        (self.start..=self.end).step_by(self.step.max(1))
    }
}
