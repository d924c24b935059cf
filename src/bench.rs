use std::time::{Duration, Instant};

use anyhow::ensure;
use log::debug;
use matrix::{initialization::WeightGen, Matrix};
use recurrent::{DenseConfig, Layer, LstmConfig, Sequential};

use crate::config::BenchConfig;

/// The timing of a single stacked forward pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Run {
    pub sequence_size: usize,
    pub latency: Duration,
}

/// Builds `lstm_layers` stacked cells followed by the projection, all sized for
/// `sequence_size` timesteps.
pub fn build_model<W: WeightGen + ?Sized>(
    config: &BenchConfig,
    sequence_size: usize,
    weight_gen: &mut W,
) -> Sequential {
    let first = LstmConfig::new(config.input_size, config.hidden_size, sequence_size);
    let inner = LstmConfig::new(config.hidden_size, config.hidden_size, sequence_size);
    let projection = DenseConfig::new(config.hidden_size, config.output_size, sequence_size);

    let lstms: Vec<_> = (0..config.lstm_layers)
        .map(|i| {
            let lstm_config = if i == 0 { first } else { inner };
            Layer::lstm(lstm_config, weight_gen)
        })
        .collect();

    let dense = Layer::dense(projection, weight_gen);
    Sequential::new(lstms.into_iter().chain([dense]))
}

/// Builds a fresh model and input for `sequence_size` and times one forward pass.
///
/// Only the forward pass is timed, construction is not.
///
/// # Errors
/// If the forward pass fails or its output isn't `[sequence_size, output_size]`.
pub fn run<W: WeightGen + ?Sized>(
    config: &BenchConfig,
    sequence_size: usize,
    weight_gen: &mut W,
) -> anyhow::Result<Run> {
    let mut model = build_model(config, sequence_size, weight_gen);
    let input = Matrix::from_gen(sequence_size, config.input_size, weight_gen);

    let start = Instant::now();
    let output = model.forward(&input)?;
    let latency = start.elapsed();

    let expected = (sequence_size, config.output_size);
    ensure!(
        output.shape() == expected,
        "output shape {:?} differs from expected {expected:?}",
        output.shape()
    );

    debug!(sequence_size = sequence_size; "forward pass took {latency:?}");
    Ok(Run {
        sequence_size,
        latency,
    })
}

/// Aggregated latencies over several runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub runs: usize,
    pub min: Duration,
    pub max: Duration,
    pub mean: Duration,
}

impl Summary {
    /// Summarizes `runs`, `None` if there are none.
    pub fn from_runs(runs: &[Run]) -> Option<Self> {
        let min = runs.iter().map(|r| r.latency).min()?;
        let max = runs.iter().map(|r| r.latency).max()?;
        let total: Duration = runs.iter().map(|r| r.latency).sum();

        Some(Self {
            runs: runs.len(),
            min,
            max,
            mean: total / u32::try_from(runs.len()).ok()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use matrix::initialization::RandWeightGen;

    use super::*;

    fn small_config() -> BenchConfig {
        BenchConfig {
            start: 3,
            end: 6,
            step: 3,
            input_size: 5,
            hidden_size: 4,
            output_size: 7,
            lstm_layers: 2,
            seed: Some(1),
        }
    }

    #[test]
    fn model_layout() {
        let config = small_config();
        let model = build_model(&config, 3, &mut RandWeightGen::seeded(1));

        let widths: Vec<_> = model.layers().iter().map(Layer::output_size).collect();
        assert_eq!(widths, [4, 4, 7]);
    }

    #[test]
    fn run_produces_timing() {
        let config = small_config();
        let mut weight_gen = RandWeightGen::seeded(1);

        let runs: Vec<_> = config
            .sequence_lengths()
            .map(|len| run(&config, len, &mut weight_gen).unwrap())
            .collect();

        let lengths: Vec<_> = runs.iter().map(|r| r.sequence_size).collect();
        assert_eq!(lengths, [3, 6]);
    }

    #[test]
    fn summary() {
        let runs = [
            Run {
                sequence_size: 1,
                latency: Duration::from_millis(10),
            },
            Run {
                sequence_size: 2,
                latency: Duration::from_millis(30),
            },
        ];

        let summary = Summary::from_runs(&runs).unwrap();

        assert_eq!(summary.runs, 2);
        assert_eq!(summary.min, Duration::from_millis(10));
        assert_eq!(summary.max, Duration::from_millis(30));
        assert_eq!(summary.mean, Duration::from_millis(20));
        assert!(Summary::from_runs(&[]).is_none());
    }

    #[test]
    fn summary_mean_is_not_truncated() {
        let runs: Vec<_> = (1..=3)
            .map(|i| Run {
                sequence_size: i,
                latency: Duration::from_millis(i as u64),
            })
            .collect();

        assert_eq!(Summary::from_runs(&runs).unwrap().mean, Duration::from_millis(2));
    }
}
