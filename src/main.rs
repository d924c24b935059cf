mod bench;
mod config;

use anyhow::Context;
use log::info;
use matrix::initialization::{RandWeightGen, WeightGen};

use crate::{
    bench::{Run, Summary},
    config::BenchConfig,
};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = BenchConfig::load()?;
    info!("running with {config:?}");

    let mut weight_gen: Box<dyn WeightGen> = match config.seed {
        Some(seed) => Box::new(RandWeightGen::seeded(seed)),
        None => Box::new(RandWeightGen::from_os_rng()),
    };

    let mut runs: Vec<Run> = Vec::new();
    for sequence_size in config.sequence_lengths() {
        let run = bench::run(&config, sequence_size, &mut weight_gen)
            .with_context(|| format!("forward pass failed for sequence length {sequence_size}"))?;

        println!("Current Sequence Length: {sequence_size}");
        println!("Runtime latency: {:.6}", run.latency.as_secs_f64());
        runs.push(run);
    }

    if let Some(summary) = Summary::from_runs(&runs) {
        info!(
            "{} runs, min {:?}, max {:?}, mean {:?}",
            summary.runs, summary.min, summary.max, summary.mean
        );
    }

    println!("done");
    Ok(())
}
