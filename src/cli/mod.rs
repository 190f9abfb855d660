// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction, parsed with `clap`.
// All work is delegated to Layer 2 (application).
//
// Two commands are supported:
//   1. `train`  — trains the GAN on MNIST
//   2. `sample` — loads a checkpoint and writes generated digits
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, SampleArgs, TrainArgs};

#[derive(Parser, Debug)]
#[command(
    name = "mnist-gan",
    version,
    about = "Train a basic GAN on MNIST digits, then sample from the generator."
)]
pub struct Cli {
    /// The subcommand to run (train or sample)
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Train(args)  => run_train(args),
            Commands::Sample(args) => run_sample(args),
        }
    }
}

fn run_train(args: TrainArgs) -> Result<()> {
    use crate::application::train_use_case::TrainUseCase;

    tracing::info!("Starting training, writing results to: {}", args.output_dir);

    let use_case = TrainUseCase::new(args.into());
    use_case.execute()?;

    println!("Training complete. Checkpoints and plots saved.");
    Ok(())
}

fn run_sample(args: SampleArgs) -> Result<()> {
    use crate::application::sample_use_case::SampleUseCase;

    let use_case = SampleUseCase::new(args.checkpoint_dir, args.output, args.count, args.seed);
    let path = use_case.execute()?;

    println!("Samples written to {}", path.display());
    Ok(())
}
