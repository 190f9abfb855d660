// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the two subcommands: `train` and `sample`
// and all their configurable flags.
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::application::train_use_case::TrainConfig;

/// The two top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train the GAN on MNIST (downloaded on first use)
    Train(TrainArgs),

    /// Draw digits from the latest generator checkpoint
    Sample(SampleArgs),
}

/// All arguments for the `train` command.
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Directory for checkpoints, metrics, sample grids and plots
    #[arg(long, default_value = "checkpoints")]
    pub output_dir: String,

    /// Number of images processed together in one step
    #[arg(long, default_value_t = 200)]
    pub batch_size: usize,

    /// Number of full passes through the training set
    #[arg(long, default_value_t = 200)]
    pub epochs: usize,

    /// Adam learning rate, shared by both networks
    #[arg(long, default_value_t = 2e-4)]
    pub lr: f64,

    /// Length of the latent noise vector fed to the generator
    #[arg(long, default_value_t = 100)]
    pub d_noise: usize,

    /// Width of the hidden layers in both networks
    #[arg(long, default_value_t = 256)]
    pub d_hidden: usize,

    /// Dropout probability after each hidden layer
    #[arg(long, default_value_t = 0.1)]
    pub dropout: f64,

    /// Print progress and write a sample grid every N epochs
    #[arg(long, default_value_t = 50)]
    pub report_every: usize,

    /// Number of digits in each sample grid
    #[arg(long, default_value_t = 16)]
    pub sample_count: usize,

    /// Seed for weight init, noise and shuffling
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Worker threads used by the data loaders
    #[arg(long, default_value_t = 1)]
    pub num_workers: usize,
}

/// Convert CLI TrainArgs into the application-layer TrainConfig.
/// The application layer never sees clap types.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            output_dir:   a.output_dir,
            batch_size:   a.batch_size,
            epochs:       a.epochs,
            lr:           a.lr,
            d_noise:      a.d_noise,
            d_hidden:     a.d_hidden,
            dropout:      a.dropout,
            report_every: a.report_every,
            sample_count: a.sample_count,
            seed:         a.seed,
            num_workers:  a.num_workers,
        }
    }
}

/// All arguments for the `sample` command
#[derive(Args, Debug)]
pub struct SampleArgs {
    /// Directory where `train` saved its checkpoints
    #[arg(long, default_value = "checkpoints")]
    pub checkpoint_dir: String,

    /// Number of digits to generate
    #[arg(long, default_value_t = 16)]
    pub count: usize,

    /// Where to write the PNG grid
    #[arg(long, default_value = "samples.png")]
    pub output: PathBuf,

    /// Fix the noise for reproducible grids
    #[arg(long)]
    pub seed: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;

    #[test]
    fn test_train_defaults_match_config_defaults() {
        let cli = Cli::parse_from(["mnist-gan", "train"]);
        let Commands::Train(args) = cli.command else {
            panic!("expected train");
        };
        let cfg: TrainConfig = args.into();
        let def = TrainConfig::default();

        assert_eq!(cfg.batch_size, def.batch_size);
        assert_eq!(cfg.epochs, def.epochs);
        assert_eq!(cfg.d_noise, def.d_noise);
        assert_eq!(cfg.d_hidden, def.d_hidden);
        assert_eq!(cfg.report_every, def.report_every);
        assert_eq!(cfg.output_dir, def.output_dir);
        assert!((cfg.lr - def.lr).abs() < 1e-12);
    }

    #[test]
    fn test_sample_flags() {
        let cli = Cli::parse_from([
            "mnist-gan", "sample", "--count", "9", "--output", "out/grid.png", "--seed", "3",
        ]);
        let Commands::Sample(args) = cli.command else {
            panic!("expected sample");
        };
        assert_eq!(args.count, 9);
        assert_eq!(args.output, PathBuf::from("out/grid.png"));
        assert_eq!(args.seed, Some(3));
        assert_eq!(args.checkpoint_dir, "checkpoints");
    }
}
