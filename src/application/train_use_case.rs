// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates the full training pipeline in order:
//
//   Step 1: Validate the config                       (Layer 2)
//   Step 2: Prepare output dir, save config           (Layer 6 - infra)
//   Step 3: Load MNIST train + test                   (Layer 4 - data)
//   Step 4: Pick a random set of real test digits     (Layer 4 - data)
//   Step 5: Run the adversarial training loop         (Layer 5 - ml)
//   Step 6: Final report: real digits,
//           generated digits, confidence plot         (Layer 6 - infra)
//
// Reference: Rust Book §13 (Iterators and Closures)
//            Burn Book §5 (Training)

use anyhow::{bail, Result};
use burn::tensor::backend::Backend;
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::data::dataset::{random_subset, MnistImages, MNIST_SIDE};
use crate::domain::{image_grid::ImageGrid, traits::ImageSink};
use crate::infra::{
    checkpoint::CheckpointManager,
    metrics::MetricsLogger,
    visualize::{plot_confidence, PngGridSink},
};
use crate::ml::{
    sampler::Sampler,
    trainer::{run_training, TrainingSinks},
};

// ─── Training Configuration ──────────────────────────────────────────────────
// All hyperparameters for a training run.
// Serialisable so it can be saved next to the checkpoints and
// reloaded by the `sample` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub output_dir:   String,
    pub batch_size:   usize,
    pub epochs:       usize,
    pub lr:           f64,
    pub d_noise:      usize,
    pub d_hidden:     usize,
    pub dropout:      f64,
    pub report_every: usize,
    pub sample_count: usize,
    pub seed:         u64,
    pub num_workers:  usize,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            output_dir:   "checkpoints".to_string(),
            batch_size:   200,
            epochs:       200,
            lr:           2e-4,
            d_noise:      100,
            d_hidden:     256,
            dropout:      0.1,
            report_every: 50,
            sample_count: 16,
            seed:         42,
            num_workers:  1,
        }
    }
}

impl TrainConfig {
    /// Reject configurations that cannot produce a meaningful run.
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            bail!("batch_size must be at least 1");
        }
        if self.epochs == 0 {
            bail!("epochs must be at least 1");
        }
        if self.d_noise == 0 || self.d_hidden == 0 {
            bail!("d_noise and d_hidden must be at least 1");
        }
        if self.report_every == 0 {
            bail!("report_every must be at least 1");
        }
        if self.sample_count == 0 {
            bail!("sample_count must be at least 1");
        }
        if self.num_workers == 0 {
            bail!("num_workers must be at least 1");
        }
        if self.lr.is_nan() || self.lr <= 0.0 {
            bail!("lr must be positive, got {}", self.lr);
        }
        if !(0.0..1.0).contains(&self.dropout) {
            bail!("dropout must be in [0, 1), got {}", self.dropout);
        }
        Ok(())
    }
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    /// Execute the full training pipeline end to end
    pub fn execute(&self) -> Result<()> {
        let cfg = &self.config;

        // ── Step 1: Validate ──────────────────────────────────────────────────
        cfg.validate()?;

        // ── Step 2: Output directory + config ─────────────────────────────────
        let ckpt_manager = CheckpointManager::new(&cfg.output_dir)?;
        ckpt_manager.save_config(cfg)?;
        let metrics = MetricsLogger::new(&cfg.output_dir)?;
        let sink    = PngGridSink::new(ckpt_manager.dir()).with_nrow(grid_columns(cfg.sample_count));

        // ── Step 3: Load MNIST ────────────────────────────────────────────────
        // The first run downloads the IDX files into Burn's dataset cache.
        tracing::info!("Loading MNIST (downloaded on first use)");
        let train_dataset = MnistImages::train();
        let test_dataset  = MnistImages::test();

        // ── Step 4: Real digits for the final report ──────────────────────────
        // Picked up front because the test set is moved into its loader.
        let mut rng = StdRng::seed_from_u64(cfg.seed);
        let real_samples = random_subset(&test_dataset, cfg.sample_count, &mut rng);
        let real_grid = ImageGrid::new(
            MNIST_SIDE,
            real_samples.into_iter().map(|s| s.pixels).collect(),
        )?;

        // ── Step 5: Train ─────────────────────────────────────────────────────
        let outcome = run_training(
            cfg,
            train_dataset,
            test_dataset,
            TrainingSinks { checkpoints: &ckpt_manager, metrics: &metrics, images: &sink },
        )?;

        // ── Step 6: Final report ──────────────────────────────────────────────
        write_final_grids(&sink, &real_grid, &outcome.sampler, cfg.sample_count)?;
        plot_confidence(&outcome.trace, &ckpt_manager.dir().join("confidence.png"))?;

        if let Some(last) = outcome.trace.latest() {
            println!(
                "Final discriminator confidence: D(x_real)={:.4}, D(x_generated)={:.4}",
                last.p_real, last.p_fake,
            );
        }

        Ok(())
    }
}

/// Real and generated digits for the final report.
/// Written before the confidence chart so a plotting failure cannot lose them.
pub fn write_final_grids<B: Backend>(
    sink:    &dyn ImageSink,
    real:    &ImageGrid,
    sampler: &Sampler<B>,
    count:   usize,
) -> Result<()> {
    if !real.is_empty() {
        let path = sink.write_grid("real_samples", real)?;
        tracing::info!("Wrote real test digits to '{}'", path.display());
    }

    let generated = sampler.generate(count)?;
    let path = sink.write_grid("final_samples", &generated)?;
    tracing::info!("Wrote generated digits to '{}'", path.display());
    Ok(())
}

/// Roughly square grids: 16 samples → 4 per row.
pub fn grid_columns(count: usize) -> usize {
    ((count as f64).sqrt().ceil() as usize).max(1)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(TrainConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_values() {
        let bad = [
            TrainConfig { batch_size: 0,      ..TrainConfig::default() },
            TrainConfig { epochs: 0,          ..TrainConfig::default() },
            TrainConfig { d_noise: 0,         ..TrainConfig::default() },
            TrainConfig { report_every: 0,    ..TrainConfig::default() },
            TrainConfig { sample_count: 0,    ..TrainConfig::default() },
            TrainConfig { num_workers: 0,     ..TrainConfig::default() },
            TrainConfig { lr: 0.0,            ..TrainConfig::default() },
            TrainConfig { lr: f64::NAN,       ..TrainConfig::default() },
            TrainConfig { dropout: 1.0,       ..TrainConfig::default() },
        ];
        for cfg in bad {
            assert!(cfg.validate().is_err(), "{cfg:?} should be rejected");
        }
    }

    #[test]
    fn test_config_json_round_trip() {
        let cfg  = TrainConfig { seed: 7, ..TrainConfig::default() };
        let json = serde_json::to_string(&cfg).unwrap();
        let back: TrainConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.seed, 7);
        assert_eq!(back.batch_size, 200);
    }

    #[test]
    fn test_grid_columns() {
        assert_eq!(grid_columns(16), 4);
        assert_eq!(grid_columns(10), 4);
        assert_eq!(grid_columns(1), 1);
        assert_eq!(grid_columns(0), 1);
    }

    #[test]
    fn test_final_grids_are_written() {
        use burn::backend::NdArray;

        use crate::data::dataset::MNIST_PIXELS;
        use crate::ml::model::gan_configs;

        let dir = std::env::temp_dir().join(format!("mnist-gan-final-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        let sink = PngGridSink::new(&dir).with_nrow(grid_columns(4));

        let device = Default::default();
        let (g_cfg, _) = gan_configs(8, 16, 0.0);
        let sampler = Sampler::<NdArray>::new(g_cfg.init(&device), 8, device);
        let real    = ImageGrid::new(MNIST_SIDE, vec![vec![0.0; MNIST_PIXELS]; 3]).unwrap();

        write_final_grids(&sink, &real, &sampler, 4).unwrap();
        assert!(dir.join("real_samples.png").is_file());
        assert!(dir.join("final_samples.png").is_file());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
