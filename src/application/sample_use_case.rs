// ============================================================
// Layer 2 — Sample Use Case
// ============================================================
// Loads the latest generator checkpoint and writes a grid of
// freshly generated digits:
//   1. Read train_config.json to rebuild the generator
//   2. Load the newest generator weights
//   3. Draw `count` noise vectors → images
//   4. Tile them into one PNG

use anyhow::Result;
use std::path::PathBuf;

use crate::application::train_use_case::grid_columns;
use crate::infra::{checkpoint::CheckpointManager, visualize::PngGridSink};
use crate::ml::{sampler::Sampler, trainer::EvalBackend};

pub struct SampleUseCase {
    checkpoint_dir: String,
    output:         PathBuf,
    count:          usize,
    seed:           Option<u64>,
}

impl SampleUseCase {
    pub fn new(checkpoint_dir: String, output: PathBuf, count: usize, seed: Option<u64>) -> Self {
        Self { checkpoint_dir, output, count, seed }
    }

    /// Generate and save the grid; returns where it was written.
    pub fn execute(&self) -> Result<PathBuf> {
        anyhow::ensure!(self.count > 0, "count must be at least 1");

        if let Some(seed) = self.seed {
            <EvalBackend as burn::tensor::backend::Backend>::seed(seed);
        }

        let ckpt    = CheckpointManager::open(&self.checkpoint_dir)?;
        let device  = burn::backend::wgpu::WgpuDevice::default();
        let sampler = Sampler::<EvalBackend>::from_checkpoint(&ckpt, device)?;

        let grid = sampler.generate(self.count)?;
        PngGridSink::new(&self.checkpoint_dir)
            .with_nrow(grid_columns(self.count))
            .save(&grid, &self.output)?;

        tracing::info!("Wrote {} generated digits to '{}'", grid.len(), self.output.display());
        Ok(self.output.clone())
    }
}
