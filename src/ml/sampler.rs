// ============================================================
// Layer 5 — Sampler
// ============================================================
// Turns a trained generator into pictures.
//
//   z ~ U[0, 1)^(count × d_noise)  →  G(z)  →  ImageGrid (28x28)
//
// Used twice: by the training loop for the periodic and final
// grids, and by the `sample` command after rebuilding the
// generator from a checkpoint. Dropout is always 0 here.
use anyhow::{anyhow, Result};
use burn::prelude::*;

use crate::data::{dataset::MNIST_SIDE, noise::sample_noise};
use crate::domain::image_grid::ImageGrid;
use crate::infra::checkpoint::CheckpointManager;
use crate::ml::model::{gan_configs, Generator};

/// Draws digits from a generator that is no longer being trained.
pub struct Sampler<B: Backend> {
    generator: Generator<B>,
    d_noise:   usize,
    device:    B::Device,
}

impl<B: Backend> Sampler<B> {
    pub fn new(generator: Generator<B>, d_noise: usize, device: B::Device) -> Self {
        Self { generator, d_noise, device }
    }

    /// Rebuild the generator from the saved config and load the latest weights.
    pub fn from_checkpoint(ckpt_manager: &CheckpointManager, device: B::Device) -> Result<Self> {
        let cfg = ckpt_manager.load_config()?;
        let (g_cfg, _) = gan_configs(cfg.d_noise, cfg.d_hidden, 0.0);
        let generator: Generator<B> = g_cfg.init(&device);
        let generator = ckpt_manager.load_generator(generator, &device)?;
        tracing::info!("Generator loaded from checkpoint");
        Ok(Self::new(generator, cfg.d_noise, device))
    }

    /// Generate `count` images in [-1, 1]
    pub fn generate(&self, count: usize) -> Result<ImageGrid> {
        let z      = sample_noise::<B>(count, self.d_noise, &self.device);
        let images = self.generator.forward(z);

        let flat: Vec<f32> = images
            .into_data()
            .convert::<f32>()
            .to_vec()
            .map_err(|e| anyhow!("Cannot read generated images: {e:?}"))?;

        ImageGrid::from_flat(MNIST_SIDE, flat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    use crate::application::train_use_case::TrainConfig;
    use crate::ml::trainer::GanModels;

    type TestBackend = NdArray;

    #[test]
    fn test_generate_returns_requested_count() {
        let device = Default::default();
        let (g_cfg, _) = gan_configs(10, 20, 0.0);
        let sampler = Sampler::<TestBackend>::new(g_cfg.init(&device), 10, device);

        let grid = sampler.generate(6).unwrap();
        assert_eq!(grid.len(), 6);
        assert_eq!(grid.side(), MNIST_SIDE);
        assert!(grid.images().iter().flatten().all(|v| (-1.0..=1.0).contains(v)));
    }

    #[test]
    fn test_from_checkpoint_restores_saved_generator() {
        let dir = std::env::temp_dir()
            .join(format!("mnist-gan-sampler-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        let ckpt   = CheckpointManager::new(dir.to_string_lossy()).unwrap();
        let device = Default::default();

        let cfg = TrainConfig { d_noise: 8, d_hidden: 16, ..TrainConfig::default() };
        ckpt.save_config(&cfg).unwrap();

        let (g_cfg, d_cfg) = gan_configs(cfg.d_noise, cfg.d_hidden, cfg.dropout);
        let models = GanModels::<TestBackend> {
            generator:     g_cfg.init(&device),
            discriminator: d_cfg.init(&device),
        };
        ckpt.save_models(&models, 1).unwrap();

        let sampler = Sampler::<TestBackend>::from_checkpoint(&ckpt, device).unwrap();
        assert_eq!(sampler.d_noise, 8);

        let expected: Vec<f32> = models.generator.output.weight.val().into_data().to_vec().unwrap();
        let actual:   Vec<f32> = sampler.generator.output.weight.val().into_data().to_vec().unwrap();
        assert_eq!(expected, actual);
        assert_eq!(sampler.generate(3).unwrap().len(), 3);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_from_checkpoint_before_training_names_missing_file() {
        let dir = std::env::temp_dir()
            .join(format!("mnist-gan-sampler-empty-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        let ckpt = CheckpointManager::new(dir.to_string_lossy()).unwrap();

        let err = Sampler::<TestBackend>::from_checkpoint(&ckpt, Default::default())
            .err()
            .unwrap();
        assert!(format!("{err:#}").contains("train_config.json"), "{err:#}");

        let _ = std::fs::remove_dir_all(&dir);
    }
}
