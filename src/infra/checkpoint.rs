// ============================================================
// Layer 6 — Checkpoint Manager
// ============================================================
// Saves and restores network weights using Burn's
// CompactRecorder.
//
// What gets saved per checkpoint:
//   1. Generator weights      (.mpk.gz)
//   2. Discriminator weights  (.mpk.gz)
//   3. latest_epoch.json      — which epoch was last saved
//   4. train_config.json      — hyperparameters of the run
//
// The config is saved separately so the `sample` command can
// rebuild a generator of exactly the right shape (d_noise,
// d_hidden) before loading weights into it.
//
// File naming convention:
//   checkpoints/
//     generator_epoch_1.mpk.gz
//     discriminator_epoch_1.mpk.gz
//     ...
//     latest_epoch.json
//     train_config.json
//
// Reference: Burn Book §5 (Records and Checkpointing)

use anyhow::{bail, Context, Result};
use std::{fs, path::{Path, PathBuf}};
use burn::{
    prelude::*,
    record::{CompactRecorder, Recorder},
};

use crate::application::train_use_case::TrainConfig;
use crate::ml::model::Generator;
use crate::ml::trainer::GanModels;

const LATEST_EPOCH_FILE: &str = "latest_epoch.json";
const CONFIG_FILE:       &str = "train_config.json";

/// Manages saving and loading of GAN checkpoints.
/// All files are stored in the configured directory.
pub struct CheckpointManager {
    dir: PathBuf,
}

impl CheckpointManager {
    /// Create a new CheckpointManager, creating the directory if needed.
    pub fn new(dir: impl Into<String>) -> Result<Self> {
        let dir = PathBuf::from(dir.into());
        fs::create_dir_all(&dir)
            .with_context(|| format!("Cannot create checkpoint directory '{}'", dir.display()))?;
        Ok(Self { dir })
    }

    /// Open an existing checkpoint directory for loading.
    /// Never creates anything on disk.
    pub fn open(dir: impl Into<String>) -> Result<Self> {
        let dir = PathBuf::from(dir.into());
        if !dir.is_dir() {
            bail!(
                "Checkpoint directory '{}' does not exist. Have you run 'train' first?",
                dir.display()
            );
        }
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Save both networks for a given epoch, then advance the latest-epoch pointer.
    /// The pointer is written last so it never names a half-written epoch.
    pub fn save_models<B: Backend>(&self, models: &GanModels<B>, epoch: usize) -> Result<()> {
        let recorder = CompactRecorder::new();

        let g_path = self.generator_path(epoch);
        recorder
            .record(models.generator.clone().into_record(), g_path.clone())
            .with_context(|| format!("Failed to save generator to '{}'", g_path.display()))?;

        let d_path = self.discriminator_path(epoch);
        recorder
            .record(models.discriminator.clone().into_record(), d_path.clone())
            .with_context(|| format!("Failed to save discriminator to '{}'", d_path.display()))?;

        let latest_path = self.dir.join(LATEST_EPOCH_FILE);
        fs::write(&latest_path, serde_json::to_string(&epoch)?)
            .with_context(|| format!("Failed to write {LATEST_EPOCH_FILE}"))?;

        tracing::debug!("Saved checkpoint: epoch {}", epoch);
        Ok(())
    }

    /// Load generator weights from the latest saved checkpoint.
    /// `generator` must have the architecture the checkpoint was saved with.
    pub fn load_generator<B: Backend>(
        &self,
        generator: Generator<B>,
        device:    &B::Device,
    ) -> Result<Generator<B>> {
        let epoch = self.latest_epoch()?;
        let path  = self.generator_path(epoch);

        tracing::info!("Loading generator from epoch {}", epoch);

        let record = CompactRecorder::new()
            .load(path.clone(), device)
            .with_context(|| {
                format!("Cannot load checkpoint '{}'. Have you trained the model first?",
                    path.display())
            })?;

        Ok(generator.load_record(record))
    }

    /// Save the training configuration to JSON.
    pub fn save_config(&self, cfg: &TrainConfig) -> Result<()> {
        let path = self.dir.join(CONFIG_FILE);
        let json = serde_json::to_string_pretty(cfg)?;

        fs::write(&path, json)
            .with_context(|| format!("Cannot write config to '{}'", path.display()))?;

        tracing::debug!("Saved training config to '{}'", path.display());
        Ok(())
    }

    /// Load the training configuration from JSON.
    pub fn load_config(&self) -> Result<TrainConfig> {
        let path = self.dir.join(CONFIG_FILE);

        let json = fs::read_to_string(&path)
            .with_context(|| {
                format!(
                    "Cannot read config from '{}'. \
                     Make sure you have run 'train' before 'sample'.",
                    path.display()
                )
            })?;

        serde_json::from_str(&json)
            .with_context(|| format!("Malformed config in '{}'", path.display()))
    }

    /// Epoch number of the most recent checkpoint.
    pub fn latest_epoch(&self) -> Result<usize> {
        let path = self.dir.join(LATEST_EPOCH_FILE);

        let s = fs::read_to_string(&path)
            .with_context(|| {
                format!("Cannot find '{}'. Have you run 'train' first?", path.display())
            })?;

        Ok(serde_json::from_str::<usize>(&s)?)
    }

    // Recorder appends the extension itself
    fn generator_path(&self, epoch: usize) -> PathBuf {
        self.dir.join(format!("generator_epoch_{epoch}"))
    }

    fn discriminator_path(&self, epoch: usize) -> PathBuf {
        self.dir.join(format!("discriminator_epoch_{epoch}"))
    }
}
