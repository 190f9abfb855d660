// ============================================================
// Layer 3 — Epoch Measurements
// ============================================================
// After every epoch the discriminator is asked two questions
// over the whole test set:
//
//   p_real = mean D(x)      for real test images x
//   p_fake = mean D(G(z))   for one noise vector z per test image
//
// A well-balanced GAN drifts towards p_real ≈ p_fake ≈ 0.5:
// the discriminator can no longer tell the two apart.
//
// The trace keeps the full history so it can be plotted once
// training is over.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Mean per-batch training losses for one epoch
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpochLosses {
    /// BCE(D(x), 1) + BCE(D(G(z)), 0)
    pub d_loss: f64,

    /// BCE(D(G(z)), 1)
    pub g_loss: f64,
}

/// Discriminator confidence measured on the test set after one epoch
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpochConfidence {
    /// The epoch number (starts at 1)
    pub epoch: usize,

    /// Average probability the discriminator assigns to real images
    pub p_real: f64,

    /// Average probability the discriminator assigns to generated images
    pub p_fake: f64,
}

impl EpochConfidence {
    pub fn new(epoch: usize, p_real: f64, p_fake: f64) -> Self {
        Self { epoch, p_real, p_fake }
    }
}

/// Ordered history of per-epoch confidences
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfidenceTrace {
    entries: Vec<EpochConfidence>,
}

impl ConfidenceTrace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one epoch. Epochs must arrive in strictly increasing order.
    pub fn push(&mut self, entry: EpochConfidence) -> Result<()> {
        if let Some(last) = self.entries.last() {
            if entry.epoch <= last.epoch {
                bail!("epoch {} pushed after epoch {}", entry.epoch, last.epoch);
            }
        }
        self.entries.push(entry);
        Ok(())
    }

    pub fn latest(&self) -> Option<&EpochConfidence> {
        self.entries.last()
    }

    /// `(epoch, p_real)` pairs in epoch order
    pub fn p_real(&self) -> Vec<(usize, f64)> {
        self.entries.iter().map(|e| (e.epoch, e.p_real)).collect()
    }

    /// `(epoch, p_fake)` pairs in epoch order
    pub fn p_fake(&self) -> Vec<(usize, f64)> {
        self.entries.iter().map(|e| (e.epoch, e.p_fake)).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
