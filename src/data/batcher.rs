// ============================================================
// Layer 4 — Image Batcher
// ============================================================
// Implements Burn's Batcher trait to convert a Vec<ImageSample>
// into tensors the networks can consume.
//
// How batching works here:
//   Input:  Vec of N ImageSamples, each with P = 28*28 pixels
//   Output: ImageBatch with images [N, P] and labels [N]
//
//   All pixels are flattened into one long Vec, then reshaped:
//   [s1_p1, ..., s1_pP, s2_p1, ..., sN_pP] → [N, P]
//
// Reference: Burn Book §4 (Batcher)

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
};

use crate::data::dataset::ImageSample;

// ─── ImageBatch ───────────────────────────────────────────────────────────────
/// A batch of flattened images.
#[derive(Debug, Clone)]
pub struct ImageBatch<B: Backend> {
    /// Normalised pixels — shape: [batch_size, pixels]
    pub images: Tensor<B, 2>,

    /// Digit labels — shape: [batch_size]
    pub labels: Tensor<B, 1, Int>,
}

impl<B: Backend> ImageBatch<B> {
    pub fn len(&self) -> usize {
        self.images.dims()[0]
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ─── ImageBatcher ─────────────────────────────────────────────────────────────
/// Holds the target device so tensors are created on the correct GPU/CPU.
#[derive(Clone, Debug)]
pub struct ImageBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> ImageBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }
}

impl<B: Backend> Batcher<ImageSample, ImageBatch<B>> for ImageBatcher<B> {
    fn batch(&self, items: Vec<ImageSample>) -> ImageBatch<B> {
        let batch_size = items.len();
        let pixels     = items.first().map(|s| s.pixels.len()).unwrap_or(0);

        let flat: Vec<f32> = items
            .iter()
            .flat_map(|s| s.pixels.iter().copied())
            .collect();

        let labels: Vec<i32> = items
            .iter()
            .map(|s| s.label as i32)
            .collect();

        let images = Tensor::<B, 2>::from_data(
            TensorData::new(flat, [batch_size, pixels]),
            &self.device,
        );

        let labels = Tensor::<B, 1, Int>::from_ints(labels.as_slice(), &self.device);

        ImageBatch { images, labels }
    }
}
