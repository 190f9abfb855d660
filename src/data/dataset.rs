// ============================================================
// Layer 4 — MNIST Dataset
// ============================================================
// Wraps Burn's built-in MnistDataset. The first call downloads
// the IDX files into Burn's cache; later runs read from disk.
//
// Every item is converted on access:
//   MnistItem { image: [[f32; 28]; 28] in [0, 255], label }
//     → ImageSample { pixels: Vec<f32> (784) in [-1, 1], label }
//
// Reference: Burn Book §4 (Dataset)

use burn::data::dataset::{
    vision::{MnistDataset, MnistItem},
    Dataset,
};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::data::preprocessor::Normalize;

/// Side length of an MNIST digit
pub const MNIST_SIDE: usize = 28;

/// Flattened pixel count of an MNIST digit
pub const MNIST_PIXELS: usize = MNIST_SIDE * MNIST_SIDE;

/// One normalised image, flattened row-major.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageSample {
    pub pixels: Vec<f32>,
    pub label:  u8,
}

impl ImageSample {
    pub fn from_mnist(item: &MnistItem, normalize: &Normalize) -> Self {
        Self {
            pixels: normalize.flatten_image(&item.image),
            label:  item.label,
        }
    }
}

/// MNIST as normalised samples.
/// Burn downloads and caches the IDX files on first construction.
pub struct MnistImages {
    inner:     MnistDataset,
    normalize: Normalize,
}

impl MnistImages {
    pub fn train() -> Self {
        let inner = MnistDataset::train();
        tracing::info!("Loaded {} MNIST training images", inner.len());
        Self { inner, normalize: Normalize::default() }
    }

    pub fn test() -> Self {
        let inner = MnistDataset::test();
        tracing::info!("Loaded {} MNIST test images", inner.len());
        Self { inner, normalize: Normalize::default() }
    }
}

impl Dataset<ImageSample> for MnistImages {
    fn get(&self, index: usize) -> Option<ImageSample> {
        self.inner
            .get(index)
            .map(|item| ImageSample::from_mnist(&item, &self.normalize))
    }

    fn len(&self) -> usize {
        self.inner.len()
    }
}

/// Pick `count` distinct samples uniformly at random
/// (all of them, in random order, when the dataset is smaller).
pub fn random_subset<D, R>(dataset: &D, count: usize, rng: &mut R) -> Vec<ImageSample>
where
    D: Dataset<ImageSample>,
    R: Rng,
{
    let amount = count.min(dataset.len());
    rand::seq::index::sample(rng, dataset.len(), amount)
        .into_iter()
        .filter_map(|i| dataset.get(i))
        .collect()
}
