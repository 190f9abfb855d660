// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// This layer handles everything from the raw MNIST download
// to tensor batches, plus the latent noise the generator eats.
//
// The pipeline flows in this order:
//
//   MNIST IDX files (downloaded + cached by burn-dataset)
//       │
//       ▼
//   MnistImages       → implements Burn's Dataset trait
//       │               normalises every pixel on access
//       ▼
//   ImageBatcher      → stacks samples into [N, 784] tensors
//       │
//       ▼
//   DataLoader        → shuffled for training,
//                       fixed order for evaluation
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

/// Pixel normalisation ([0, 255] → [-1, 1] and back)
pub mod preprocessor;

/// Implements Burn's Dataset trait for normalised MNIST samples
pub mod dataset;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;

/// Uniform latent noise for the generator
pub mod noise;
