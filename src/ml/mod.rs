// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// This layer contains the Burn-specific modelling code.
//
// What's in this layer:
//
//   init.rs      — Parameter initialisation shared by both
//                  networks (Xavier-normal weights, uniform
//                  [0.1, 0.2) biases)
//
//   model.rs     — Generator (noise → image, tanh output) and
//                  Discriminator (image → P(real)), both
//                  three-layer MLPs with LeakyReLU + dropout
//
//   loss.rs      — Binary cross-entropy losses for the two
//                  players, computed on logits
//
//   trainer.rs   — The alternating training loop, per-epoch
//                  evaluation of discriminator confidence,
//                  checkpointing and periodic sample grids
//
//   sampler.rs   — Loads a trained generator and draws digits
//
// Reference: Burn Book §3 (Building Blocks)
//            Burn Book §5 (Training)
//            Goodfellow et al. (2014) Generative Adversarial Nets

/// Parameter initialisation scheme
pub mod init;

/// Generator and discriminator architectures
pub mod model;

/// Adversarial BCE losses
pub mod loss;

/// Full training loop with evaluation and checkpointing
pub mod trainer;

/// Sampling from a trained generator
pub mod sampler;
