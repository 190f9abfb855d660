// ============================================================
// Layer 4 — Latent Noise
// ============================================================
// The generator's input: one uniform [0, 1) vector per image.

use burn::{prelude::*, tensor::Distribution};

/// Draw a latent batch for the generator: `[batch_size, d_noise]`,
/// every entry uniform in [0, 1).
pub fn sample_noise<B: Backend>(batch_size: usize, d_noise: usize, device: &B::Device) -> Tensor<B, 2> {
    Tensor::random([batch_size, d_noise], Distribution::Uniform(0.0, 1.0), device)
}
