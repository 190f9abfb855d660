// ============================================================
// Layer 5 — Adversarial Losses
// ============================================================
// Both players are scored with binary cross-entropy:
//
//   D loss = BCE(D(x), 1) + BCE(D(G(z)), 0)
//   G loss = BCE(D(G(z)), 1)
//
// The discriminator wants real → 1 and fake → 0; the generator
// wants its fakes labelled 1. The G loss is the
// "non-saturating" form: it gives strong gradients early on,
// when D rejects every fake with high confidence.
//
// BCE is computed on logits (log-sigmoid internally) so a
// saturated discriminator never produces log(0).

use burn::{
    nn::loss::{BinaryCrossEntropyLoss, BinaryCrossEntropyLossConfig},
    prelude::*,
};

fn bce<B: Backend>(device: &B::Device) -> BinaryCrossEntropyLoss<B> {
    BinaryCrossEntropyLossConfig::new()
        .with_logits(true)
        .init(device)
}

/// Targets shaped like the discriminator output, filled with `label`.
fn targets<B: Backend>(like: &Tensor<B, 2>, label: i64) -> Tensor<B, 2, Int> {
    Tensor::<B, 2, Int>::full(like.dims(), label, &like.device())
}

/// BCE(real, 1) + BCE(fake, 0)
pub fn discriminator_loss<B: Backend>(
    real_logits: Tensor<B, 2>,
    fake_logits: Tensor<B, 2>,
) -> Tensor<B, 1> {
    let loss = bce(&real_logits.device());
    let ones  = targets(&real_logits, 1);
    let zeros = targets(&fake_logits, 0);
    loss.forward(real_logits, ones) + loss.forward(fake_logits, zeros)
}

/// BCE(fake, 1)
pub fn generator_loss<B: Backend>(fake_logits: Tensor<B, 2>) -> Tensor<B, 1> {
    let loss = bce(&fake_logits.device());
    let ones = targets(&fake_logits, 1);
    loss.forward(fake_logits, ones)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type TestBackend = NdArray;

    fn scalar(t: Tensor<TestBackend, 1>) -> f64 {
        t.into_scalar().elem::<f64>()
    }

    fn logits(values: &[f32]) -> Tensor<TestBackend, 2> {
        Tensor::<TestBackend, 1>::from_floats(values, &Default::default())
            .reshape([values.len(), 1])
    }

    #[test]
    fn test_zero_logits_give_ln2() {
        let ln2 = std::f64::consts::LN_2;
        let g   = scalar(generator_loss(logits(&[0.0, 0.0, 0.0])));
        assert!((g - ln2).abs() < 1e-5);

        // Two BCE terms, each ln 2
        let d = scalar(discriminator_loss(logits(&[0.0, 0.0]), logits(&[0.0, 0.0])));
        assert!((d - 2.0 * ln2).abs() < 1e-5);
    }

    #[test]
    fn test_confident_discriminator_has_low_loss() {
        let d = scalar(discriminator_loss(logits(&[8.0, 9.0]), logits(&[-8.0, -9.0])));
        assert!(d < 1e-3);

        // ...and the generator is heavily penalised for it
        let g = scalar(generator_loss(logits(&[-8.0, -9.0])));
        assert!(g > 7.0);
    }

    #[test]
    fn test_saturated_logits_stay_finite() {
        let g = scalar(generator_loss(logits(&[-200.0])));
        assert!(g.is_finite());
        assert!((g - 200.0).abs() < 1e-2);
    }
}
