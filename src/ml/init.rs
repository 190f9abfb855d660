// ============================================================
// Layer 5 — Parameter Initialisation
// ============================================================
// Every Linear layer in both networks starts from the same
// scheme:
//
//   weight ~ N(0, 2 / (fan_in + fan_out))   Xavier-normal, gain 1
//   bias   ~ U[0.1, 0.2)
//
// Reference: Glorot & Bengio (2010)

use burn::{
    nn::{Initializer, Linear, LinearConfig},
    prelude::*,
};

/// Lower bound of the bias initialisation range
pub const BIAS_INIT_MIN: f64 = 0.1;

/// Upper bound (exclusive) of the bias initialisation range
pub const BIAS_INIT_MAX: f64 = 0.2;

/// Build a Linear layer with the scheme used by both networks:
/// Xavier-normal weights (gain 1), biases uniform in [0.1, 0.2).
pub fn init_linear<B: Backend>(d_input: usize, d_output: usize, device: &B::Device) -> Linear<B> {
    let mut linear = LinearConfig::new(d_input, d_output)
        .with_initializer(Initializer::XavierNormal { gain: 1.0 })
        .init(device);

    // LinearConfig applies one initializer to both tensors; biases get their own range.
    linear.bias = Some(
        Initializer::Uniform { min: BIAS_INIT_MIN, max: BIAS_INIT_MAX }.init([d_output], device),
    );

    linear
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type TestBackend = NdArray;

    #[test]
    fn test_bias_in_uniform_range() {
        let device = Default::default();
        let linear = init_linear::<TestBackend>(64, 32, &device);

        let bias: Vec<f32> = linear
            .bias
            .as_ref()
            .expect("bias is always set")
            .val()
            .into_data()
            .to_vec()
            .unwrap();

        assert_eq!(bias.len(), 32);
        assert!(bias
            .iter()
            .all(|&b| (BIAS_INIT_MIN as f32..BIAS_INIT_MAX as f32 + 1e-6).contains(&b)));
    }

    #[test]
    fn test_weight_std_matches_xavier() {
        let device = Default::default();
        let (d_in, d_out) = (256, 256);
        let linear = init_linear::<TestBackend>(d_in, d_out, &device);

        assert_eq!(linear.weight.dims(), [d_in, d_out]);

        let w: Vec<f32> = linear.weight.val().into_data().to_vec().unwrap();
        let n    = w.len() as f64;
        let mean = w.iter().map(|&v| v as f64).sum::<f64>() / n;
        let var  = w.iter().map(|&v| (v as f64 - mean).powi(2)).sum::<f64>() / n;

        // Xavier-normal: std = sqrt(2 / (fan_in + fan_out))
        let expected = (2.0 / (d_in + d_out) as f64).sqrt();
        assert!(mean.abs() < 0.01, "mean {mean}");
        assert!((var.sqrt() - expected).abs() / expected < 0.1, "std {}", var.sqrt());
    }
}
