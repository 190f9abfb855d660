// ============================================================
// Layer 4 — Pixel Preprocessor
// ============================================================
// Converts raw MNIST intensities into the range the networks
// train on, and back again for visualisation.
//
// Two steps are applied in order:
//   1. Scale   [0, 255]  → [0, 1]     (divide by 255)
//   2. Shift   [0, 1]    → (x - mean) / std
//
// With the default mean = std = 0.5 the result lies in [-1, 1],
// which matches the tanh output range of the generator.
// Generated images therefore need no extra rescaling before
// the discriminator sees them.
//
// Reference: Rust Book §13 (Iterators)

/// Per-channel normalisation applied to every pixel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalize {
    pub mean: f32,
    pub std:  f32,
}

impl Default for Normalize {
    fn default() -> Self {
        Self::new(0.5, 0.5)
    }
}

impl Normalize {
    pub fn new(mean: f32, std: f32) -> Self {
        Self { mean, std }
    }

    /// Map one raw intensity in [0, 255] to the normalised range
    pub fn apply(&self, raw: f32) -> f32 {
        (raw / 255.0 - self.mean) / self.std
    }

    /// Map a normalised value back to [0, 1].
    /// Clamped, since generator outputs are not guaranteed to stay in range
    /// when a different `Normalize` was used for training.
    pub fn invert(&self, value: f32) -> f32 {
        (value * self.std + self.mean).clamp(0.0, 1.0)
    }

    /// Normalise a 2D image row by row into one flat Vec
    pub fn flatten_image<const H: usize, const W: usize>(&self, image: &[[f32; W]; H]) -> Vec<f32> {
        image
            .iter()
            .flat_map(|row| row.iter().map(|&p| self.apply(p)))
            .collect()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_maps_to_unit_interval() {
        let n = Normalize::default();
        assert!((n.apply(0.0) + 1.0).abs() < 1e-6);
        assert!((n.apply(255.0) - 1.0).abs() < 1e-6);
        assert!(n.apply(127.5).abs() < 1e-6);
    }

    #[test]
    fn test_invert_undoes_apply() {
        let n = Normalize::default();
        for raw in [0.0f32, 51.0, 200.0, 255.0] {
            let back = n.invert(n.apply(raw));
            assert!((back - raw / 255.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_invert_clamps() {
        let n = Normalize::default();
        assert_eq!(n.invert(3.0), 1.0);
        assert_eq!(n.invert(-3.0), 0.0);
    }

    #[test]
    fn test_flatten_is_row_major() {
        let n     = Normalize::new(0.0, 1.0);
        let image = [[0.0, 255.0], [255.0, 0.0]];
        assert_eq!(n.flatten_image(&image), vec![0.0, 1.0, 1.0, 0.0]);
    }
}
