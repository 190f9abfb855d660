// ============================================================
// Layer 3 — Image Grid
// ============================================================
// A framework-free bundle of images passed from the sampler to
// whatever writes pictures (see `ImageSink`).

use anyhow::{bail, Result};

/// A set of square grayscale images, each flattened row-major.
/// Pixel values live in the normalised range [-1, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct ImageGrid {
    side:   usize,
    images: Vec<Vec<f32>>,
}

impl ImageGrid {
    pub fn new(side: usize, images: Vec<Vec<f32>>) -> Result<Self> {
        if side == 0 {
            bail!("image side length must be positive");
        }
        if let Some((i, img)) = images.iter().enumerate().find(|(_, img)| img.len() != side * side) {
            bail!(
                "image {} has {} pixels, expected {}x{} = {}",
                i, img.len(), side, side, side * side
            );
        }
        Ok(Self { side, images })
    }

    /// Split one flat buffer of `count * side * side` values into images.
    pub fn from_flat(side: usize, flat: Vec<f32>) -> Result<Self> {
        let area = side * side;
        if area == 0 || flat.len() % area != 0 {
            bail!("{} values do not divide into {}x{} images", flat.len(), side, side);
        }
        let images = flat.chunks(area).map(<[f32]>::to_vec).collect();
        Self::new(side, images)
    }

    pub fn side(&self) -> usize { self.side }

    pub fn images(&self) -> &[Vec<f32>] { &self.images }

    pub fn len(&self) -> usize { self.images.len() }

    pub fn is_empty(&self) -> bool { self.images.is_empty() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_wrong_pixel_count() {
        let err = ImageGrid::new(2, vec![vec![0.0; 4], vec![0.0; 3]]);
        assert!(err.is_err());
    }

    #[test]
    fn test_from_flat_splits_images() {
        let flat: Vec<f32> = (0..8).map(|v| v as f32).collect();
        let grid = ImageGrid::from_flat(2, flat).unwrap();
        assert_eq!(grid.len(), 2);
        assert_eq!(grid.images()[1], vec![4.0, 5.0, 6.0, 7.0]);
    }

    #[test]
    fn test_from_flat_rejects_partial_image() {
        assert!(ImageGrid::from_flat(2, vec![0.0; 5]).is_err());
    }
}
