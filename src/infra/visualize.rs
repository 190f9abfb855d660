// ============================================================
// Layer 6 — Visualisation
// ============================================================
// Two kinds of pictures come out of a run:
//
//   1. Image grids — generated (or real) digits tiled into one
//      PNG. Layout follows the usual "make_grid" convention:
//
//        ┌──────────────────────────┐
//        │ pad                      │
//        │   ┌──┐ pad ┌──┐ pad ┌──┐ │   nrow tiles per row,
//        │   │  │     │  │     │  │ │   `padding` black pixels
//        │   └──┘     └──┘     └──┘ │   around every tile
//        └──────────────────────────┘
//
//   2. A line chart of p_real and p_fake over the epochs.
//
// Reference: image crate (ImageBuffer / Luma),
//            plotters (BitMapBackend + LineSeries)

use anyhow::{anyhow, bail, Context, Result};
use image::{GrayImage, Luma};
use plotters::prelude::*;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::data::preprocessor::Normalize;
use crate::domain::{confidence::ConfidenceTrace, image_grid::ImageGrid, traits::ImageSink};

/// Tile `grid` into a single grayscale image.
/// Pixel values are mapped from the normalised range back to 0..=255.
pub fn make_grid(grid: &ImageGrid, nrow: usize, padding: usize, normalize: &Normalize) -> GrayImage {
    let side  = grid.side();
    let cols  = nrow.min(grid.len()).max(1);
    let rows  = grid.len().div_ceil(cols);
    let cell  = side + padding;

    let width  = (cols * cell + padding) as u32;
    let height = (rows * cell + padding) as u32;
    let mut canvas = GrayImage::new(width, height);

    for (k, image) in grid.images().iter().enumerate() {
        let x0 = (k % cols) * cell + padding;
        let y0 = (k / cols) * cell + padding;

        for (i, &value) in image.iter().enumerate() {
            let level = (normalize.invert(value) * 255.0).round() as u8;
            canvas.put_pixel((x0 + i % side) as u32, (y0 + i / side) as u32, Luma([level]));
        }
    }

    canvas
}

/// Writes image grids as grayscale PNGs into one directory.
pub struct PngGridSink {
    dir:       PathBuf,
    nrow:      usize,
    padding:   usize,
    normalize: Normalize,
}

impl PngGridSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir:       dir.into(),
            nrow:      8,
            padding:   2,
            normalize: Normalize::default(),
        }
    }

    pub fn with_nrow(mut self, nrow: usize) -> Self {
        self.nrow = nrow.max(1);
        self
    }

    /// Render `grid` and save it at exactly `path`.
    pub fn save(&self, grid: &ImageGrid, path: &Path) -> Result<()> {
        if grid.is_empty() {
            bail!("refusing to write an empty image grid to '{}'", path.display());
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Cannot create '{}'", parent.display()))?;
        }

        make_grid(grid, self.nrow, self.padding, &self.normalize)
            .save(path)
            .with_context(|| format!("Cannot write image grid to '{}'", path.display()))?;

        tracing::debug!("Wrote {} images to '{}'", grid.len(), path.display());
        Ok(())
    }
}

impl ImageSink for PngGridSink {
    fn write_grid(&self, name: &str, grid: &ImageGrid) -> Result<PathBuf> {
        let path = self.dir.join(format!("{name}.png"));
        self.save(grid, &path)?;
        Ok(path)
    }
}

/// Plot D(x_real) and D(x_generated) per epoch into a PNG line chart.
pub fn plot_confidence(trace: &ConfidenceTrace, path: &Path) -> Result<()> {
    let last_epoch = trace.latest().map(|e| e.epoch).unwrap_or(1).max(1);

    let root = BitMapBackend::new(path, (800, 480)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| anyhow!("backend error: {e}"))?;

    let mut chart = ChartBuilder::on(&root)
        .margin(10)
        .caption("Discriminator confidence on the test set", ("sans-serif", 24))
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0usize..last_epoch + 1, 0f64..1f64)
        .map_err(|e| anyhow!("chart build error: {e}"))?;

    chart
        .configure_mesh()
        .x_desc("epoch")
        .y_desc("mean D(x)")
        .draw()
        .map_err(|e| anyhow!("mesh error: {e}"))?;

    chart
        .draw_series(LineSeries::new(trace.p_fake(), &RED))
        .map_err(|e| anyhow!("series error: {e}"))?
        .label("D(x_generated)")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));

    chart
        .draw_series(LineSeries::new(trace.p_real(), &BLUE))
        .map_err(|e| anyhow!("series error: {e}"))?
        .label("D(x_real)")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(|e| anyhow!("legend error: {e}"))?;

    root.present()
        .map_err(|e| anyhow!("Cannot write chart to '{}': {e}", path.display()))?;

    tracing::info!("Wrote confidence plot to '{}'", path.display());
    Ok(())
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn grid_of(count: usize, side: usize, value: f32) -> ImageGrid {
        ImageGrid::new(side, vec![vec![value; side * side]; count]).unwrap()
    }

    #[test]
    fn test_grid_dimensions() {
        // 5 tiles of 3x3, 4 per row, padding 1 → 2 rows
        let img = make_grid(&grid_of(5, 3, 1.0), 4, 1, &Normalize::default());
        assert_eq!(img.width(), 4 * 4 + 1);
        assert_eq!(img.height(), 2 * 4 + 1);
    }

    #[test]
    fn test_fewer_images_than_nrow_shrinks_width() {
        let img = make_grid(&grid_of(2, 3, 1.0), 8, 2, &Normalize::default());
        assert_eq!(img.width(), 2 * 5 + 2);
        assert_eq!(img.height(), 5 + 2);
    }

    #[test]
    fn test_padding_is_black_and_tiles_are_denormalised() {
        let img = make_grid(&grid_of(1, 2, 1.0), 1, 1, &Normalize::default());
        assert_eq!(img.get_pixel(0, 0), &Luma([0]));
        assert_eq!(img.get_pixel(1, 1), &Luma([255]));
        assert_eq!(img.get_pixel(2, 2), &Luma([255]));
        assert_eq!(img.get_pixel(3, 3), &Luma([0]));

        let mid = make_grid(&grid_of(1, 1, 0.0), 1, 0, &Normalize::default());
        assert_eq!(mid.get_pixel(0, 0), &Luma([128]));
    }

    #[test]
    fn test_tile_placement_row_major() {
        let grid = ImageGrid::new(1, vec![vec![-1.0], vec![1.0], vec![1.0]]).unwrap();
        let img  = make_grid(&grid, 2, 0, &Normalize::default());
        assert_eq!(img.get_pixel(0, 0), &Luma([0]));
        assert_eq!(img.get_pixel(1, 0), &Luma([255]));
        assert_eq!(img.get_pixel(0, 1), &Luma([255]));
    }

    #[test]
    fn test_sink_writes_png() {
        let dir  = std::env::temp_dir().join(format!("mnist-gan-viz-{}", std::process::id()));
        let sink = PngGridSink::new(&dir).with_nrow(4);

        let path = sink.write_grid("preview", &grid_of(6, 28, 0.5)).unwrap();
        assert_eq!(path, dir.join("preview.png"));

        let written = image::open(&path).unwrap().to_luma8();
        assert_eq!(written.width(), 4 * 30 + 2);
        assert_eq!(written.height(), 2 * 30 + 2);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_sink_rejects_empty_grid() {
        let sink  = PngGridSink::new(std::env::temp_dir());
        let empty = ImageGrid::new(28, Vec::new()).unwrap();
        assert!(sink.write_grid("empty", &empty).is_err());
    }

    #[test]
    fn test_plot_confidence_writes_png() {
        use crate::domain::confidence::EpochConfidence;

        let dir = std::env::temp_dir().join(format!("mnist-gan-plot-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("confidence.png");

        let mut trace = ConfidenceTrace::new();
        trace.push(EpochConfidence::new(1, 0.9, 0.2)).unwrap();
        trace.push(EpochConfidence::new(2, 0.7, 0.4)).unwrap();
        plot_confidence(&trace, &path).unwrap();

        let written = image::open(&path).unwrap();
        assert_eq!((written.width(), written.height()), (800, 480));

        let _ = fs::remove_dir_all(&dir);
    }
}
