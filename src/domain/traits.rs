// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The training loop and the sample command both produce
// images that need to end up somewhere. They only see the
// ImageSink trait; the concrete PNG writer lives in Layer 6.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use std::path::PathBuf;

use anyhow::Result;
use crate::domain::image_grid::ImageGrid;

// ─── ImageSink ────────────────────────────────────────────────────────────────
/// Any component that can persist a grid of images.
///
/// Implementations:
///   - PngGridSink → tiles the images into one grayscale PNG
pub trait ImageSink {
    /// Write `grid` under `name` and return where it ended up.
    fn write_grid(&self, name: &str, grid: &ImageGrid) -> Result<PathBuf>;
}
