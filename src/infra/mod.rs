// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Handles all cross-cutting concerns that don't belong in
// any specific business layer:
//
//   checkpoint.rs  — Saving and loading network weights
//                    Uses Burn's CompactRecorder for the
//                    generator and discriminator, and keeps
//                    TrainConfig as JSON so `sample` can
//                    rebuild the generator.
//
//   metrics.rs     — Training metrics logging
//                    Writes epoch-level losses and
//                    discriminator confidences to a CSV file.
//
//   visualize.rs   — Pictures
//                    Tiles digits into PNG grids (image crate)
//                    and plots confidence curves (plotters).
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)
//            Burn Book §5 (Checkpointing)

/// Model checkpoint saving and loading
pub mod checkpoint;

/// Training metrics CSV logger
pub mod metrics;

/// Image grids and confidence plots
pub mod visualize;
