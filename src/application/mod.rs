// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// This layer orchestrates all the other layers to accomplish
// a specific goal (training, or drawing samples).
//
// Rules for this layer:
//   - No ML math or model code here
//   - No direct file access (that's Layer 6)
//   - Only workflow coordination
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// The training workflow
pub mod train_use_case;

// Drawing digits from a trained generator
pub mod sample_use_case;
