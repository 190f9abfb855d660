// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Pure Rust structs and traits that define the core concepts
// of the system.
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O or network calls
//   - Only plain Rust structs, enums, and traits
//
// Everything the training loop measures (losses, discriminator
// confidence) and everything it hands to the reporting side
// (image grids) is expressed here as plain data, so the
// reporting code never has to touch a tensor.
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// Per-epoch measurements and their history
pub mod confidence;

// A batch of flattened grayscale images ready to be rendered
pub mod image_grid;

// Core abstractions (traits) that other layers implement
pub mod traits;
