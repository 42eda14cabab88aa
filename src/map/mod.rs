//! JSON map documents and the per-pass masking pipeline.

/// Serde model of a map and its layers.
pub mod document;
/// Session that fits, clips, masks and colors a map document.
pub mod pipeline;
