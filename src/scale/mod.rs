//! Color domains, scales and legends built from masked values.

pub mod color;
pub mod domain;
/// Color bar layout.
pub mod legend;
