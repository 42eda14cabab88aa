//! Filtering layer data down to the values inside a clip boundary.

/// Point feature masking.
pub mod points;
/// Raster grid masking and placement.
pub mod raster;
/// Scale values and the sets they are collected in.
pub mod values;
