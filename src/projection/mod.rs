//! Geographic-to-plane mapping and the geometry that depends on it.

/// Globe silhouette helpers.
pub mod globe;
/// Longitude/latitude extents and their outlines.
pub mod graticule;
/// The projection trait, reference projections and canvas fitting.
pub mod planar;
/// Ground-distance scale bars.
pub mod scale_bar;
