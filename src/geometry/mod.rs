//! Clip boundary polygons and point containment.

/// Boundary extraction from projected outlines or drawn path data.
pub mod outline;
/// Polygon type and the ray-casting containment test.
pub mod polygon;
