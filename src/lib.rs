//! Anaximander clips thematic map data to the visible map area.
//!
//! A map's clip boundary is computed once from its projected outline. Raster
//! cells and point features are then tested against it, and the values that
//! fall inside become the domain of the layer's color scale:
//!
//! - Load and validate a [`MapDocument`]
//! - Open a [`MapSession`], which fits the projection and builds the boundary
//! - Mask layers into [`ColorDomain`]s, build [`ColorScale`]s and [`Legend`]s
#![forbid(unsafe_code)]

mod foundation;

/// Clip boundaries and point-in-polygon tests.
pub mod geometry;
/// JSON map documents and the masking pipeline.
pub mod map;
/// Raster and point masking.
pub mod mask;
/// Projections, graticules, globe geometry and scale bars.
pub mod projection;
/// Color domains, scales and legends.
pub mod scale;

pub use crate::foundation::core::{
    Affine, BezPath, Canvas, EARTH_RADIUS_KM, LonLat, NO_DATA, Point, Rect, Rgba8, Size, Vec2,
};
pub use crate::foundation::error::{AnaximanderError, AnaximanderResult};

pub use crate::geometry::outline::{polygon_from_outline, polygon_from_path, polygon_from_path_data};
pub use crate::geometry::polygon::{Polygon, is_inside};
pub use crate::map::document::{LayerSpec, MapDocument, PointLayer, RasterLayer};
pub use crate::map::pipeline::{LayerDomain, MapSession};
pub use crate::mask::points::{PointFeature, mask_points, points_from_json};
pub use crate::mask::raster::{
    RasterGrid, RasterMask, RasterPlacement, RasterSource, mask_raster, mask_raster_with,
};
pub use crate::mask::values::{ExcludedValues, ScaleValue, ValueSet};
pub use crate::projection::globe::{globe_dims, horizon_points, horizon_ring};
pub use crate::projection::graticule::Graticule;
pub use crate::projection::planar::{
    Equirectangular, Fitted, Orthographic, Projection, ProjectionSpec, fit_to_canvas,
};
pub use crate::projection::scale_bar::{ScaleBar, great_circle_point};
pub use crate::scale::color::{ColorScale, Interpolation, parse_hex};
pub use crate::scale::domain::{ColorDomain, ScaleKind};
pub use crate::scale::legend::{Legend, LegendLabel, LegendSection};
