use kurbo::PathEl;

use crate::foundation::core::{BezPath, LonLat, Point};
use crate::foundation::error::{AnaximanderError, AnaximanderResult};
use crate::geometry::polygon::Polygon;
use crate::projection::planar::Projection;

/// Flattening tolerance for curved path segments, in plane units.
const CURVE_TOLERANCE: f64 = 0.1;

/// Build the clip boundary by projecting a geographic outline vertex by vertex.
///
/// Vertices the projection clips are dropped, as are consecutive duplicates
/// and a trailing vertex equal to the first.
#[tracing::instrument(skip(outline, projection), fields(vertices = outline.len()))]
pub fn polygon_from_outline<P: Projection>(
    outline: &[LonLat],
    projection: &P,
) -> AnaximanderResult<Polygon> {
    let mut vertices = Vec::with_capacity(outline.len());
    for &p in outline {
        if let Some(q) = projection.project(p) {
            push_vertex(&mut vertices, q);
        }
    }
    drop_closing_vertex(&mut vertices);

    tracing::debug!(
        kept = vertices.len(),
        clipped = outline.len() - vertices.len(),
        "projected clip outline"
    );
    Polygon::new(vertices)
}

/// Build the clip boundary from SVG path data (`d` attribute) describing a
/// single closed outline.
///
/// Draw order is preserved; close commands, zero-length segments and a
/// closing vertex that repeats the start are dropped. Curves are flattened.
pub fn polygon_from_path_data(d: &str) -> AnaximanderResult<Polygon> {
    let d = d.trim();
    if d.is_empty() {
        return Err(AnaximanderError::invalid_geometry(
            "clip path data must be non-empty",
        ));
    }

    let path = BezPath::from_svg(d)
        .map_err(|e| AnaximanderError::invalid_geometry(format!("invalid clip path data: {e}")))?;
    polygon_from_path(&path)
}

/// Same as [`polygon_from_path_data`], for an already-built path.
pub fn polygon_from_path(path: &BezPath) -> AnaximanderResult<Polygon> {
    let subpaths = path
        .elements()
        .iter()
        .filter(|el| matches!(el, PathEl::MoveTo(_)))
        .count();
    if subpaths == 0 {
        return Err(AnaximanderError::invalid_geometry(
            "clip path has no coordinates",
        ));
    }
    if subpaths > 1 {
        return Err(AnaximanderError::invalid_geometry(format!(
            "clip path must be a single outline, found {subpaths} subpaths"
        )));
    }

    let mut vertices = Vec::new();
    kurbo::flatten(path.elements().iter().copied(), CURVE_TOLERANCE, |el| {
        match el {
            PathEl::MoveTo(p) | PathEl::LineTo(p) => push_vertex(&mut vertices, p),
            PathEl::ClosePath => {}
            // `flatten` only emits lines.
            PathEl::QuadTo(_, p) | PathEl::CurveTo(_, _, p) => push_vertex(&mut vertices, p),
        }
    });
    drop_closing_vertex(&mut vertices);

    Polygon::new(vertices)
}

fn push_vertex(vertices: &mut Vec<Point>, p: Point) {
    if vertices.last() != Some(&p) {
        vertices.push(p);
    }
}

fn drop_closing_vertex(vertices: &mut Vec<Point>) {
    if vertices.len() > 1 && vertices.first() == vertices.last() {
        vertices.pop();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/outline.rs"]
mod tests;
