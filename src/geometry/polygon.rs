use crate::foundation::core::{Point, Rect};
use crate::foundation::error::{AnaximanderError, AnaximanderResult};

#[derive(Clone, Debug, PartialEq)]
/// Closed boundary polygon in plane coordinates.
///
/// Vertices are kept in draw order; the edge from the last vertex back to the
/// first is implicit. Construction guarantees at least 3 distinct, finite
/// vertices. Immutable after construction.
pub struct Polygon {
    vertices: Vec<Point>,
    bounds: Rect,
}

impl Polygon {
    /// Build a polygon from an ordered vertex list.
    ///
    /// Fails with [`AnaximanderError::InvalidGeometry`] when a coordinate is not
    /// finite or fewer than 3 distinct vertices remain.
    pub fn new(vertices: Vec<Point>) -> AnaximanderResult<Self> {
        if let Some(p) = vertices.iter().find(|p| !p.is_finite()) {
            return Err(AnaximanderError::invalid_geometry(format!(
                "polygon vertex ({}, {}) is not finite",
                p.x, p.y
            )));
        }

        let distinct = distinct_vertex_count(&vertices);
        if distinct < 3 {
            return Err(AnaximanderError::invalid_geometry(format!(
                "polygon needs at least 3 distinct vertices, got {distinct}"
            )));
        }

        let bounds = vertices
            .iter()
            .skip(1)
            .fold(Rect::from_points(vertices[0], vertices[0]), |r, &p| {
                r.union_pt(p)
            });

        Ok(Self { vertices, bounds })
    }

    /// Vertices in draw order.
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Axis-aligned bounding box of all vertices.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Containment test with a bounding-box rejection before the ray-cast.
    ///
    /// Gives the same answer as [`is_inside`]: a point outside the bounding box
    /// crosses the boundary an even number of times (or never).
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        let b = self.bounds;
        if point.x < b.x0 || point.x > b.x1 || point.y < b.y0 || point.y > b.y1 {
            return false;
        }
        ray_cast(point, &self.vertices)
    }
}

/// Even-odd ray-casting point-in-polygon test.
///
/// A horizontal ray is cast from `point` towards +x; every boundary edge it
/// crosses flips the result. Points lying exactly on an edge or a vertex get
/// an unspecified answer (either value may come back, depending on edge
/// orientation); callers that care must test the boundary separately.
pub fn is_inside(point: Point, polygon: &Polygon) -> bool {
    ray_cast(point, &polygon.vertices)
}

fn ray_cast(point: Point, vs: &[Point]) -> bool {
    let (x, y) = (point.x, point.y);
    let mut inside = false;
    let mut j = vs.len() - 1;
    for i in 0..vs.len() {
        let (xi, yi) = (vs[i].x, vs[i].y);
        let (xj, yj) = (vs[j].x, vs[j].y);
        if ((yi > y) != (yj > y)) && (x < (xj - xi) * (y - yi) / (yj - yi) + xi) {
            inside = !inside;
        }
        j = i;
    }
    inside
}

fn distinct_vertex_count(vertices: &[Point]) -> usize {
    let mut sorted: Vec<Point> = vertices.to_vec();
    sorted.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    sorted.dedup();
    sorted.len()
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/polygon.rs"]
mod tests;
