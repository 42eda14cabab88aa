use crate::foundation::core::{LonLat, Size};
use crate::projection::planar::{Projection, wrap_lon};

/// The four horizon points (west, east, north, south) of the hemisphere
/// centered on `center`, in the order `[left, right, top, bottom]`.
pub fn horizon_points(center: LonLat) -> [LonLat; 4] {
    let (cx, cy) = (center.lon, center.lat);

    let (left_lon, right_lon) = if cx > -90.0 && cx < 90.0 {
        (cx - 90.0, cx + 90.0)
    } else if cx <= -90.0 {
        (180.0 + (cx + 90.0), cx + 90.0)
    } else {
        (cx - 90.0, (cx - 90.0) - 180.0)
    };

    let top_lat = 90.0 - cy.abs();
    let bottom_lat = cy.abs() - 90.0;
    let antipodal_lon = if cx < 0.0 { 180.0 + cx } else { cx - 180.0 };
    // A center on the equator puts the poles on the horizon; either branch works.
    let (top_lon, bottom_lon) = if cy <= 0.0 {
        (cx, antipodal_lon)
    } else {
        (antipodal_lon, cx)
    };

    [
        LonLat::new(left_lon, 0.0),
        LonLat::new(right_lon, 0.0),
        LonLat::new(top_lon, top_lat),
        LonLat::new(bottom_lon, bottom_lat),
    ]
}

/// Projected width and height of the globe silhouette around `center`.
///
/// Returns `None` when a horizon point cannot be projected.
pub fn globe_dims<P: Projection>(center: LonLat, projection: &P) -> Option<Size> {
    let [left, right, top, bottom] = horizon_points(center);
    let l = projection.project(left)?;
    let r = projection.project(right)?;
    let t = projection.project(top)?;
    let b = projection.project(bottom)?;
    Some(Size::new(r.x - l.x, b.y - t.y))
}

/// Densely sampled horizon circle (90 degrees from `center`), walked
/// clockwise from north. Used as the clip outline of a globe view.
pub fn horizon_ring(center: LonLat, segments: usize) -> Vec<LonLat> {
    let phi0 = center.lat.to_radians();
    let n = segments.max(4);
    (0..n)
        .map(|k| {
            let bearing = k as f64 / n as f64 * std::f64::consts::TAU;
            let phi = (phi0.cos() * bearing.cos()).asin();
            let dlam = (bearing.sin() * phi0.cos()).atan2(-phi0.sin() * phi.sin());
            LonLat::new(wrap_lon(center.lon + dlam.to_degrees()), phi.to_degrees())
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/projection/globe.rs"]
mod tests;
