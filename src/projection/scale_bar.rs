use crate::foundation::core::{LonLat, Point};
use crate::foundation::error::{AnaximanderError, AnaximanderResult};
use crate::projection::planar::Projection;

#[derive(Clone, Debug, PartialEq)]
/// A horizontal scale bar of known ground length.
pub struct ScaleBar {
    pub start: LonLat,
    pub end: LonLat,
    pub start_px: Point,
    pub end_px: Point,
    pub length_km: f64,
}

impl ScaleBar {
    /// Build a bar starting at `origin` and running east for `length_km`.
    ///
    /// The end longitude solves the haversine distance along the parallel for
    /// small arcs: `lon1 = lon0 + (dx / R) * (180 / pi) / cos(lat0)`.
    pub fn new<P: Projection>(
        projection: &P,
        origin: LonLat,
        length_km: f64,
        earth_radius_km: f64,
    ) -> AnaximanderResult<Self> {
        if !length_km.is_finite() || length_km <= 0.0 {
            return Err(AnaximanderError::invalid_input(
                "scale bar length must be finite and > 0",
            ));
        }
        if !earth_radius_km.is_finite() || earth_radius_km <= 0.0 {
            return Err(AnaximanderError::invalid_input(
                "earth radius must be finite and > 0",
            ));
        }
        let cos_lat = origin.lat.to_radians().cos();
        if cos_lat.abs() < 1e-12 {
            return Err(AnaximanderError::invalid_input(
                "scale bar cannot start at a pole",
            ));
        }

        let end = LonLat::new(
            origin.lon + (length_km / earth_radius_km).to_degrees() / cos_lat,
            origin.lat,
        );
        let project = |p: LonLat| {
            projection.project(p).ok_or_else(|| {
                AnaximanderError::invalid_geometry(format!(
                    "scale bar endpoint ({}, {}) is not visible",
                    p.lon, p.lat
                ))
            })
        };

        Ok(Self {
            start: origin,
            end,
            start_px: project(origin)?,
            end_px: project(end)?,
            length_km,
        })
    }

    pub fn label(&self) -> String {
        format!("{}km", self.length_km)
    }

    /// Horizontal midpoint of the projected bar, where the label is centered.
    pub fn label_x(&self) -> f64 {
        self.start_px.x + (self.end_px.x - self.start_px.x) / 2.0
    }

    /// Projected great-circle arc between the endpoints, for projections where a
    /// straight segment misrepresents the bar (azimuthal views).
    ///
    /// Samples that fall outside the visible area are dropped.
    pub fn arc<P: Projection>(&self, projection: &P, segments: usize) -> Vec<Point> {
        let segments = segments.max(1);
        (0..=segments)
            .filter_map(|i| {
                let t = i as f64 / segments as f64;
                projection.project(great_circle_point(self.start, self.end, t))
            })
            .collect()
    }
}

/// Point at fraction `t` along the great circle from `a` to `b`.
pub fn great_circle_point(a: LonLat, b: LonLat, t: f64) -> LonLat {
    let to_xyz = |p: LonLat| {
        let (lam, phi) = (p.lon.to_radians(), p.lat.to_radians());
        [phi.cos() * lam.cos(), phi.cos() * lam.sin(), phi.sin()]
    };
    let (va, vb) = (to_xyz(a), to_xyz(b));
    let dot = (va[0] * vb[0] + va[1] * vb[1] + va[2] * vb[2]).clamp(-1.0, 1.0);
    let omega = dot.acos();
    if omega.abs() < 1e-12 {
        return a;
    }

    let s = omega.sin();
    let (ka, kb) = (((1.0 - t) * omega).sin() / s, (t * omega).sin() / s);
    let v = [
        ka * va[0] + kb * vb[0],
        ka * va[1] + kb * vb[1],
        ka * va[2] + kb * vb[2],
    ];
    LonLat::new(
        v[1].atan2(v[0]).to_degrees(),
        v[2].atan2((v[0] * v[0] + v[1] * v[1]).sqrt()).to_degrees(),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/projection/scale_bar.rs"]
mod tests;
