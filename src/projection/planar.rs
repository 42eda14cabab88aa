use crate::foundation::core::{Affine, Canvas, LonLat, Point, Rect, Vec2};
use crate::foundation::error::{AnaximanderError, AnaximanderResult};

/// Geographic-to-plane mapping.
///
/// `None` means the coordinate is clipped (for example behind the visible
/// hemisphere) and must not be drawn or tested. Plane y grows downward, as on
/// screen.
pub trait Projection {
    /// Project one coordinate.
    fn project(&self, p: LonLat) -> Option<Point>;
}

impl<F> Projection for F
where
    F: Fn(LonLat) -> Option<Point>,
{
    fn project(&self, p: LonLat) -> Option<Point> {
        self(p)
    }
}

/// Plate carrée at unit scale (radians), optionally rotated around the polar axis.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Equirectangular {
    /// Longitude rotation in degrees, added before projecting.
    pub rotate_lon: f64,
}

impl Projection for Equirectangular {
    fn project(&self, p: LonLat) -> Option<Point> {
        if !p.is_finite() {
            return None;
        }
        let lon = wrap_lon(p.lon + self.rotate_lon);
        Some(Point::new(lon.to_radians(), -p.lat.to_radians()))
    }
}

/// Orthographic (globe) view at unit scale, clipped to the visible hemisphere.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Orthographic {
    /// Coordinate at the center of the view.
    pub center: LonLat,
}

const HORIZON_EPS: f64 = 1e-9;

impl Projection for Orthographic {
    fn project(&self, p: LonLat) -> Option<Point> {
        if !p.is_finite() {
            return None;
        }
        let (lam, phi) = (p.lon.to_radians(), p.lat.to_radians());
        let (lam0, phi0) = (self.center.lon.to_radians(), self.center.lat.to_radians());
        let dlam = lam - lam0;

        let cos_c = phi0.sin() * phi.sin() + phi0.cos() * phi.cos() * dlam.cos();
        if cos_c < -HORIZON_EPS {
            return None;
        }

        let x = phi.cos() * dlam.sin();
        let y = phi0.cos() * phi.sin() - phi0.sin() * phi.cos() * dlam.cos();
        Some(Point::new(x, -y))
    }
}

/// A projection followed by a plane transform (scale and translate).
#[derive(Clone, Debug, PartialEq)]
pub struct Fitted<P> {
    pub inner: P,
    pub transform: Affine,
}

impl<P: Projection> Projection for Fitted<P> {
    fn project(&self, p: LonLat) -> Option<Point> {
        self.inner.project(p).map(|q| self.transform * q)
    }
}

/// Closed set of projections a map document can name.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProjectionSpec {
    /// See [`Equirectangular`].
    Equirectangular {
        #[serde(default)]
        rotate_lon: f64,
    },
    /// See [`Orthographic`].
    Orthographic { center: LonLat },
}

impl ProjectionSpec {
    /// Geographic coordinate shown at the middle of the map.
    pub fn center(&self) -> LonLat {
        match *self {
            Self::Equirectangular { rotate_lon } => LonLat::new(-rotate_lon, 0.0),
            Self::Orthographic { center } => center,
        }
    }

    /// Whether the projection shows a single hemisphere as a disc.
    pub fn is_globe(&self) -> bool {
        match self {
            Self::Equirectangular { .. } => false,
            Self::Orthographic { .. } => true,
        }
    }
}

impl Projection for ProjectionSpec {
    fn project(&self, p: LonLat) -> Option<Point> {
        match *self {
            Self::Equirectangular { rotate_lon } => Equirectangular { rotate_lon }.project(p),
            Self::Orthographic { center } => Orthographic { center }.project(p),
        }
    }
}

/// Scale and center `projection` so the projected `outline` fills `margin`
/// of the canvas along its tighter axis.
pub fn fit_to_canvas<P: Projection>(
    projection: P,
    outline: &[LonLat],
    canvas: Canvas,
    margin: f64,
) -> AnaximanderResult<Fitted<P>> {
    if !margin.is_finite() || margin <= 0.0 {
        return Err(AnaximanderError::invalid_input(
            "fit margin must be finite and > 0",
        ));
    }

    let bounds = outline
        .iter()
        .filter_map(|&p| projection.project(p))
        .fold(None::<Rect>, |acc, q| {
            Some(match acc {
                Some(r) => r.union_pt(q),
                None => Rect::from_points(q, q),
            })
        })
        .ok_or_else(|| AnaximanderError::invalid_geometry("outline has no projectable vertices"))?;

    let size = canvas.size();
    let ratio = (bounds.width() / size.width).max(bounds.height() / size.height);
    if ratio <= 0.0 || !ratio.is_finite() {
        return Err(AnaximanderError::invalid_geometry(
            "projected outline has zero extent",
        ));
    }

    let s = margin / ratio;
    let t = Vec2::new(
        (size.width - s * (2.0 * bounds.x0 + bounds.width())) / 2.0,
        (size.height - s * (2.0 * bounds.y0 + bounds.height())) / 2.0,
    );
    Ok(Fitted {
        inner: projection,
        transform: Affine::translate(t) * Affine::scale(s),
    })
}

const ANTIMERIDIAN_EPS: f64 = 1e-9;

pub(crate) fn wrap_lon(lon: f64) -> f64 {
    let w = (lon + 180.0).rem_euclid(360.0) - 180.0;
    // Longitudes on the antimeridian keep the side they came from, so rings
    // with an edge at +/-180 stay closed.
    if (w + 180.0).abs() < ANTIMERIDIAN_EPS && lon > 0.0 {
        180.0
    } else if (w - 180.0).abs() < ANTIMERIDIAN_EPS && lon < 0.0 {
        -180.0
    } else {
        w
    }
}

#[cfg(test)]
#[path = "../../tests/unit/projection/planar.rs"]
mod tests;
