use crate::foundation::core::LonLat;
use crate::foundation::error::{AnaximanderError, AnaximanderResult};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Longitude/latitude extent whose outline bounds the map.
pub struct Graticule {
    /// `[south-west, north-east]` corners in degrees.
    pub extent: [LonLat; 2],
    /// Sampling step in degrees along the outline edges.
    #[serde(default = "default_precision")]
    pub precision: f64,
}

fn default_precision() -> f64 {
    2.5
}

/// Finest accepted outline sampling step, in degrees.
pub const MIN_PRECISION: f64 = 0.01;

impl Graticule {
    pub fn new(extent: [LonLat; 2]) -> AnaximanderResult<Self> {
        let g = Self {
            extent,
            precision: default_precision(),
        };
        g.validate()?;
        Ok(g)
    }

    /// Whole-globe extent.
    pub fn world() -> Self {
        Self {
            extent: [LonLat::new(-180.0, -90.0), LonLat::new(180.0, 90.0)],
            precision: default_precision(),
        }
    }

    pub fn validate(&self) -> AnaximanderResult<()> {
        let [sw, ne] = self.extent;
        if !sw.is_finite() || !ne.is_finite() {
            return Err(AnaximanderError::invalid_input(
                "graticule extent must be finite",
            ));
        }
        if sw.lon >= ne.lon || sw.lat >= ne.lat {
            return Err(AnaximanderError::invalid_input(
                "graticule extent must be [south-west, north-east] with positive size",
            ));
        }
        if ne.lon - sw.lon > 360.0 {
            return Err(AnaximanderError::invalid_input(
                "graticule extent must span at most 360 degrees of longitude",
            ));
        }
        if sw.lat < -90.0 || ne.lat > 90.0 {
            return Err(AnaximanderError::invalid_input(
                "graticule latitudes must lie within [-90, 90]",
            ));
        }
        if !self.precision.is_finite() || self.precision < MIN_PRECISION {
            return Err(AnaximanderError::invalid_input(format!(
                "graticule precision must be finite and >= {MIN_PRECISION}"
            )));
        }
        Ok(())
    }

    /// Closed ring around the extent: west meridian northwards, north parallel
    /// eastwards, east meridian southwards, south parallel westwards.
    ///
    /// Corners appear once and the first vertex is not repeated at the end.
    pub fn outline(&self) -> Vec<LonLat> {
        let [sw, ne] = self.extent;
        let step = self.precision;

        let mut ring = Vec::new();
        let mut push_edge = |pts: Vec<LonLat>| {
            // Each edge starts on the previous edge's last corner.
            let skip = usize::from(!ring.is_empty());
            ring.extend(pts.into_iter().skip(skip));
        };

        push_edge(
            samples(sw.lat, ne.lat, step)
                .map(|lat| LonLat::new(sw.lon, lat))
                .collect(),
        );
        push_edge(
            samples(sw.lon, ne.lon, step)
                .map(|lon| LonLat::new(lon, ne.lat))
                .collect(),
        );
        push_edge(
            samples(ne.lat, sw.lat, step)
                .map(|lat| LonLat::new(ne.lon, lat))
                .collect(),
        );
        push_edge(
            samples(ne.lon, sw.lon, step)
                .map(|lon| LonLat::new(lon, sw.lat))
                .collect(),
        );

        // The south edge ends on the starting corner.
        ring.pop();
        ring
    }

    /// Outline for a map that adds `rotate_lon` to every longitude before
    /// projecting (see [`Equirectangular`](crate::projection::planar::Equirectangular)).
    ///
    /// The ring is sampled in rotated space and shifted back, so its projected
    /// edges never jump across the antimeridian. A full-width extent becomes the
    /// whole rotated world. A partial extent that would straddle the
    /// antimeridian after rotation cannot be one polygon and fails with
    /// `InvalidGeometry`.
    pub fn rotated_outline(&self, rotate_lon: f64) -> AnaximanderResult<Vec<LonLat>> {
        if !rotate_lon.is_finite() {
            return Err(AnaximanderError::invalid_input(
                "longitude rotation must be finite",
            ));
        }
        let [sw, ne] = self.extent;
        let span = ne.lon - sw.lon;
        let (west, east) = if span >= 360.0 {
            (-180.0, 180.0)
        } else {
            let west = (sw.lon + rotate_lon + 180.0).rem_euclid(360.0) - 180.0;
            let east = west + span;
            if east > 180.0 + 1e-9 {
                return Err(AnaximanderError::invalid_geometry(format!(
                    "graticule extent [{}, {}] crosses the antimeridian when rotated by {rotate_lon}",
                    sw.lon, ne.lon
                )));
            }
            (west, east.min(180.0))
        };

        let rotated = Self {
            extent: [LonLat::new(west, sw.lat), LonLat::new(east, ne.lat)],
            precision: self.precision,
        };
        Ok(rotated
            .outline()
            .into_iter()
            .map(|p| LonLat::new(p.lon - rotate_lon, p.lat))
            .collect())
    }
}

/// Evenly spaced values from `a` to `b` inclusive, no wider apart than `step`.
fn samples(a: f64, b: f64, step: f64) -> impl Iterator<Item = f64> {
    let n = ((b - a).abs() / step).ceil().max(1.0) as usize;
    (0..=n).map(move |i| {
        if i == n {
            b
        } else {
            a + (b - a) * (i as f64) / (n as f64)
        }
    })
}

#[cfg(test)]
#[path = "../../tests/unit/projection/graticule.rs"]
mod tests;
