use rayon::prelude::*;

use crate::foundation::core::{LonLat, NO_DATA, Point, Vec2};
use crate::foundation::error::{AnaximanderError, AnaximanderResult};
use crate::geometry::polygon::Polygon;
use crate::mask::values::{ExcludedValues, ValueSet};
use crate::projection::globe::globe_dims;
use crate::projection::planar::Projection;

/// Rectangular grid of samples, stored row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct RasterGrid {
    width: usize,
    height: usize,
    data: Vec<f64>,
}

impl RasterGrid {
    /// Build a grid from nested rows, checking them against the declared size.
    pub fn new(width: usize, height: usize, rows: Vec<Vec<f64>>) -> AnaximanderResult<Self> {
        if rows.len() != height {
            return Err(AnaximanderError::invalid_input(format!(
                "raster declares height {height} but has {} rows",
                rows.len()
            )));
        }
        if let Some((r, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != width) {
            return Err(AnaximanderError::invalid_input(format!(
                "raster declares width {width} but row {r} has {} cells",
                row.len()
            )));
        }
        Self::from_flat(width, height, rows.into_iter().flatten().collect())
    }

    /// Build a grid from row-major samples.
    pub fn from_flat(width: usize, height: usize, data: Vec<f64>) -> AnaximanderResult<Self> {
        if width == 0 || height == 0 {
            return Err(AnaximanderError::invalid_input(
                "raster width/height must be > 0",
            ));
        }
        let cells = width.checked_mul(height).ok_or_else(|| {
            AnaximanderError::invalid_input(format!(
                "raster size {width}x{height} overflows the cell count"
            ))
        })?;
        if data.len() != cells {
            return Err(AnaximanderError::invalid_input(format!(
                "raster declares {width}x{height} cells but has {} samples",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.height || col >= self.width {
            return None;
        }
        Some(self.data[row * self.width + col])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.data.chunks_exact(self.width)
    }

    pub fn samples(&self) -> &[f64] {
        &self.data
    }
}

/// Whether a raw sample carries data for this layer.
#[inline]
pub fn is_valid_sample(v: f64, excluded: &ExcludedValues) -> bool {
    v != NO_DATA && v.is_finite() && !excluded.contains_number(v)
}

/// Where a raster grid lands on the plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RasterPlacement {
    /// Plane position of cell `(0, 0)`.
    pub origin: Point,
    pub cell_width: f64,
    pub cell_height: f64,
}

impl RasterPlacement {
    pub fn new(origin: Point, cell_width: f64, cell_height: f64) -> AnaximanderResult<Self> {
        if !origin.is_finite() {
            return Err(AnaximanderError::invalid_input(
                "raster origin must be finite",
            ));
        }
        if !cell_width.is_finite() || !cell_height.is_finite() {
            return Err(AnaximanderError::invalid_input(
                "raster cell size must be finite",
            ));
        }
        Ok(Self {
            origin,
            cell_width,
            cell_height,
        })
    }

    /// Place a grid whose geographic center and corners are known.
    ///
    /// The projected footprint is twice the largest center-to-corner offset on
    /// each axis, which tolerates corners that bend under the projection.
    /// Corners the projection clips are ignored; at least one must survive.
    pub fn from_corners<P: Projection>(
        projection: &P,
        center: LonLat,
        corners: &[LonLat],
        grid: &RasterGrid,
    ) -> AnaximanderResult<Self> {
        let c = projection.project(center).ok_or_else(|| {
            AnaximanderError::invalid_geometry("raster center is not projectable")
        })?;

        let mut half_w = f64::NEG_INFINITY;
        let mut half_h = f64::NEG_INFINITY;
        for q in corners.iter().filter_map(|&p| projection.project(p)) {
            half_w = half_w.max((c.x - q.x).abs());
            half_h = half_h.max((c.y - q.y).abs());
        }
        if !half_w.is_finite() || !half_h.is_finite() {
            return Err(AnaximanderError::invalid_geometry(
                "no raster corner is projectable",
            ));
        }

        Self::centered(c, 2.0 * half_w, 2.0 * half_h, grid)
    }

    /// Place a whole-globe image centered on the map center.
    pub fn globe<P: Projection>(
        projection: &P,
        map_center: LonLat,
        grid: &RasterGrid,
    ) -> AnaximanderResult<Self> {
        let dims = globe_dims(map_center, projection).ok_or_else(|| {
            AnaximanderError::invalid_geometry("globe horizon is not projectable")
        })?;
        let c = projection.project(map_center).ok_or_else(|| {
            AnaximanderError::invalid_geometry("map center is not projectable")
        })?;
        Self::centered(c, dims.width, dims.height, grid)
    }

    fn centered(
        center: Point,
        width_px: f64,
        height_px: f64,
        grid: &RasterGrid,
    ) -> AnaximanderResult<Self> {
        Self::new(
            center - Vec2::new(width_px / 2.0, height_px / 2.0),
            width_px / grid.width() as f64,
            height_px / grid.height() as f64,
        )
    }

    /// Plane position of cell `(row, col)`.
    #[inline]
    pub fn cell_position(&self, row: usize, col: usize) -> Point {
        Point::new(
            self.origin.x + col as f64 * self.cell_width,
            self.origin.y + row as f64 * self.cell_height,
        )
    }

    /// Projected footprint size of `grid`.
    pub fn footprint(&self, grid: &RasterGrid) -> (f64, f64) {
        (
            self.cell_width * grid.width() as f64,
            self.cell_height * grid.height() as f64,
        )
    }
}

#[derive(Clone, Debug)]
/// Tunables for raster masking.
pub struct RasterMask {
    /// Divisor applied to included samples before they enter the value set.
    pub value_scale: f64,
    /// Split rows across a rayon pool. Results equal the sequential pass.
    pub parallel: bool,
    /// Worker threads for the parallel pass. `None` uses rayon defaults.
    pub threads: Option<usize>,
}

impl Default for RasterMask {
    fn default() -> Self {
        Self {
            value_scale: 1.0,
            parallel: false,
            threads: None,
        }
    }
}

/// Collect the values of valid cells whose plane position lies inside `boundary`.
///
/// A cell is skipped when it holds the no-data sentinel or an excluded value;
/// otherwise its position `origin + (col * cell_width, row * cell_height)` is
/// tested against the boundary.
pub fn mask_raster(
    grid: &RasterGrid,
    origin: Point,
    cell_width: f64,
    cell_height: f64,
    excluded: &ExcludedValues,
    boundary: &Polygon,
) -> AnaximanderResult<ValueSet> {
    let placement = RasterPlacement::new(origin, cell_width, cell_height)?;
    mask_raster_with(grid, &placement, excluded, boundary, &RasterMask::default())
}

/// [`mask_raster`] with explicit placement and options.
#[tracing::instrument(
    skip(grid, placement, excluded, boundary, opts),
    fields(width = grid.width(), height = grid.height(), parallel = opts.parallel)
)]
pub fn mask_raster_with(
    grid: &RasterGrid,
    placement: &RasterPlacement,
    excluded: &ExcludedValues,
    boundary: &Polygon,
    opts: &RasterMask,
) -> AnaximanderResult<ValueSet> {
    if !opts.value_scale.is_finite() || opts.value_scale == 0.0 {
        return Err(AnaximanderError::invalid_input(
            "raster value_scale must be finite and non-zero",
        ));
    }

    let out = if opts.parallel {
        let pool = build_thread_pool(opts.threads)?;
        pool.install(|| {
            grid.samples()
                .par_chunks(grid.width())
                .enumerate()
                .fold(ValueSet::new, |mut acc, (r, row)| {
                    mask_row(r, row, placement, excluded, boundary, opts.value_scale, &mut acc);
                    acc
                })
                .reduce(ValueSet::new, |mut a, b| {
                    a.extend(b);
                    a
                })
        })
    } else {
        let mut acc = ValueSet::new();
        for (r, row) in grid.rows().enumerate() {
            mask_row(r, row, placement, excluded, boundary, opts.value_scale, &mut acc);
        }
        acc
    };

    tracing::debug!(values = out.len(), "masked raster");
    Ok(out)
}

fn mask_row(
    r: usize,
    row: &[f64],
    placement: &RasterPlacement,
    excluded: &ExcludedValues,
    boundary: &Polygon,
    value_scale: f64,
    out: &mut ValueSet,
) {
    let y = placement.cell_position(r, 0).y;
    let b = boundary.bounds();
    if y < b.y0 || y > b.y1 {
        return;
    }
    for (c, &v) in row.iter().enumerate() {
        if !is_valid_sample(v, excluded) {
            continue;
        }
        if boundary.contains(placement.cell_position(r, c)) {
            out.insert(v / value_scale);
        }
    }
}

fn build_thread_pool(threads: Option<usize>) -> AnaximanderResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(AnaximanderError::invalid_input(
            "raster mask 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| AnaximanderError::Other(anyhow::anyhow!("failed to build rayon thread pool: {e}")))
}

/// Raster file layout: sample rows plus the geographic center and corners of
/// the image.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RasterSource {
    pub width: usize,
    pub height: usize,
    pub data: Vec<Vec<f64>>,
    pub center: LonLat,
    pub up_left: LonLat,
    pub up_right: LonLat,
    pub lo_left: LonLat,
    pub lo_right: LonLat,
}

impl RasterSource {
    pub fn from_json(bytes: &[u8]) -> AnaximanderResult<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    pub fn corners(&self) -> [LonLat; 4] {
        [self.up_left, self.up_right, self.lo_left, self.lo_right]
    }

    pub fn into_grid(self) -> AnaximanderResult<RasterGrid> {
        RasterGrid::new(self.width, self.height, self.data)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mask/raster.rs"]
mod tests;
