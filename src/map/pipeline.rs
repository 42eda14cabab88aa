use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};

use crate::foundation::core::{LonLat, Rgba8};
use crate::foundation::error::{AnaximanderError, AnaximanderResult};
use crate::geometry::outline::{polygon_from_outline, polygon_from_path_data};
use crate::geometry::polygon::Polygon;
use crate::map::document::{LayerSpec, MapDocument, RasterLayer, load_points, load_raster};
use crate::mask::points::mask_points;
use crate::mask::raster::{
    RasterGrid, RasterMask, RasterPlacement, is_valid_sample, mask_raster_with,
};
use crate::mask::values::{ScaleValue, ValueSet};
use crate::projection::globe::horizon_ring;
use crate::projection::graticule::Graticule;
use crate::projection::planar::{Fitted, ProjectionSpec, fit_to_canvas};
use crate::scale::color::ColorScale;
use crate::scale::domain::{ColorDomain, ScaleKind};
use crate::scale::legend::Legend;

/// Samples along the horizon of a globe view.
const GLOBE_SEGMENTS: usize = 144;

/// Domain computed for one layer in a map pass.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct LayerDomain {
    pub name: String,
    pub kind: ScaleKind,
    /// `None` when no value survived masking.
    pub domain: Option<ColorDomain>,
    /// Distinct values that survived masking.
    pub values: usize,
}

/// A map document with its projection fitted and clip boundary built.
///
/// The boundary is computed once and shared, read-only, by every layer.
#[derive(Debug)]
pub struct MapSession {
    doc: MapDocument,
    root: PathBuf,
    projection: Fitted<ProjectionSpec>,
    boundary: Polygon,
}

impl MapSession {
    /// Validate `doc`, fit its projection to the canvas and build the clip
    /// boundary. Layer sources are resolved against `root`.
    #[tracing::instrument(skip(doc, root), fields(layers = doc.layers.len()))]
    pub fn new(doc: MapDocument, root: impl Into<PathBuf>) -> AnaximanderResult<Self> {
        doc.validate()?;

        let outline = clip_outline(&doc.projection, &doc.graticule)?;
        let projection = fit_to_canvas(doc.projection, &outline, doc.canvas, doc.margin)?;
        let boundary = match &doc.clip_path {
            Some(d) => polygon_from_path_data(d)?,
            None => polygon_from_outline(&outline, &projection)?,
        };

        tracing::debug!(
            vertices = boundary.vertices().len(),
            globe = doc.projection.is_globe(),
            "built clip boundary"
        );
        Ok(Self {
            doc,
            root: root.into(),
            projection,
            boundary,
        })
    }

    /// Read, validate and open a map document from a JSON file. Layer sources
    /// resolve relative to the file's directory.
    pub fn open(path: &Path) -> AnaximanderResult<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            AnaximanderError::Other(
                anyhow::Error::new(e).context(format!("read map document '{}'", path.display())),
            )
        })?;
        let doc = MapDocument::from_json(&bytes)?;
        let root = path.parent().unwrap_or_else(|| Path::new("."));
        Self::new(doc, root)
    }

    pub fn document(&self) -> &MapDocument {
        &self.doc
    }

    pub fn projection(&self) -> &Fitted<ProjectionSpec> {
        &self.projection
    }

    pub fn boundary(&self) -> &Polygon {
        &self.boundary
    }

    fn layer(&self, name: &str) -> AnaximanderResult<&LayerSpec> {
        self.doc
            .layer(name)
            .ok_or_else(|| AnaximanderError::invalid_input(format!("unknown layer '{name}'")))
    }

    /// Values of `name` that fall inside the boundary.
    pub fn layer_values(&self, name: &str) -> AnaximanderResult<ValueSet> {
        match self.layer(name)? {
            LayerSpec::Raster(layer) => {
                let (grid, placement) = self.place_raster(layer)?;
                self.mask_placed_raster(layer, &grid, &placement)
            }
            LayerSpec::Points(layer) => {
                let points = load_points(&self.root, layer)?;
                Ok(mask_points(
                    &points,
                    &self.projection,
                    &self.boundary,
                    &layer.excluded,
                ))
            }
        }
    }

    /// Mask one layer and derive its color domain.
    #[tracing::instrument(skip(self))]
    pub fn mask_layer(&self, name: &str) -> AnaximanderResult<LayerDomain> {
        let kind = self.layer(name)?.scale();
        let values = self.layer_values(name)?;
        Ok(layer_domain(name, kind, &values))
    }

    /// [`Self::mask_layer`] for every layer, in document order.
    pub fn mask_all(&self) -> AnaximanderResult<Vec<LayerDomain>> {
        self.doc
            .layers
            .iter()
            .map(|l| self.mask_layer(l.name()))
            .collect()
    }

    /// Color scale for a masked layer, or `None` when its domain is empty.
    pub fn color_scale(&self, masked: &LayerDomain) -> AnaximanderResult<Option<ColorScale>> {
        let layer = self.layer(&masked.name)?;
        masked
            .domain
            .clone()
            .map(|d| ColorScale::new(d, layer.colors().to_vec(), layer.interpolation()))
            .transpose()
    }

    /// Color bar layout for a masked layer, titled with the layer name.
    pub fn legend(
        &self,
        masked: &LayerDomain,
        sections: usize,
        length_px: f64,
        digits: usize,
    ) -> AnaximanderResult<Option<Legend>> {
        self.color_scale(masked)?
            .map(|scale| {
                Legend::build(&scale, sections, length_px, digits)
                    .map(|l| l.with_title(masked.name.clone()))
            })
            .transpose()
    }

    /// Color a raster layer at grid resolution.
    ///
    /// Cells holding no data, an excluded value, or lying outside the boundary
    /// are transparent.
    #[tracing::instrument(skip(self))]
    pub fn colorize_raster(&self, name: &str) -> AnaximanderResult<(LayerDomain, RgbaImage)> {
        let LayerSpec::Raster(layer) = self.layer(name)? else {
            return Err(AnaximanderError::invalid_input(format!(
                "layer '{name}' is not a raster layer"
            )));
        };
        let (grid, placement) = self.place_raster(layer)?;
        let values = self.mask_placed_raster(layer, &grid, &placement)?;
        let masked = layer_domain(name, layer.scale, &values);
        let scale = self.color_scale(&masked)?;

        let (w, h) = image_dims(&grid)?;
        let mut img = RgbaImage::new(w, h);
        let Some(scale) = scale else {
            return Ok((masked, img));
        };

        let mut painted = 0usize;
        for (r, row) in grid.rows().enumerate() {
            for (c, &v) in row.iter().enumerate() {
                if !is_valid_sample(v, &layer.excluded)
                    || !self.boundary.contains(placement.cell_position(r, c))
                {
                    continue;
                }
                let value = ScaleValue::Number(v / layer.value_scale);
                let color = scale.color(&value).unwrap_or(Rgba8::TRANSPARENT);
                // Bounded by image_dims.
                img.put_pixel(c as u32, r as u32, Rgba(color.to_array()));
                painted += 1;
            }
        }

        tracing::debug!(painted, "colorized raster");
        Ok((masked, img))
    }

    fn place_raster(&self, layer: &RasterLayer) -> AnaximanderResult<(RasterGrid, RasterPlacement)> {
        let source = load_raster(&self.root, layer)?;
        let center = source.center;
        let corners = source.corners();
        let grid = source.into_grid()?;
        let placement = if layer.globe {
            RasterPlacement::globe(&self.projection, self.doc.projection.center(), &grid)?
        } else {
            RasterPlacement::from_corners(&self.projection, center, &corners, &grid)?
        };
        Ok((grid, placement))
    }

    fn mask_placed_raster(
        &self,
        layer: &RasterLayer,
        grid: &RasterGrid,
        placement: &RasterPlacement,
    ) -> AnaximanderResult<ValueSet> {
        let opts = RasterMask {
            value_scale: layer.value_scale,
            parallel: layer.parallel,
            threads: layer.threads,
        };
        mask_raster_with(grid, placement, &layer.excluded, &self.boundary, &opts)
    }
}

fn layer_domain(name: &str, kind: ScaleKind, values: &ValueSet) -> LayerDomain {
    let domain = ColorDomain::from_values(kind, values);
    if domain.is_none() {
        tracing::warn!(layer = name, "no values inside the map boundary");
    }
    LayerDomain {
        name: name.to_owned(),
        kind,
        domain,
        values: values.len(),
    }
}

/// Geographic ring the map is fitted to and clipped by: the horizon for a
/// whole-world globe, the graticule outline otherwise (sampled in rotated
/// space for a rotated equirectangular map).
fn clip_outline(
    projection: &ProjectionSpec,
    graticule: &Graticule,
) -> AnaximanderResult<Vec<LonLat>> {
    match *projection {
        ProjectionSpec::Equirectangular { rotate_lon } => graticule.rotated_outline(rotate_lon),
        ProjectionSpec::Orthographic { center } if *graticule == Graticule::world() => {
            Ok(horizon_ring(center, GLOBE_SEGMENTS))
        }
        ProjectionSpec::Orthographic { .. } => Ok(graticule.outline()),
    }
}

fn image_dims(grid: &RasterGrid) -> AnaximanderResult<(u32, u32)> {
    let w = u32::try_from(grid.width())
        .map_err(|_| AnaximanderError::invalid_input("raster too wide for an image"))?;
    let h = u32::try_from(grid.height())
        .map_err(|_| AnaximanderError::invalid_input("raster too tall for an image"))?;
    Ok((w, h))
}

#[cfg(test)]
#[path = "../../tests/unit/map/pipeline.rs"]
mod tests;
