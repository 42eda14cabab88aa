use std::path::{Path, PathBuf};

use crate::foundation::core::{Canvas, Rgba8};
use crate::foundation::error::{AnaximanderError, AnaximanderResult};
use crate::mask::points::{PointFeature, points_from_json};
use crate::mask::raster::RasterSource;
use crate::mask::values::ExcludedValues;
use crate::projection::graticule::Graticule;
use crate::projection::planar::ProjectionSpec;
use crate::scale::color::Interpolation;
use crate::scale::domain::ScaleKind;

/// A map: canvas, projection, clip extent and the data layers drawn on it.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct MapDocument {
    pub canvas: Canvas,
    pub projection: ProjectionSpec,
    #[serde(default = "Graticule::world")]
    pub graticule: Graticule,
    /// Share of the canvas the fitted outline fills.
    #[serde(default = "default_margin")]
    pub margin: f64,
    /// SVG path data of an already drawn outline, in canvas pixels. When set
    /// it replaces the projected graticule outline as the clip boundary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clip_path: Option<String>,
    #[serde(default)]
    pub layers: Vec<LayerSpec>,
}

fn default_margin() -> f64 {
    0.9
}

fn default_value_scale() -> f64 {
    1.0
}

fn default_raster_interpolation() -> Interpolation {
    Interpolation::HslLong
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LayerSpec {
    Raster(RasterLayer),
    Points(PointLayer),
}

/// Gridded layer read from a [`RasterSource`] file.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct RasterLayer {
    pub name: String,
    /// Path to the raster JSON, relative to the document.
    pub source: PathBuf,
    /// Divisor applied to samples before they enter the domain.
    #[serde(default = "default_value_scale")]
    pub value_scale: f64,
    #[serde(default)]
    pub excluded: ExcludedValues,
    #[serde(default)]
    pub scale: ScaleKind,
    pub colors: Vec<Rgba8>,
    #[serde(default = "default_raster_interpolation")]
    pub interpolation: Interpolation,
    /// The image covers the whole globe and is placed on the globe
    /// silhouette instead of by its corners.
    #[serde(default)]
    pub globe: bool,
    #[serde(default)]
    pub parallel: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threads: Option<usize>,
}

/// Point layer read from a JSON array of `{x, y, <field>}` records.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct PointLayer {
    pub name: String,
    pub source: PathBuf,
    /// Record field holding the mapped attribute.
    pub field: String,
    #[serde(default)]
    pub excluded: ExcludedValues,
    #[serde(default)]
    pub scale: ScaleKind,
    pub colors: Vec<Rgba8>,
    #[serde(default)]
    pub interpolation: Interpolation,
}

impl LayerSpec {
    pub fn name(&self) -> &str {
        match self {
            Self::Raster(l) => &l.name,
            Self::Points(l) => &l.name,
        }
    }

    pub fn scale(&self) -> ScaleKind {
        match self {
            Self::Raster(l) => l.scale,
            Self::Points(l) => l.scale,
        }
    }

    pub fn colors(&self) -> &[Rgba8] {
        match self {
            Self::Raster(l) => &l.colors,
            Self::Points(l) => &l.colors,
        }
    }

    pub fn interpolation(&self) -> Interpolation {
        match self {
            Self::Raster(l) => l.interpolation,
            Self::Points(l) => l.interpolation,
        }
    }

    pub fn validate(&self) -> AnaximanderResult<()> {
        let name = self.name();
        if name.trim().is_empty() {
            return Err(AnaximanderError::invalid_input("layer name must be non-empty"));
        }
        let min_colors = match self.scale() {
            ScaleKind::Linear => 2,
            ScaleKind::Ordinal => 1,
        };
        if self.colors().len() < min_colors {
            return Err(AnaximanderError::invalid_input(format!(
                "layer '{name}' needs at least {min_colors} colors"
            )));
        }

        match self {
            Self::Raster(l) => {
                if !l.value_scale.is_finite() || l.value_scale == 0.0 {
                    return Err(AnaximanderError::invalid_input(format!(
                        "layer '{name}' value_scale must be finite and non-zero"
                    )));
                }
                if l.threads == Some(0) {
                    return Err(AnaximanderError::invalid_input(format!(
                        "layer '{name}' threads must be >= 1 when set"
                    )));
                }
            }
            Self::Points(l) => {
                if l.field.trim().is_empty() {
                    return Err(AnaximanderError::invalid_input(format!(
                        "layer '{name}' field must be non-empty"
                    )));
                }
            }
        }
        Ok(())
    }
}

impl MapDocument {
    pub fn from_json(bytes: &[u8]) -> AnaximanderResult<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    pub fn validate(&self) -> AnaximanderResult<()> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(AnaximanderError::invalid_input(
                "canvas width/height must be > 0",
            ));
        }
        if !self.margin.is_finite() || self.margin <= 0.0 {
            return Err(AnaximanderError::invalid_input(
                "margin must be finite and > 0",
            ));
        }
        self.graticule.validate()?;
        if let Some(d) = &self.clip_path
            && d.trim().is_empty()
        {
            return Err(AnaximanderError::invalid_input(
                "clip_path must be non-empty when set",
            ));
        }

        let mut seen = std::collections::BTreeSet::new();
        for layer in &self.layers {
            layer.validate()?;
            if !seen.insert(layer.name()) {
                return Err(AnaximanderError::invalid_input(format!(
                    "duplicate layer name '{}'",
                    layer.name()
                )));
            }
        }
        Ok(())
    }

    pub fn layer(&self, name: &str) -> Option<&LayerSpec> {
        self.layers.iter().find(|l| l.name() == name)
    }
}

/// Read a raster layer's source, resolving it against `root`.
pub fn load_raster(root: &Path, layer: &RasterLayer) -> AnaximanderResult<RasterSource> {
    let bytes = read_source(root, &layer.source)?;
    RasterSource::from_json(&bytes)
}

/// Read a point layer's records, resolving the source against `root`.
pub fn load_points(root: &Path, layer: &PointLayer) -> AnaximanderResult<Vec<PointFeature>> {
    let bytes = read_source(root, &layer.source)?;
    points_from_json(&bytes, &layer.field)
}

fn read_source(root: &Path, source: &Path) -> AnaximanderResult<Vec<u8>> {
    let path = root.join(source);
    std::fs::read(&path).map_err(|e| {
        AnaximanderError::Other(anyhow::Error::new(e).context(format!(
            "read layer source '{}'",
            path.display()
        )))
    })
}

#[cfg(test)]
#[path = "../../tests/unit/map/document.rs"]
mod tests;
