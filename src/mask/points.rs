use serde_json::{Map, Value};

use crate::foundation::core::LonLat;
use crate::foundation::error::{AnaximanderError, AnaximanderResult};
use crate::geometry::polygon::Polygon;
use crate::mask::values::{ExcludedValues, ScaleValue, ValueSet};
use crate::projection::planar::Projection;

/// A discrete feature with a geographic position and one attribute value.
#[derive(Clone, Debug, PartialEq)]
pub struct PointFeature {
    pub coord: LonLat,
    /// `None` when the record carries no value for the attribute.
    pub value: Option<ScaleValue>,
}

impl PointFeature {
    pub fn new(coord: LonLat, value: impl Into<ScaleValue>) -> Self {
        Self {
            coord,
            value: Some(value.into()),
        }
    }

    pub fn missing(coord: LonLat) -> Self {
        Self { coord, value: None }
    }

    /// Build a feature from a flat record with `x` (longitude) and `y`
    /// (latitude) fields.
    ///
    /// Coordinates may be numbers or numeric strings. The attribute becomes a
    /// number when it parses as one, a category otherwise; null, empty or
    /// absent attributes are missing values, as are non-finite numbers.
    pub fn from_record(record: &Map<String, Value>, value_field: &str) -> AnaximanderResult<Self> {
        let coord = LonLat::new(
            coordinate(record, "x")?,
            coordinate(record, "y")?,
        );
        let value = record.get(value_field).and_then(attribute);
        Ok(Self { coord, value })
    }
}

fn coordinate(record: &Map<String, Value>, field: &str) -> AnaximanderResult<f64> {
    let v = record
        .get(field)
        .ok_or_else(|| AnaximanderError::invalid_input(format!("point record is missing '{field}'")))?;
    let n = match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    n.filter(|n| n.is_finite()).ok_or_else(|| {
        AnaximanderError::invalid_input(format!("point record field '{field}' is not a number: {v}"))
    })
}

fn attribute(v: &Value) -> Option<ScaleValue> {
    match v {
        Value::Number(n) => n.as_f64().map(ScaleValue::Number),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                None
            } else if let Ok(n) = s.parse::<f64>() {
                // "NaN" and "inf" parse, but carry no mappable value.
                n.is_finite().then_some(ScaleValue::Number(n))
            } else {
                Some(ScaleValue::Category(s.to_owned()))
            }
        }
        Value::Bool(b) => Some(ScaleValue::Category(b.to_string())),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Parse a JSON array of point records (see [`PointFeature::from_record`]).
pub fn points_from_json(bytes: &[u8], value_field: &str) -> AnaximanderResult<Vec<PointFeature>> {
    let records: Vec<Map<String, Value>> = serde_json::from_slice(bytes)?;
    records
        .iter()
        .enumerate()
        .map(|(i, r)| {
            PointFeature::from_record(r, value_field).map_err(|e| match e {
                AnaximanderError::InvalidInput(msg) => {
                    AnaximanderError::invalid_input(format!("record {i}: {msg}"))
                }
                other => other,
            })
        })
        .collect()
}

/// Collect the values of points whose projected position lies inside `boundary`.
///
/// Points the projection clips, points without a value, points carrying the
/// no-data sentinel and points with an excluded value are skipped.
#[tracing::instrument(skip_all, fields(points = points.len()))]
pub fn mask_points<P: Projection>(
    points: &[PointFeature],
    projection: &P,
    boundary: &Polygon,
    excluded: &ExcludedValues,
) -> ValueSet {
    let mut out = ValueSet::new();
    let mut clipped = 0usize;
    for pt in points {
        let Some(value) = &pt.value else {
            continue;
        };
        if value.is_no_data() || excluded.contains(value) {
            continue;
        }
        let Some(pos) = projection.project(pt.coord) else {
            clipped += 1;
            continue;
        };
        if boundary.contains(pos) {
            out.insert(value.clone());
        }
    }

    tracing::debug!(values = out.len(), clipped, "masked points");
    out
}

#[cfg(test)]
#[path = "../../tests/unit/mask/points.rs"]
mod tests;
