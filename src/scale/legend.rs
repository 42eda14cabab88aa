use serde::Serialize;

use crate::foundation::core::Rgba8;
use crate::foundation::error::{AnaximanderError, AnaximanderResult};
use crate::mask::values::ScaleValue;
use crate::scale::color::ColorScale;
use crate::scale::domain::{ColorDomain, ScaleKind};

/// One filled block of a color bar.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LegendSection {
    /// Offset along the bar, in pixels.
    pub offset: f64,
    pub width: f64,
    pub value: ScaleValue,
    pub color: Rgba8,
}

/// A text label anchored at `position` pixels along the bar.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LegendLabel {
    pub position: f64,
    pub text: String,
}

/// Layout of a color bar, independent of orientation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Legend {
    pub kind: ScaleKind,
    pub length: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub sections: Vec<LegendSection>,
    pub labels: Vec<LegendLabel>,
}

impl Legend {
    /// Lay out a color bar `length_px` long for `scale`.
    ///
    /// Continuous scales get `sections` blocks (never more than one per pixel)
    /// sampled from `min` to `max` inclusive, and two end labels. Categorical
    /// scales get one block per category, each labelled at its center.
    /// Numbers are labelled with `digits` decimals.
    pub fn build(
        scale: &ColorScale,
        sections: usize,
        length_px: f64,
        digits: usize,
    ) -> AnaximanderResult<Self> {
        if !length_px.is_finite() || length_px < 1.0 {
            return Err(AnaximanderError::invalid_input(format!(
                "legend length must be at least 1px, got {length_px}"
            )));
        }

        match scale.domain() {
            &ColorDomain::Continuous { min, max } => {
                if sections == 0 {
                    return Err(AnaximanderError::invalid_input(
                        "legend needs at least one section",
                    ));
                }
                let n = sections.min(length_px.floor() as usize);
                let size = length_px / n as f64;
                let step = if n > 1 { (max - min) / (n - 1) as f64 } else { 0.0 };

                let sections = (0..n)
                    .map(|i| {
                        let v = min + step * i as f64;
                        LegendSection {
                            offset: size * i as f64,
                            width: size,
                            value: ScaleValue::Number(v),
                            color: scale.color_at(v),
                        }
                    })
                    .collect();
                let labels = vec![
                    LegendLabel {
                        position: 0.0,
                        text: format!("{min:.digits$}"),
                    },
                    LegendLabel {
                        position: length_px,
                        text: format!("{max:.digits$}"),
                    },
                ];

                Ok(Self {
                    kind: ScaleKind::Linear,
                    length: length_px,
                    title: None,
                    sections,
                    labels,
                })
            }
            ColorDomain::Categorical { values } => {
                let size = length_px / values.len().max(1) as f64;
                let mut out = Vec::with_capacity(values.len());
                let mut labels = Vec::with_capacity(values.len());
                for (i, v) in values.iter().enumerate() {
                    let offset = size * i as f64;
                    out.push(LegendSection {
                        offset,
                        width: size,
                        value: v.clone(),
                        color: scale.color(v).unwrap_or(Rgba8::TRANSPARENT),
                    });
                    labels.push(LegendLabel {
                        position: offset + size / 2.0,
                        text: match v {
                            ScaleValue::Number(n) => format!("{n:.digits$}"),
                            ScaleValue::Category(s) => s.clone(),
                        },
                    });
                }

                Ok(Self {
                    kind: ScaleKind::Ordinal,
                    length: length_px,
                    title: None,
                    sections: out,
                    labels,
                })
            }
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scale/legend.rs"]
mod tests;
