use crate::mask::values::{ScaleValue, ValueSet};

/// How layer values map onto colors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleKind {
    /// Continuous numeric range, interpolated between colors.
    #[default]
    Linear,
    /// Discrete categories, one color each.
    Ordinal,
}

/// The input side of a color scale.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColorDomain {
    /// Numeric extent `[min, max]`.
    Continuous { min: f64, max: f64 },
    /// Ascending, deduplicated categories.
    Categorical { values: Vec<ScaleValue> },
}

impl ColorDomain {
    /// Derive a domain from the values that survived masking.
    ///
    /// Continuous domains use the numeric extent and ignore categories.
    /// Returns `None` when nothing usable is left.
    pub fn from_values(kind: ScaleKind, values: &ValueSet) -> Option<Self> {
        match kind {
            ScaleKind::Linear => values
                .extent()
                .map(|(min, max)| Self::Continuous { min, max }),
            ScaleKind::Ordinal => {
                if values.is_empty() {
                    None
                } else {
                    Some(Self::Categorical {
                        values: values.iter().cloned().collect(),
                    })
                }
            }
        }
    }

    pub fn kind(&self) -> ScaleKind {
        match self {
            Self::Continuous { .. } => ScaleKind::Linear,
            Self::Categorical { .. } => ScaleKind::Ordinal,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scale/domain.rs"]
mod tests;
