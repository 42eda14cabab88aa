use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::foundation::core::NO_DATA;

/// A value that can feed a color-scale domain.
///
/// Values are totally ordered: numbers compare by value (`-0.0 == 0.0`),
/// every number sorts before every category, and categories compare as strings.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum ScaleValue {
    Number(f64),
    Category(String),
}

impl ScaleValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            Self::Category(_) => None,
        }
    }

    /// Whether this value is the raster no-data marker.
    pub fn is_no_data(&self) -> bool {
        matches!(self, Self::Number(v) if *v == NO_DATA)
    }
}

impl From<f64> for ScaleValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<&str> for ScaleValue {
    fn from(v: &str) -> Self {
        Self::Category(v.to_owned())
    }
}

impl std::fmt::Display for ScaleValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(v) => write!(f, "{v}"),
            Self::Category(s) => f.write_str(s),
        }
    }
}

impl Ord for ScaleValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            // Adding +0.0 folds -0.0 into 0.0 before the total order.
            (Self::Number(a), Self::Number(b)) => (a + 0.0).total_cmp(&(b + 0.0)),
            (Self::Number(_), Self::Category(_)) => Ordering::Less,
            (Self::Category(_), Self::Number(_)) => Ordering::Greater,
            (Self::Category(a), Self::Category(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for ScaleValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for ScaleValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ScaleValue {}

/// Deduplicated, ordered collection of values that survived masking.
///
/// Built fresh for one map pass and consumed by domain computation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValueSet(BTreeSet<ScaleValue>);

impl ValueSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, v: impl Into<ScaleValue>) -> bool {
        self.0.insert(v.into())
    }

    pub fn contains(&self, v: &ScaleValue) -> bool {
        self.0.contains(v)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Values in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &ScaleValue> {
        self.0.iter()
    }

    /// Finite numeric members in ascending order.
    pub fn numbers(&self) -> impl Iterator<Item = f64> + '_ {
        self.0
            .iter()
            .filter_map(ScaleValue::as_number)
            .filter(|v| v.is_finite())
    }

    /// Smallest and largest finite numeric member.
    pub fn extent(&self) -> Option<(f64, f64)> {
        let mut nums = self.numbers();
        let first = nums.next()?;
        let last = nums.last().unwrap_or(first);
        Some((first, last))
    }

    pub fn extend(&mut self, other: ValueSet) {
        self.0.extend(other.0);
    }

    pub fn into_vec(self) -> Vec<ScaleValue> {
        self.0.into_iter().collect()
    }
}

impl FromIterator<ScaleValue> for ValueSet {
    fn from_iter<I: IntoIterator<Item = ScaleValue>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for ValueSet {
    type Item = ScaleValue;
    type IntoIter = std::collections::btree_set::IntoIter<ScaleValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Raw values a layer must skip, compared before any value scaling.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ExcludedValues(BTreeSet<ScaleValue>);

impl ExcludedValues {
    pub fn new(values: impl IntoIterator<Item = ScaleValue>) -> Self {
        Self(values.into_iter().collect())
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn contains(&self, v: &ScaleValue) -> bool {
        self.0.contains(v)
    }

    #[inline]
    pub fn contains_number(&self, v: f64) -> bool {
        !self.0.is_empty() && self.0.contains(&ScaleValue::Number(v))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<f64> for ExcludedValues {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self(iter.into_iter().map(ScaleValue::Number).collect())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mask/values.rs"]
mod tests;
