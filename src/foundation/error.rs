/// Convenience result type used across anaximander.
pub type AnaximanderResult<T> = Result<T, AnaximanderError>;

/// Top-level error taxonomy used by masking and map APIs.
///
/// Both geometry and input errors are fatal for the current map pass: a layer
/// clipped by a corrupt boundary would be misleading, so callers surface them
/// instead of rendering an empty or partial layer. No-data cells and excluded
/// values are never reported through this type.
#[derive(thiserror::Error, Debug)]
pub enum AnaximanderError {
    /// Boundary with fewer than 3 distinct vertices, or empty/malformed path data.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    /// Grid dimensions that disagree with the declared size, missing point
    /// coordinates, or an invalid map document.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AnaximanderError {
    /// Build an [`AnaximanderError::InvalidGeometry`] value.
    pub fn invalid_geometry(msg: impl Into<String>) -> Self {
        Self::InvalidGeometry(msg.into())
    }

    /// Build an [`AnaximanderError::InvalidInput`] value.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Build an [`AnaximanderError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for AnaximanderError {
    fn from(e: serde_json::Error) -> Self {
        Self::serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
