/// Convenience result type used across monsterid.
pub type MonsterResult<T> = Result<T, MonsterError>;

/// Top-level error taxonomy used by library APIs.
#[derive(thiserror::Error, Debug)]
pub enum MonsterError {
    /// Invalid user-provided options or configuration data.
    #[error("validation error: {0}")]
    Validation(String),

    /// A part key outside the catalog, or a part the store does not hold.
    #[error("part not found: {0}")]
    PartNotFound(String),

    /// Part bytes that could not be decoded into a usable raster.
    #[error("decode error: {0}")]
    Decode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MonsterError {
    /// Build a [`MonsterError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MonsterError::PartNotFound`] value.
    pub fn part_not_found(msg: impl Into<String>) -> Self {
        Self::PartNotFound(msg.into())
    }

    /// Build a [`MonsterError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
