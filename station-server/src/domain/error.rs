//! Domain error types.
//!
//! These errors represent validation failures in the domain layer. They are
//! distinct from provider/IO errors and never carry transport details.

/// Domain-level errors for station validation and snapshot consistency.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// Station id is empty or whitespace
    #[error("station id must not be empty")]
    EmptyId,

    /// Latitude or longitude is NaN or infinite
    #[error("coordinates must be finite numbers")]
    NonFiniteCoordinates,

    /// Coordinates are finite but outside the valid lat/lon ranges
    #[error("coordinates ({latitude}, {longitude}) are out of range")]
    InvalidCoordinates { latitude: f64, longitude: f64 },

    /// Power output is zero, negative or non-finite
    #[error("power output must be positive, got {0} kW")]
    InvalidPower(f64),

    /// Price is negative or non-finite
    #[error("price per hour must be non-negative, got {0}")]
    InvalidPrice(f64),

    /// Rating outside 0..=5
    #[error("rating must be within 0..=5, got {0}")]
    RatingOutOfRange(f64),

    /// Two stations in one snapshot share an id
    #[error("duplicate station id: {0}")]
    DuplicateId(String),
}
