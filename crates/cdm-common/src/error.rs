//! Error types for the labeled array model.

use thiserror::Error;

/// Result type alias using CdmError.
pub type CdmResult<T> = Result<T, CdmError>;

/// Errors raised by labeled array operations.
#[derive(Debug, Error)]
pub enum CdmError {
    /// A coordinate or operation referenced a dimension the array does not have.
    #[error("unknown dimension: {0}")]
    UnknownDimension(String),

    /// The data buffer does not match the product of the dimension sizes.
    #[error("data length {actual} does not match dimension sizes (expected {expected})")]
    DataLength { expected: usize, actual: usize },

    /// A coordinate's value count does not match its shape.
    #[error("coordinate '{coordinate}' has {actual} values but its shape implies {expected}")]
    CoordinateShape {
        coordinate: String,
        expected: usize,
        actual: usize,
    },

    /// A coordinate's dimension list and shape have different ranks.
    #[error("coordinate '{coordinate}' names {dims} dimensions but has {entries} shape entries")]
    ShapeRank {
        coordinate: String,
        dims: usize,
        entries: usize,
    },

    /// A coordinate's size along a dimension disagrees with the array.
    #[error("coordinate '{coordinate}' spans dimension '{dim}' with size {coord_size}, but the array has size {array_size}")]
    DimensionSizeMismatch {
        coordinate: String,
        dim: String,
        coord_size: usize,
        array_size: usize,
    },

    /// An index selection fell outside a dimension.
    #[error("index {index} out of bounds for dimension '{dim}' of size {size}")]
    IndexOutOfBounds {
        dim: String,
        index: usize,
        size: usize,
    },

    /// A lookup referenced a coordinate the array does not carry.
    #[error("coordinate not found: {0}")]
    CoordinateNotFound(String),

    /// A rename would clobber an existing coordinate.
    #[error("coordinate '{0}' already exists")]
    DuplicateCoordinate(String),
}
