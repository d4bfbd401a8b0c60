//! Error types for coordinate translation.

use cdm_common::CdmError;
use thiserror::Error;

use crate::units::ConversionError;

/// Result type alias using CfError.
pub type CfResult<T> = Result<T, CfError>;

/// Errors raised by coordinate translation and valid-time derivation.
///
/// All of these indicate a structural problem in the source metadata, not a
/// transient fault: they are raised at the point of detection and propagate
/// unmodified to the caller.
#[derive(Debug, Error)]
pub enum CfError {
    // === Validation errors ===
    /// A coordinate matched by name failed its semantic check. The source
    /// metadata is likely corrupt or mis-encoded.
    #[error("coordinate '{coordinate}' does not satisfy the '{expected}' classification")]
    Validation {
        coordinate: String,
        expected: String,
    },

    // === Unit conversion errors ===
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    // === Valid-time derivation errors ===
    /// Classification found several candidates where exactly one is needed.
    #[error("found more than one {kind} coordinate: {names:?}")]
    AmbiguousCoordinate {
        kind: &'static str,
        names: Vec<String>,
    },

    /// A forecast step survives but the reference-time axis does not, e.g.
    /// after a reduction collapsed it. Valid time cannot be reconstructed.
    #[error("forecast step '{step}' is present but no reference time coordinate survives")]
    MissingReferenceTime { step: String },

    /// Neither a valid time, a plain time, a reference time nor a step is
    /// present.
    #[error("no usable time coordinate is present")]
    NoTimeInformation,

    // === Model errors ===
    #[error(transparent)]
    Model(#[from] CdmError),
}
