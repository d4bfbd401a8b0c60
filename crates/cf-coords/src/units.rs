//! Unit conversion for the closed set of coordinate quantities.
//!
//! Only pressure and elapsed-duration units convert; everything else is out
//! of scope for coordinate translation and rejected rather than guessed at.

use cdm_common::Values;
use thiserror::Error;

/// Error raised when a unit pair is outside the supported closed set.
#[derive(Debug, Error)]
#[error("unsupported unit conversion from '{from}' to '{to}'")]
pub struct ConversionError {
    pub from: String,
    pub to: String,
}

/// Scale factor to pascals for recognized pressure units.
fn pressure_factor(unit: &str) -> Option<f64> {
    match unit {
        "Pa" => Some(1.0),
        "hPa" | "mbar" | "millibars" => Some(100.0),
        _ => None,
    }
}

/// Scale factor to seconds for recognized duration units.
pub(crate) fn duration_factor(unit: &str) -> Option<f64> {
    match unit {
        "s" | "sec" | "second" | "seconds" => Some(1.0),
        "min" | "minute" | "minutes" => Some(60.0),
        "h" | "hr" | "hour" | "hours" => Some(3600.0),
        "d" | "day" | "days" => Some(86400.0),
        _ => None,
    }
}

/// Convert coordinate values between two unit strings.
///
/// Identity when the units already match. `Float` buffers scale linearly
/// within the pressure class or within the duration class. Native
/// `Duration` buffers pass through unchanged when both units are duration
/// spellings: the values are absolute elapsed times, the unit only
/// describes their encoding. Every other pair is a [`ConversionError`];
/// element count and order are never altered.
pub fn convert_units(values: &Values, from: &str, to: &str) -> Result<Values, ConversionError> {
    if from == to {
        return Ok(values.clone());
    }
    let unsupported = || ConversionError {
        from: from.to_string(),
        to: to.to_string(),
    };
    match values {
        Values::Float(data) => {
            let factor = if let (Some(f), Some(t)) = (pressure_factor(from), pressure_factor(to)) {
                f / t
            } else if let (Some(f), Some(t)) = (duration_factor(from), duration_factor(to)) {
                f / t
            } else {
                return Err(unsupported());
            };
            Ok(Values::Float(data.iter().map(|v| v * factor).collect()))
        }
        Values::Duration(_) if duration_factor(from).is_some() && duration_factor(to).is_some() => {
            Ok(values.clone())
        }
        _ => Err(unsupported()),
    }
}
