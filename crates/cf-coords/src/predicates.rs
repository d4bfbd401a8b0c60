//! Coordinate classification predicates.
//!
//! Each predicate decides, from a coordinate's attributes and value kind
//! alone, whether it represents a given physical quantity. Decoders emit
//! unreliable names, so names play no part here. Predicates are pure and
//! never fail: missing or unrecognized metadata simply yields `false`.

use cdm_common::Coordinate;

/// Recognized spellings of CF latitude units.
const LATITUDE_UNITS: &[&str] = &[
    "degrees_north",
    "degree_north",
    "degrees_N",
    "degree_N",
    "degreesN",
    "degreeN",
];

/// Recognized spellings of CF longitude units.
const LONGITUDE_UNITS: &[&str] = &[
    "degrees_east",
    "degree_east",
    "degrees_E",
    "degree_E",
    "degreesE",
    "degreeE",
];

/// Pressure units the unit converter knows how to scale.
const PRESSURE_UNITS: &[&str] = &["Pa", "hPa", "mbar", "millibars"];

const FORECAST_REFERENCE_TIME: &str = "forecast_reference_time";
const FORECAST_PERIOD: &str = "forecast_period";

pub fn is_latitude(coord: &Coordinate) -> bool {
    matches!(coord.attrs().units(), Some(units) if LATITUDE_UNITS.contains(&units))
}

pub fn is_longitude(coord: &Coordinate) -> bool {
    matches!(coord.attrs().units(), Some(units) if LONGITUDE_UNITS.contains(&units))
}

/// A vertical pressure level, recognized by its units regardless of any
/// `standard_name`.
pub fn is_vertical_pressure(coord: &Coordinate) -> bool {
    matches!(coord.attrs().units(), Some(units) if PRESSURE_UNITS.contains(&units))
}

/// The model run timestamp, recognized by `standard_name` only.
pub fn is_forecast_reference_time(coord: &Coordinate) -> bool {
    coord.attrs().standard_name() == Some(FORECAST_REFERENCE_TIME)
}

/// A forecast lead time: either declared via `standard_name`, or
/// duration-kind values on a coordinate that is not a reference time.
pub fn is_forecast_period(coord: &Coordinate) -> bool {
    match coord.attrs().standard_name() {
        Some(FORECAST_PERIOD) => true,
        Some(FORECAST_REFERENCE_TIME) => false,
        _ => coord.values().is_duration_kind(),
    }
}

/// A plain calendar-time coordinate that is not a forecast reference time.
pub fn is_time(coord: &Coordinate) -> bool {
    coord.values().is_time_kind() && !is_forecast_reference_time(coord)
}

/// Any elapsed-duration coordinate.
pub fn is_timedelta(coord: &Coordinate) -> bool {
    coord.values().is_duration_kind()
}

/// A derived valid-time coordinate, carrying the `standard_name` the
/// deriver stamps on its output.
pub fn is_valid_time(coord: &Coordinate) -> bool {
    coord.values().is_time_kind() && coord.attrs().standard_name() == Some("time")
}
