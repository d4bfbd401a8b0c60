//! CF-convention coordinate translation for decoded meteorological data.
//!
//! Decoders hand over labeled arrays whose coordinates carry source-specific
//! names and units. This crate rewrites those coordinates into
//! Climate-and-Forecast names and units, and derives the `valid_time`
//! coordinate (reference time plus forecast step) that the source format
//! does not store directly.
//!
//! Classification never trusts coordinate names: only the `units` and
//! `standard_name` attributes and the value kind decide what a coordinate
//! is. Names are used for lookup alone.

pub mod error;
pub mod matching;
pub mod predicates;
pub mod translate;
pub mod units;
pub mod valid_time;

pub use error::{CfError, CfResult};
pub use matching::match_values;
pub use predicates::{
    is_forecast_period, is_forecast_reference_time, is_latitude, is_longitude, is_time,
    is_timedelta, is_valid_time, is_vertical_pressure,
};
pub use translate::{
    isobaric_target, translate, translate_coords, translate_coords_with, CoordRule, DEFAULT_RULES,
    TIME_UNITS,
};
pub use units::{convert_units, ConversionError};
pub use valid_time::{ensure_valid_time, VALID_TIME};
