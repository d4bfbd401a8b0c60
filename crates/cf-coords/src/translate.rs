//! Single-coordinate translation and the CF rule table.

use cdm_common::{Coordinate, DataArray};
use std::fmt;
use tracing::debug;

use crate::error::{CfError, CfResult};
use crate::predicates::{
    is_forecast_period, is_forecast_reference_time, is_latitude, is_longitude, is_time,
    is_vertical_pressure,
};
use crate::units::convert_units;

/// Units stamped on calendar-time coordinates after translation.
pub const TIME_UNITS: &str = "seconds since 1970-01-01T00:00:00";

/// A single translation rule: look up `source` on the array, check it with
/// `check`, convert it to `units` and rename it to `target`.
///
/// Rules are plain data; new CF mappings are added by appending entries.
#[derive(Debug, Clone, Copy)]
pub struct CoordRule {
    pub source: &'static str,
    pub units: &'static str,
    pub check: fn(&Coordinate) -> bool,
    pub target: &'static str,
}

impl fmt::Display for CoordRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} [{}]", self.source, self.target, self.units)
    }
}

/// The default translation table, in application order.
///
/// The plain-time rule runs before the reference-time rule: a reference
/// time renamed to `time` must never be re-examined by the plain-time rule.
/// With that ordering no rule's source is a previously produced target, so
/// each coordinate is translated at most once.
pub const DEFAULT_RULES: &[CoordRule] = &[
    CoordRule {
        source: "lat",
        units: "degrees_north",
        check: is_latitude,
        target: "latitude",
    },
    CoordRule {
        source: "lon",
        units: "degrees_east",
        check: is_longitude,
        target: "longitude",
    },
    CoordRule {
        source: "level",
        units: "hPa",
        check: is_vertical_pressure,
        target: "isobaricInhPa",
    },
    CoordRule {
        source: "time",
        units: TIME_UNITS,
        check: is_time,
        target: "valid_time",
    },
    CoordRule {
        source: "ref_time",
        units: TIME_UNITS,
        check: is_forecast_reference_time,
        target: "time",
    },
    CoordRule {
        source: "step",
        units: "h",
        check: is_forecast_period,
        target: "step",
    },
];

/// CF name of the isobaric level coordinate for a requested pressure unit,
/// for callers assembling their own rule tables.
pub fn isobaric_target(units: &str) -> Option<&'static str> {
    match units {
        "hPa" | "mbar" | "millibars" => Some("isobaricInhPa"),
        "Pa" => Some("isobaricInPa"),
        _ => None,
    }
}

/// Translate a single coordinate.
///
/// If `source` is not among the array's coordinates this is the identity
/// transform. A present coordinate must satisfy `check`: a coordinate
/// matched by name but failing its semantic classification means the source
/// metadata is corrupt, and that is a hard error rather than a skip. The
/// coordinate's values are then converted from their current `units`
/// (defaulting to `target_units` when absent) to `target_units`, and the
/// coordinate is renamed to `target`, renaming any dimension of the same
/// name with it. Nothing outside the touched coordinate changes.
pub fn translate<P>(
    source: &str,
    target_units: &str,
    check: P,
    target: &str,
    data: &DataArray,
) -> CfResult<DataArray>
where
    P: Fn(&Coordinate) -> bool,
{
    let Some(coord) = data.coord(source) else {
        return Ok(data.clone());
    };
    if !check(coord) {
        return Err(CfError::Validation {
            coordinate: source.to_string(),
            expected: target.to_string(),
        });
    }

    let current_units = coord.attrs().units().unwrap_or(target_units).to_string();
    let mut out = data.clone();
    if current_units != target_units {
        debug!(
            coordinate = source,
            from = %current_units,
            to = target_units,
            "converting coordinate units"
        );
        let converted = convert_units(coord.values(), &current_units, target_units)?;
        let mut replacement = coord.with_values(converted)?;
        replacement.attrs_mut().set_units(target_units);
        out = out.assign_coord(replacement)?;
    }
    if source != target {
        out = out.rename_coord(source, target)?;
    }
    Ok(out)
}

/// Apply the default rule table, threading the array through each rule.
///
/// After this pass the array carries CF coordinate names: `latitude`,
/// `longitude`, `isobaricInhPa`, `step`, the reference time as `time`, or a
/// plain time as `valid_time`, whichever were present.
pub fn translate_coords(data: &DataArray) -> CfResult<DataArray> {
    translate_coords_with(data, DEFAULT_RULES)
}

/// Apply a caller-supplied rule table in order.
pub fn translate_coords_with(data: &DataArray, rules: &[CoordRule]) -> CfResult<DataArray> {
    let mut out = data.clone();
    for rule in rules {
        out = translate(rule.source, rule.units, rule.check, rule.target, &out)?;
    }
    Ok(out)
}
