//! Valid-time derivation from forecast reference time and lead time.

use cdm_common::{outer_time_sum, Attributes, Coordinate, DataArray, Values};
use chrono::Duration;
use tracing::debug;

use crate::error::{CfError, CfResult};
use crate::matching::match_values;
use crate::predicates::{is_forecast_period, is_forecast_reference_time, is_time};
use crate::units::duration_factor;

/// Name of the derived coordinate.
pub const VALID_TIME: &str = "valid_time";

/// Guarantee a usable `valid_time` coordinate on the array.
///
/// The relevant coordinates are classified by their metadata, never by
/// name. Depending on which time-related coordinates are present:
///
/// - `valid_time` already there: the input handle is returned unchanged, so
///   repeated application is the identity and callers may use
///   [`DataArray::ptr_eq`] to detect a no-op run;
/// - reference time and step: `valid_time` is the outer sum (every
///   reference time plus every step), spanning the reference dimension then
///   the step dimension, scalar axes collapsing away;
/// - reference time alone: `valid_time` shares the reference coordinate's
///   values;
/// - a plain time alone: it is renamed to `valid_time`;
/// - a step without any reference time (for example after the reference
///   axis was collapsed by a reduction), or no time information at all:
///   an error. Valid time is never silently approximated.
pub fn ensure_valid_time(data: &DataArray) -> CfResult<DataArray> {
    if data.has_coord(VALID_TIME) {
        return Ok(data.clone());
    }

    let reference = unique(data, "forecast reference time", is_forecast_reference_time)?;
    let step = unique(data, "forecast period", is_forecast_period)?;

    match (reference, step) {
        (Some(reference), Some(step)) => {
            debug!(
                reference = reference.name(),
                step = step.name(),
                "deriving valid time from reference time and step"
            );
            let base = times_of(reference)?;
            let offsets = step_durations(step)?;
            let values = outer_time_sum(base, &offsets);
            let dims: Vec<String> = reference
                .dims()
                .iter()
                .chain(step.dims())
                .cloned()
                .collect();
            let shape: Vec<usize> = reference
                .shape()
                .iter()
                .chain(step.shape())
                .copied()
                .collect();
            let coord =
                Coordinate::new(VALID_TIME, dims, shape, Values::Time(values), derived_attrs())?;
            Ok(data.assign_coord(coord)?)
        }
        (Some(reference), None) => {
            debug!(reference = reference.name(), "valid time equals reference time");
            times_of(reference)?;
            let coord = Coordinate::new(
                VALID_TIME,
                reference.dims().to_vec(),
                reference.shape().to_vec(),
                reference.shared_values(),
                derived_attrs(),
            )?;
            Ok(data.assign_coord(coord)?)
        }
        (None, Some(step)) => Err(CfError::MissingReferenceTime {
            step: step.name().to_string(),
        }),
        (None, None) => match unique(data, "time", is_time)? {
            Some(time) => {
                debug!(time = time.name(), "renaming plain time to valid time");
                Ok(data.rename_coord(time.name(), VALID_TIME)?)
            }
            None => Err(CfError::NoTimeInformation),
        },
    }
}

/// The single coordinate matching `predicate`, if any. Several matches mean
/// the array is ambiguous and derivation must not guess.
fn unique<'a>(
    data: &'a DataArray,
    kind: &'static str,
    predicate: fn(&Coordinate) -> bool,
) -> CfResult<Option<&'a Coordinate>> {
    let names = match_values(
        |coord: &&Coordinate| predicate(coord),
        data.coords().map(|c| (c.name(), c)),
    );
    match names.as_slice() {
        [] => Ok(None),
        [name] => Ok(data.coord(name)),
        _ => Err(CfError::AmbiguousCoordinate {
            kind,
            names: names.iter().map(|n| n.to_string()).collect(),
        }),
    }
}

fn derived_attrs() -> Attributes {
    Attributes::new()
        .with("standard_name", "time")
        .with("long_name", "time")
}

fn times_of(reference: &Coordinate) -> CfResult<&[chrono::DateTime<chrono::Utc>]> {
    reference.values().as_times().ok_or_else(|| CfError::Validation {
        coordinate: reference.name().to_string(),
        expected: "calendar-time values".to_string(),
    })
}

/// The step values as elapsed durations. Native durations are used as-is;
/// numeric steps are interpreted through their duration units (hours when
/// unspecified, the convention of forecast lead times).
fn step_durations(step: &Coordinate) -> CfResult<Vec<Duration>> {
    match step.values() {
        Values::Duration(durations) => Ok(durations.clone()),
        Values::Float(values) => {
            let units = step.attrs().units().unwrap_or("h");
            let seconds = duration_factor(units).ok_or_else(|| CfError::Validation {
                coordinate: step.name().to_string(),
                expected: "duration-valued step".to_string(),
            })?;
            Ok(values
                .iter()
                .map(|v| Duration::milliseconds((v * seconds * 1000.0).round() as i64))
                .collect())
        }
        Values::Time(_) => Err(CfError::Validation {
            coordinate: step.name().to_string(),
            expected: "duration-valued step".to_string(),
        }),
    }
}
