//! Shared fixtures for cf-coords integration tests.
//!
//! These mirror the arrays a GRIB decoder hands over: zero-filled data with
//! coordinates whose names are source-specific and whose classification
//! lives in the attached metadata.

#![allow(dead_code)]

use cdm_common::{Attributes, Coordinate, DataArray, Values};
use chrono::{DateTime, Duration, Utc};

pub fn ts(s: &str) -> DateTime<Utc> {
    s.parse().unwrap()
}

pub fn reference_times3() -> Vec<DateTime<Utc>> {
    vec![
        ts("2017-12-01T00:00:00Z"),
        ts("2017-12-01T12:00:00Z"),
        ts("2017-12-02T00:00:00Z"),
    ]
}

pub fn reference_times2() -> Vec<DateTime<Utc>> {
    vec![ts("2017-12-01T00:00:00Z"), ts("2017-12-01T12:00:00Z")]
}

fn latitude() -> Coordinate {
    Coordinate::indexed("lat", Values::Float(vec![0.0, 0.5]))
        .with_attrs(Attributes::new().with("units", "degrees_north"))
}

fn longitude() -> Coordinate {
    Coordinate::indexed("lon", Values::Float(vec![10.0, 10.5]))
        .with_attrs(Attributes::new().with("units", "degrees_east"))
}

fn pressure_levels() -> Coordinate {
    Coordinate::indexed("level", Values::Float(vec![950.0, 500.0]))
        .with_attrs(Attributes::new().with("units", "hPa"))
}

/// lat/lon/level grid carrying a forecast reference time axis.
pub fn forecast_reference_array() -> DataArray {
    DataArray::zeros(
        "t2m",
        &[("lat", 2), ("lon", 2), ("ref_time", 3), ("level", 2)],
    )
    .with_coord(latitude())
    .unwrap()
    .with_coord(longitude())
    .unwrap()
    .with_coord(
        Coordinate::indexed("ref_time", Values::Time(reference_times3())).with_attrs(
            Attributes::new().with("standard_name", "forecast_reference_time"),
        ),
    )
    .unwrap()
    .with_coord(pressure_levels())
    .unwrap()
}

/// The same grid with a plain analysis time instead of a reference time.
pub fn plain_time_array() -> DataArray {
    DataArray::zeros("t2m", &[("lat", 2), ("lon", 2), ("time", 3), ("level", 2)])
        .with_coord(latitude())
        .unwrap()
        .with_coord(longitude())
        .unwrap()
        .with_coord(Coordinate::indexed(
            "time",
            Values::Time(reference_times3()),
        ))
        .unwrap()
        .with_coord(pressure_levels())
        .unwrap()
}

/// A grid carrying both reference times and forecast steps.
pub fn forecast_step_array() -> DataArray {
    DataArray::zeros(
        "t2m",
        &[
            ("lat", 2),
            ("lon", 2),
            ("step", 3),
            ("ref_time", 2),
            ("level", 2),
        ],
    )
    .with_coord(latitude())
    .unwrap()
    .with_coord(longitude())
    .unwrap()
    .with_coord(
        Coordinate::indexed(
            "step",
            Values::Duration(vec![
                Duration::hours(0),
                Duration::hours(24),
                Duration::hours(48),
            ]),
        )
        .with_attrs(Attributes::new().with("standard_name", "forecast_period")),
    )
    .unwrap()
    .with_coord(
        Coordinate::indexed("ref_time", Values::Time(reference_times2())).with_attrs(
            Attributes::new().with("standard_name", "forecast_reference_time"),
        ),
    )
    .unwrap()
    .with_coord(pressure_levels())
    .unwrap()
}
