//! Labeled array model shared across the weather-cdm workspace.
//!
//! A `DataArray` is the container the translation layer operates on: named
//! dimensions, a row-major data buffer, insertion-ordered coordinate
//! variables and free-form attributes. Handles are cheap to clone and every
//! transformation returns a new handle sharing the buffers it did not touch.

pub mod array;
pub mod attrs;
pub mod coord;
pub mod error;
pub mod values;

pub use array::{DataArray, Dimension};
pub use attrs::{AttrValue, Attributes};
pub use coord::Coordinate;
pub use error::{CdmError, CdmResult};
pub use values::{outer_time_sum, Values};
