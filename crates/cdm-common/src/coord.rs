//! Coordinate variables: axis arrays with attached metadata.

use std::sync::Arc;

use crate::attrs::Attributes;
use crate::error::{CdmError, CdmResult};
use crate::values::Values;

/// A coordinate variable: a small array labelling zero or more dimensions,
/// plus the attribute bag (`units`, `standard_name`, ...) that the
/// translation layer classifies it by.
///
/// The value buffer is shared; cloning a coordinate never copies data.
/// A scalar (0-D) coordinate has no dimensions and exactly one value.
#[derive(Debug, Clone, PartialEq)]
pub struct Coordinate {
    pub(crate) name: String,
    pub(crate) dims: Vec<String>,
    pub(crate) shape: Vec<usize>,
    pub(crate) values: Arc<Values>,
    pub(crate) attrs: Attributes,
}

impl Coordinate {
    /// Create a coordinate with explicit dimensions and shape.
    pub fn new(
        name: impl Into<String>,
        dims: Vec<String>,
        shape: Vec<usize>,
        values: impl Into<Arc<Values>>,
        attrs: Attributes,
    ) -> CdmResult<Self> {
        let name = name.into();
        let values = values.into();
        if dims.len() != shape.len() {
            return Err(CdmError::ShapeRank {
                coordinate: name,
                dims: dims.len(),
                entries: shape.len(),
            });
        }
        let expected: usize = shape.iter().product();
        if values.len() != expected {
            return Err(CdmError::CoordinateShape {
                coordinate: name,
                expected,
                actual: values.len(),
            });
        }
        Ok(Self {
            name,
            dims,
            shape,
            values,
            attrs,
        })
    }

    /// Create a 1-D coordinate over a dimension of the same name.
    pub fn indexed(name: impl Into<String>, values: impl Into<Arc<Values>>) -> Self {
        let name = name.into();
        let values = values.into();
        Self {
            dims: vec![name.clone()],
            shape: vec![values.len()],
            name,
            values,
            attrs: Attributes::new(),
        }
    }

    /// Create a scalar (0-D) coordinate holding a single value.
    pub fn scalar(name: impl Into<String>, values: impl Into<Arc<Values>>) -> CdmResult<Self> {
        let name = name.into();
        let values = values.into();
        if values.len() != 1 {
            return Err(CdmError::CoordinateShape {
                coordinate: name,
                expected: 1,
                actual: values.len(),
            });
        }
        Ok(Self {
            name,
            dims: vec![],
            shape: vec![],
            values,
            attrs: Attributes::new(),
        })
    }

    /// Builder-style attribute attachment.
    pub fn with_attrs(mut self, attrs: Attributes) -> Self {
        self.attrs = attrs;
        self
    }

    /// Same metadata, replaced value buffer. The element count must match.
    pub fn with_values(&self, values: impl Into<Arc<Values>>) -> CdmResult<Coordinate> {
        let values = values.into();
        if values.len() != self.values.len() {
            return Err(CdmError::CoordinateShape {
                coordinate: self.name.clone(),
                expected: self.values.len(),
                actual: values.len(),
            });
        }
        Ok(Coordinate {
            values,
            ..self.clone()
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Dimension names this coordinate spans, in order. Empty for scalars.
    pub fn dims(&self) -> &[String] {
        &self.dims
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn values(&self) -> &Values {
        &self.values
    }

    /// A handle on the shared value buffer, for building derived coordinates
    /// without copying.
    pub fn shared_values(&self) -> Arc<Values> {
        Arc::clone(&self.values)
    }

    pub fn attrs(&self) -> &Attributes {
        &self.attrs
    }

    pub fn attrs_mut(&mut self) -> &mut Attributes {
        &mut self.attrs
    }

    /// Total number of values.
    pub fn size(&self) -> usize {
        self.values.len()
    }

    pub fn is_scalar(&self) -> bool {
        self.dims.is_empty()
    }
}
