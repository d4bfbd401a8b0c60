//! The labeled n-dimensional array handle.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::attrs::{AttrValue, Attributes};
use crate::coord::Coordinate;
use crate::error::{CdmError, CdmResult};

/// A named dimension with its size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimension {
    pub name: String,
    pub size: usize,
}

impl Dimension {
    pub fn new(name: impl Into<String>, size: usize) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }
}

/// A labeled n-dimensional array: ordered dimensions, a row-major data
/// buffer, insertion-ordered coordinate variables and free-form attributes.
///
/// `DataArray` is a cheap handle over immutable shared state. Every
/// transformation returns a new handle; buffers the transformation does not
/// touch are shared between the input and the output, never copied.
/// [`DataArray::ptr_eq`] observes whether two handles are the same value.
#[derive(Debug, Clone, PartialEq)]
pub struct DataArray {
    inner: Arc<ArrayInner>,
}

#[derive(Debug, Clone, PartialEq)]
struct ArrayInner {
    name: String,
    dims: Vec<Dimension>,
    data: Arc<Vec<f32>>,
    coords: Vec<Coordinate>,
    attrs: Attributes,
}

impl DataArray {
    /// Create an array from dimensions and a row-major buffer.
    pub fn new(name: impl Into<String>, dims: Vec<Dimension>, data: Vec<f32>) -> CdmResult<Self> {
        let expected: usize = dims.iter().map(|d| d.size).product();
        if data.len() != expected {
            return Err(CdmError::DataLength {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self::wrap(ArrayInner {
            name: name.into(),
            dims,
            data: Arc::new(data),
            coords: Vec::new(),
            attrs: Attributes::new(),
        }))
    }

    /// Create a zero-filled array, mainly for tests and fixtures.
    pub fn zeros(name: impl Into<String>, dims: &[(&str, usize)]) -> Self {
        let dims: Vec<Dimension> = dims.iter().map(|(n, s)| Dimension::new(*n, *s)).collect();
        let len = dims.iter().map(|d| d.size).product();
        Self::wrap(ArrayInner {
            name: name.into(),
            dims,
            data: Arc::new(vec![0.0; len]),
            coords: Vec::new(),
            attrs: Attributes::new(),
        })
    }

    fn wrap(inner: ArrayInner) -> Self {
        Self {
            inner: Arc::new(inner),
        }
    }

    /// True when both handles point at the same underlying value.
    ///
    /// Equality (`==`) compares contents; this compares identity, which is
    /// how callers detect that a transformation was a no-op.
    pub fn ptr_eq(a: &DataArray, b: &DataArray) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn dims(&self) -> &[Dimension] {
        &self.inner.dims
    }

    pub fn dim(&self, name: &str) -> Option<&Dimension> {
        self.inner.dims.iter().find(|d| d.name == name)
    }

    pub fn has_dim(&self, name: &str) -> bool {
        self.dim(name).is_some()
    }

    /// Dimension sizes, in dimension order.
    pub fn shape(&self) -> Vec<usize> {
        self.inner.dims.iter().map(|d| d.size).collect()
    }

    /// The row-major data buffer.
    pub fn data(&self) -> &[f32] {
        &self.inner.data
    }

    pub fn attrs(&self) -> &Attributes {
        &self.inner.attrs
    }

    /// Coordinates in insertion order.
    pub fn coords(&self) -> impl Iterator<Item = &Coordinate> {
        self.inner.coords.iter()
    }

    pub fn coord(&self, name: &str) -> Option<&Coordinate> {
        self.inner.coords.iter().find(|c| c.name == name)
    }

    pub fn has_coord(&self, name: &str) -> bool {
        self.coord(name).is_some()
    }

    /// Builder-style coordinate attachment, for constructing fixtures.
    pub fn with_coord(self, coord: Coordinate) -> CdmResult<Self> {
        self.assign_coord(coord)
    }

    /// Builder-style attribute attachment.
    pub fn with_attr(self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        let mut inner = (*self.inner).clone();
        inner.attrs.set(key, value);
        Self::wrap(inner)
    }

    /// Attach a coordinate, replacing any existing coordinate of the same
    /// name in place. Every dimension the coordinate spans must exist on the
    /// array with a matching size.
    pub fn assign_coord(&self, coord: Coordinate) -> CdmResult<DataArray> {
        self.validate_coord(&coord)?;
        let mut inner = (*self.inner).clone();
        match inner.coords.iter_mut().find(|c| c.name == coord.name) {
            Some(slot) => *slot = coord,
            None => inner.coords.push(coord),
        }
        Ok(Self::wrap(inner))
    }

    /// Remove a coordinate by name.
    pub fn drop_coord(&self, name: &str) -> CdmResult<DataArray> {
        if !self.has_coord(name) {
            return Err(CdmError::CoordinateNotFound(name.to_string()));
        }
        let mut inner = (*self.inner).clone();
        inner.coords.retain(|c| c.name != name);
        Ok(Self::wrap(inner))
    }

    /// Rename a coordinate. A dimension of the same name is renamed with it,
    /// everywhere it is referenced.
    pub fn rename_coord(&self, old: &str, new: &str) -> CdmResult<DataArray> {
        if !self.has_coord(old) {
            return Err(CdmError::CoordinateNotFound(old.to_string()));
        }
        if old != new && self.has_coord(new) {
            return Err(CdmError::DuplicateCoordinate(new.to_string()));
        }
        let mut inner = (*self.inner).clone();
        let rename_dim = inner.dims.iter().any(|d| d.name == old);
        if rename_dim {
            for dim in &mut inner.dims {
                if dim.name == old {
                    dim.name = new.to_string();
                }
            }
        }
        for coord in &mut inner.coords {
            if coord.name == old {
                coord.name = new.to_string();
            }
            if rename_dim {
                for dim_name in &mut coord.dims {
                    if dim_name == old {
                        *dim_name = new.to_string();
                    }
                }
            }
        }
        Ok(Self::wrap(inner))
    }

    /// Drop every size-1 dimension. Coordinates lose the squeezed axes;
    /// 1-D coordinates over a squeezed dimension become scalars. The data
    /// buffer is shared, not copied.
    pub fn squeeze(&self) -> DataArray {
        let squeezed: Vec<String> = self
            .inner
            .dims
            .iter()
            .filter(|d| d.size == 1)
            .map(|d| d.name.clone())
            .collect();
        if squeezed.is_empty() {
            return self.clone();
        }
        let mut inner = (*self.inner).clone();
        inner.dims.retain(|d| d.size > 1);
        for coord in &mut inner.coords {
            if coord.dims.iter().any(|d| squeezed.contains(d)) {
                // Removing size-1 axes leaves the flat layout untouched.
                let kept: Vec<(String, usize)> = coord
                    .dims
                    .iter()
                    .zip(&coord.shape)
                    .filter(|(d, _)| !squeezed.contains(d))
                    .map(|(d, s)| (d.clone(), *s))
                    .collect();
                coord.dims = kept.iter().map(|(d, _)| d.clone()).collect();
                coord.shape = kept.iter().map(|(_, s)| *s).collect();
            }
        }
        Self::wrap(inner)
    }

    /// Select a single index along a dimension, removing the dimension.
    ///
    /// Coordinates spanning the dimension are reduced along it; a 1-D
    /// coordinate becomes a scalar holding the selected value.
    pub fn isel(&self, dim: &str, index: usize) -> CdmResult<DataArray> {
        let axis = self.axis_index(dim)?;
        let shape = self.shape();
        let size = shape[axis];
        if index >= size {
            return Err(CdmError::IndexOutOfBounds {
                dim: dim.to_string(),
                index,
                size,
            });
        }

        let inner_len: usize = shape[axis + 1..].iter().product();
        let outer_len: usize = shape[..axis].iter().product();
        let mut data = Vec::with_capacity(outer_len * inner_len);
        for o in 0..outer_len {
            let base = (o * size + index) * inner_len;
            data.extend_from_slice(&self.inner.data[base..base + inner_len]);
        }

        let mut dims = self.inner.dims.clone();
        dims.remove(axis);

        let coords = self
            .inner
            .coords
            .iter()
            .map(|c| select_coord_axis(c, dim, index))
            .collect();

        Ok(Self::wrap(ArrayInner {
            name: self.inner.name.clone(),
            dims,
            data: Arc::new(data),
            coords,
            attrs: self.inner.attrs.clone(),
        }))
    }

    /// Arithmetic mean over a dimension, removing it. Coordinates spanning
    /// the reduced dimension are dropped: their values no longer describe
    /// any axis of the result.
    pub fn mean(&self, dim: &str) -> CdmResult<DataArray> {
        let axis = self.axis_index(dim)?;
        let shape = self.shape();
        let size = shape[axis];
        let inner_len: usize = shape[axis + 1..].iter().product();
        let outer_len: usize = shape[..axis].iter().product();

        let mut data = vec![0.0f32; outer_len * inner_len];
        for o in 0..outer_len {
            for j in 0..size {
                let base = (o * size + j) * inner_len;
                for i in 0..inner_len {
                    data[o * inner_len + i] += self.inner.data[base + i];
                }
            }
        }
        for value in &mut data {
            *value /= size as f32;
        }

        let mut dims = self.inner.dims.clone();
        dims.remove(axis);

        let coords = self
            .inner
            .coords
            .iter()
            .filter(|c| !c.dims.iter().any(|d| d == dim))
            .cloned()
            .collect();

        Ok(Self::wrap(ArrayInner {
            name: self.inner.name.clone(),
            dims,
            data: Arc::new(data),
            coords,
            attrs: self.inner.attrs.clone(),
        }))
    }

    fn axis_index(&self, dim: &str) -> CdmResult<usize> {
        self.inner
            .dims
            .iter()
            .position(|d| d.name == dim)
            .ok_or_else(|| CdmError::UnknownDimension(dim.to_string()))
    }

    fn validate_coord(&self, coord: &Coordinate) -> CdmResult<()> {
        for (dim_name, &size) in coord.dims.iter().zip(&coord.shape) {
            match self.dim(dim_name) {
                None => return Err(CdmError::UnknownDimension(dim_name.clone())),
                Some(dim) if dim.size != size => {
                    return Err(CdmError::DimensionSizeMismatch {
                        coordinate: coord.name.clone(),
                        dim: dim_name.clone(),
                        coord_size: size,
                        array_size: dim.size,
                    })
                }
                Some(_) => {}
            }
        }
        Ok(())
    }
}

/// Reduce one axis of a coordinate to a single index. Coordinates that do
/// not span the dimension are returned unchanged (shared storage).
fn select_coord_axis(coord: &Coordinate, dim: &str, index: usize) -> Coordinate {
    let Some(axis) = coord.dims.iter().position(|d| d == dim) else {
        return coord.clone();
    };
    let size = coord.shape[axis];
    let inner_len: usize = coord.shape[axis + 1..].iter().product();
    let outer_len: usize = coord.shape[..axis].iter().product();

    let mut indices = Vec::with_capacity(outer_len * inner_len);
    for o in 0..outer_len {
        let base = (o * size + index) * inner_len;
        indices.extend(base..base + inner_len);
    }

    let mut dims = coord.dims.clone();
    dims.remove(axis);
    let mut shape = coord.shape.clone();
    shape.remove(axis);

    Coordinate {
        name: coord.name.clone(),
        dims,
        shape,
        values: Arc::new(coord.values.take(&indices)),
        attrs: coord.attrs.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values::Values;

    fn sample() -> DataArray {
        // 2 x 3 array: [[0, 1, 2], [3, 4, 5]]
        DataArray::new(
            "t2m",
            vec![Dimension::new("lat", 2), Dimension::new("lon", 3)],
            (0..6).map(|v| v as f32).collect(),
        )
        .unwrap()
        .with_coord(Coordinate::indexed("lat", Values::Float(vec![0.0, 0.5])))
        .unwrap()
        .with_coord(Coordinate::indexed(
            "lon",
            Values::Float(vec![10.0, 10.5, 11.0]),
        ))
        .unwrap()
    }

    #[test]
    fn test_new_rejects_wrong_data_length() {
        let result = DataArray::new("bad", vec![Dimension::new("x", 4)], vec![0.0; 3]);
        assert!(matches!(result, Err(CdmError::DataLength { .. })));
    }

    #[test]
    fn test_assign_coord_validates_dimensions() {
        let da = sample();
        let unknown = Coordinate::indexed("height", Values::Float(vec![2.0]));
        assert!(matches!(
            da.assign_coord(unknown),
            Err(CdmError::UnknownDimension(_))
        ));

        let wrong_size = Coordinate::new(
            "lat2",
            vec!["lat".to_string()],
            vec![3],
            Values::Float(vec![0.0, 1.0, 2.0]),
            Attributes::new(),
        )
        .unwrap();
        assert!(matches!(
            da.assign_coord(wrong_size),
            Err(CdmError::DimensionSizeMismatch { .. })
        ));
    }

    #[test]
    fn test_assign_coord_replaces_in_place() {
        let da = sample();
        let replacement =
            Coordinate::indexed("lat", Values::Float(vec![1.0, 2.0]));
        let out = da.assign_coord(replacement).unwrap();

        let names: Vec<&str> = out.coords().map(|c| c.name()).collect();
        assert_eq!(names, ["lat", "lon"]);
        assert_eq!(
            out.coord("lat").unwrap().values(),
            &Values::Float(vec![1.0, 2.0])
        );
    }

    #[test]
    fn test_rename_coord_renames_dimension_everywhere() {
        let da = sample();
        let out = da.rename_coord("lat", "latitude").unwrap();

        assert!(out.has_coord("latitude"));
        assert!(!out.has_coord("lat"));
        assert!(out.has_dim("latitude"));
        assert!(!out.has_dim("lat"));
        assert_eq!(out.coord("latitude").unwrap().dims(), ["latitude".to_string()]);
        // untouched coordinate keeps its own dimension
        assert_eq!(out.coord("lon").unwrap().dims(), ["lon".to_string()]);
    }

    #[test]
    fn test_rename_coord_rejects_clobber() {
        let da = sample();
        assert!(matches!(
            da.rename_coord("lat", "lon"),
            Err(CdmError::DuplicateCoordinate(_))
        ));
        assert!(matches!(
            da.rename_coord("missing", "x"),
            Err(CdmError::CoordinateNotFound(_))
        ));
    }

    #[test]
    fn test_squeeze_drops_size_one_dims() {
        let da = DataArray::zeros("t2m", &[("lat", 1), ("lon", 3)])
            .with_coord(Coordinate::indexed("lat", Values::Float(vec![0.0])))
            .unwrap()
            .with_coord(Coordinate::indexed(
                "lon",
                Values::Float(vec![10.0, 10.5, 11.0]),
            ))
            .unwrap();

        let out = da.squeeze();

        assert_eq!(out.shape(), vec![3]);
        let lat = out.coord("lat").unwrap();
        assert!(lat.is_scalar());
        assert_eq!(lat.values(), &Values::Float(vec![0.0]));
        // data buffer is shared, not copied
        assert!(std::ptr::eq(da.data().as_ptr(), out.data().as_ptr()));
    }

    #[test]
    fn test_squeeze_without_size_one_dims_is_cheap() {
        let da = sample();
        let out = da.squeeze();
        assert!(DataArray::ptr_eq(&da, &out));
    }

    #[test]
    fn test_isel_selects_and_demotes_coordinate() {
        let da = sample();
        let out = da.isel("lat", 1).unwrap();

        assert_eq!(out.shape(), vec![3]);
        assert_eq!(out.data(), [3.0, 4.0, 5.0]);
        let lat = out.coord("lat").unwrap();
        assert!(lat.is_scalar());
        assert_eq!(lat.values(), &Values::Float(vec![0.5]));
        assert_eq!(out.coord("lon").unwrap().size(), 3);

        assert!(matches!(
            da.isel("lat", 2),
            Err(CdmError::IndexOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_isel_middle_axis() {
        let da = DataArray::new(
            "t2m",
            vec![
                Dimension::new("a", 2),
                Dimension::new("b", 2),
                Dimension::new("c", 2),
            ],
            (0..8).map(|v| v as f32).collect(),
        )
        .unwrap();

        let out = da.isel("b", 1).unwrap();
        assert_eq!(out.shape(), vec![2, 2]);
        assert_eq!(out.data(), [2.0, 3.0, 6.0, 7.0]);
    }

    #[test]
    fn test_mean_drops_spanning_coordinates() {
        let da = sample();
        let out = da.mean("lat").unwrap();

        assert_eq!(out.shape(), vec![3]);
        assert_eq!(out.data(), [1.5, 2.5, 3.5]);
        assert!(!out.has_coord("lat"));
        assert!(out.has_coord("lon"));
        assert!(matches!(
            da.mean("missing"),
            Err(CdmError::UnknownDimension(_))
        ));
    }

    #[test]
    fn test_equality_is_structural_identity_is_not() {
        let a = sample();
        let b = sample();
        assert_eq!(a, b);
        assert!(!DataArray::ptr_eq(&a, &b));

        let c = a.clone();
        assert!(DataArray::ptr_eq(&a, &c));
    }
}
