//! Coordinate value buffers.

use chrono::{DateTime, Duration, Utc};

/// The value buffer of a coordinate variable, flattened in row-major order.
///
/// Three kinds cover everything the decoding layer produces: plain numbers,
/// calendar timestamps, and elapsed durations. The kind is what the
/// classification predicates inspect when attribute metadata is silent.
#[derive(Debug, Clone, PartialEq)]
pub enum Values {
    Float(Vec<f64>),
    Time(Vec<DateTime<Utc>>),
    Duration(Vec<Duration>),
}

impl Values {
    pub fn len(&self) -> usize {
        match self {
            Values::Float(v) => v.len(),
            Values::Time(v) => v.len(),
            Values::Duration(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Human-readable kind label, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Values::Float(_) => "float",
            Values::Time(_) => "time",
            Values::Duration(_) => "duration",
        }
    }

    /// True for calendar timestamps.
    pub fn is_time_kind(&self) -> bool {
        matches!(self, Values::Time(_))
    }

    /// True for elapsed-time durations.
    pub fn is_duration_kind(&self) -> bool {
        matches!(self, Values::Duration(_))
    }

    pub fn as_floats(&self) -> Option<&[f64]> {
        match self {
            Values::Float(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_times(&self) -> Option<&[DateTime<Utc>]> {
        match self {
            Values::Time(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_durations(&self) -> Option<&[Duration]> {
        match self {
            Values::Duration(v) => Some(v),
            _ => None,
        }
    }

    /// Select the elements at `indices`, preserving their order.
    pub(crate) fn take(&self, indices: &[usize]) -> Values {
        match self {
            Values::Float(v) => Values::Float(indices.iter().map(|&i| v[i]).collect()),
            Values::Time(v) => Values::Time(indices.iter().map(|&i| v[i]).collect()),
            Values::Duration(v) => Values::Duration(indices.iter().map(|&i| v[i]).collect()),
        }
    }
}

/// Outer broadcast sum of calendar times and elapsed durations.
///
/// The result holds `base.len() * offsets.len()` timestamps in base-major
/// order: the offset index varies fastest. Callers attach the result over
/// the base dimension followed by the offset dimension.
pub fn outer_time_sum(base: &[DateTime<Utc>], offsets: &[Duration]) -> Vec<DateTime<Utc>> {
    let mut out = Vec::with_capacity(base.len() * offsets.len());
    for b in base {
        for o in offsets {
            out.push(*b + *o);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_kinds() {
        assert!(Values::Time(vec![]).is_time_kind());
        assert!(Values::Duration(vec![]).is_duration_kind());
        assert!(!Values::Float(vec![1.0]).is_time_kind());
        assert_eq!(Values::Float(vec![1.0]).kind(), "float");
    }

    #[test]
    fn test_take_preserves_order() {
        let v = Values::Float(vec![10.0, 20.0, 30.0, 40.0]);
        assert_eq!(v.take(&[3, 1]), Values::Float(vec![40.0, 20.0]));
    }

    #[test]
    fn test_outer_time_sum_order() {
        let t0 = Utc.with_ymd_and_hms(2017, 12, 1, 0, 0, 0).unwrap();
        let t1 = Utc.with_ymd_and_hms(2017, 12, 1, 12, 0, 0).unwrap();
        let offsets = [Duration::hours(0), Duration::hours(24)];

        let sums = outer_time_sum(&[t0, t1], &offsets);

        assert_eq!(sums.len(), 4);
        assert_eq!(sums[0], t0);
        assert_eq!(sums[1], t0 + Duration::hours(24));
        assert_eq!(sums[2], t1);
        assert_eq!(sums[3], t1 + Duration::hours(24));
    }

    #[test]
    fn test_outer_time_sum_scalar_base() {
        let t0 = Utc.with_ymd_and_hms(2017, 12, 1, 0, 0, 0).unwrap();
        let offsets = [Duration::hours(6), Duration::hours(12)];

        let sums = outer_time_sum(&[t0], &offsets);

        assert_eq!(sums, vec![t0 + Duration::hours(6), t0 + Duration::hours(12)]);
    }
}
