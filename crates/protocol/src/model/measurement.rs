//! Single-or-distribution numeric values
//!
//! One fixed-width record covers both shapes. NaN marks a field as not
//! present; it is never a business value.

/// A scalar reading or a statistical distribution
#[derive(Debug, Clone, Copy)]
pub struct Measurement {
    /// 0 when absent, 1 for a scalar, number of contributors for a distribution
    pub count: u32,
    pub value: f64,
    pub low: f64,
    pub high: f64,
    pub median: f64,
    pub average: f64,
    pub standard_deviation: f64,
}

impl Measurement {
    /// No measurement: zero count, every field NaN
    pub const ABSENT: Self = Self {
        count: 0,
        value: f64::NAN,
        low: f64::NAN,
        high: f64::NAN,
        median: f64::NAN,
        average: f64::NAN,
        standard_deviation: f64::NAN,
    };

    /// A single scalar reading
    pub const fn single(value: f64) -> Self {
        Self {
            count: 1,
            value,
            ..Self::ABSENT
        }
    }

    /// A distribution summarised from `count` contributors
    pub const fn distribution(
        count: u32,
        low: f64,
        high: f64,
        median: f64,
        average: f64,
        standard_deviation: f64,
    ) -> Self {
        Self {
            count,
            value: f64::NAN,
            low,
            high,
            median,
            average,
            standard_deviation,
        }
    }

    /// Check if nothing was measured
    pub fn is_absent(&self) -> bool {
        *self == Self::ABSENT
    }
}

impl Default for Measurement {
    fn default() -> Self {
        Self::ABSENT
    }
}

/// Field-wise equality where NaN equals NaN
impl PartialEq for Measurement {
    fn eq(&self, other: &Self) -> bool {
        self.count == other.count
            && same_f64(self.value, other.value)
            && same_f64(self.low, other.low)
            && same_f64(self.high, other.high)
            && same_f64(self.median, other.median)
            && same_f64(self.average, other.average)
            && same_f64(self.standard_deviation, other.standard_deviation)
    }
}

/// Compare two floats treating NaN as a value
#[inline]
pub(crate) fn same_f64(a: f64, b: f64) -> bool {
    (a.is_nan() && b.is_nan()) || a == b
}
