use serde::{Deserialize, Serialize};
use std::f64::consts::E;

use crate::error::{NetworkError, Result};

/// Output interval `[min, max]` shared by the activation and by random
/// parameter initialization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActivationRange {
    pub min: f64,
    pub max: f64,
}

impl ActivationRange {
    pub fn new(min: f64, max: f64) -> Result<ActivationRange> {
        // Written negated so NaN bounds are rejected too.
        if !(min < max) || !min.is_finite() || !max.is_finite() {
            return Err(NetworkError::invalid(format!(
                "activation range needs min < max, got [{min}, {max}]"
            )));
        }
        Ok(ActivationRange { min, max })
    }

    pub fn offset(&self) -> f64 {
        self.min
    }

    pub fn width(&self) -> f64 {
        self.max - self.min
    }
}

impl Default for ActivationRange {
    fn default() -> Self {
        ActivationRange { min: 0.0, max: 1.0 }
    }
}

/// Logistic sigmoid remapped affinely onto `[offset, offset + range]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sigmoid {
    pub(crate) offset: f64,
    pub(crate) range: f64,
}

impl Sigmoid {
    pub fn new(range: ActivationRange) -> Result<Sigmoid> {
        let range = ActivationRange::new(range.min, range.max)?;
        Ok(Sigmoid {
            offset: range.offset(),
            range: range.width(),
        })
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn range(&self) -> f64 {
        self.range
    }

    /// `σ(x) * range + offset`
    ///
    /// Mathematically the result lies strictly inside the range, but in `f64`
    /// it rounds to exactly `offset + range` once `x` exceeds roughly 37, and
    /// to exactly `offset` once `x` is below roughly -710.
    pub fn function(&self, x: f64) -> f64 {
        (1.0 / (1.0 + E.powf(-x))) * self.range + self.offset
    }

    /// Derivative with respect to the pre-activation, expressed through the
    /// activation's own output `y`.
    ///
    /// With `s = (y - offset) / range` recovering `σ(x)`, this is
    /// `range * s * (1 - s)`.
    pub fn derivative_from_output(&self, y: f64) -> f64 {
        let s = (y - self.offset) / self.range;
        self.range * s * (1.0 - s)
    }
}
