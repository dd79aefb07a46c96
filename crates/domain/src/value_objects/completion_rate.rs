use std::fmt;

use serde::{Deserialize, Serialize};

/// Fraction of a mission's goal that has been covered, always in `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompletionRate(f64);

impl CompletionRate {
    pub const ZERO: Self = Self(0.0);
    pub const FULL: Self = Self(1.0);

    /// Clamp into `[0.0, 1.0]`. NaN maps to zero.
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self::ZERO;
        }
        Self(value.clamp(0.0, 1.0))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Whole percent for status readouts, rounded down so 99.95% never shows as 100%.
    pub fn percent(self) -> u8 {
        (self.0 * 100.0).floor() as u8
    }
}

impl fmt::Display for CompletionRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}%", self.0 * 100.0)
    }
}
