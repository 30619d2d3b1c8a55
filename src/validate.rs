//! Argument checks run before any network call.

use crate::error::{Error, Result};
use serde::Serialize;
use std::fmt;

const QUANTITY_MESSAGE: &str = "quantity must be a positive integer";

/// Fail with a validation error when `value` is empty.
pub fn require_non_empty(field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::validation(format!("{} is required", field)));
    }
    Ok(())
}

/// A positive whole number of units.
///
/// Built from caller input with `TryFrom`; zero, negative and fractional
/// values are refused with [`Error::Validation`].
///
/// ```
/// use inventory_kit::validate::Quantity;
///
/// assert_eq!(Quantity::try_from(3).unwrap().get(), 3);
/// assert!(Quantity::try_from(0).is_err());
/// assert!(Quantity::try_from(1.5).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Quantity(u32);

impl Quantity {
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn invalid_quantity() -> Error {
    Error::validation(QUANTITY_MESSAGE)
}

macro_rules! quantity_from_int {
    ($($t:ty),*) => {
        $(
            impl TryFrom<$t> for Quantity {
                type Error = Error;

                fn try_from(value: $t) -> Result<Self> {
                    match u32::try_from(value) {
                        Ok(n) if n > 0 => Ok(Quantity(n)),
                        _ => Err(invalid_quantity()),
                    }
                }
            }
        )*
    };
}

quantity_from_int!(i32, i64, u32, u64, usize);

impl TryFrom<f64> for Quantity {
    type Error = Error;

    fn try_from(value: f64) -> Result<Self> {
        if !value.is_finite() || value.fract() != 0.0 || value < 1.0 || value > u32::MAX as f64 {
            return Err(invalid_quantity());
        }
        Ok(Quantity(value as u32))
    }
}
