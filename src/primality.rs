//!
//! # Primality Core
//!
//! This module implements the numeric-input validation and primality
//! determination routine. Input arrives untyped at the boundary (the HTTP
//! layer deserializes an arbitrary JSON value), so the boundary is modeled as
//! the tagged union [`NumberValue`]. Validation rejects booleans, non-numeric
//! values, NaN/infinite floats, and floats that are not within
//! [`INTEGER_TOLERANCE`] of an integer. Whatever survives validation is
//! normalized to an `i64` and tested for primality by trial division with the
//! 6k±1 skip.
//!
//! The routine is a pure function: no state is retained between calls and the
//! same input always produces the same outcome.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum distance from the nearest integer at which a float is still
/// treated as that integer. This absorbs representation noise from upstream
/// arithmetic (e.g. `19.000000000000004`); anything farther is a genuine
/// fractional value and is rejected.
pub const INTEGER_TOLERANCE: f64 = 1e-9;

/// A value as it arrives at the boundary, before any validation.
///
/// The untagged representation mirrors runtime type inspection: serde tries
/// the variants in order, so JSON `true` lands in `Bool` (never `Int`), whole
/// JSON numbers land in `Int`, fractional ones in `Float`, and everything
/// else (strings, null, arrays, objects) falls through to `Other`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumberValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Other(serde_json::Value),
}

/// The single error kind raised by the primality core.
///
/// Every rejection (boolean input, non-numeric input, NaN/infinite input,
/// non-near-integer float) is an `InvalidInput`; callers are expected to
/// treat all of them identically. The reason string exists for diagnostics
/// only and carries no subclassification contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidInput {
    reason: String,
}

impl InvalidInput {
    fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl fmt::Display for InvalidInput {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "invalid input: {}", self.reason)
    }
}

impl std::error::Error for InvalidInput {}

/// Validates `value` and reduces it to a definite integer.
///
/// Validation order:
/// 1. booleans are rejected, even though they coerce to 0/1 elsewhere;
/// 2. anything that is not a real number is rejected;
/// 3. NaN and infinite floats are rejected;
/// 4. a float within [`INTEGER_TOLERANCE`] of an integer becomes that
///    integer; a float farther away is rejected.
pub fn normalize(value: &NumberValue) -> Result<i64, InvalidInput> {
    match value {
        NumberValue::Bool(_) => Err(InvalidInput::new("input must not be a boolean")),
        NumberValue::Int(n) => Ok(*n),
        NumberValue::Float(f) => {
            if f.is_nan() || f.is_infinite() {
                return Err(InvalidInput::new("input must not be NaN or infinite"));
            }
            let rounded = f.round();
            if (f - rounded).abs() >= INTEGER_TOLERANCE {
                return Err(InvalidInput::new("input must be an integer"));
            }
            // i64::MAX as f64 rounds up to 2^63, which is the first value
            // that does not fit, hence the asymmetric comparison.
            if rounded >= i64::MAX as f64 || rounded < i64::MIN as f64 {
                return Err(InvalidInput::new("input is out of the supported range"));
            }
            Ok(rounded as i64)
        }
        NumberValue::Other(_) => Err(InvalidInput::new("input must be a number")),
    }
}

/// Reports whether `value`, once validated and normalized, is prime.
///
/// Fails with [`InvalidInput`] rather than answering when `value` cannot be
/// interpreted as a definite integer.
pub fn is_prime(value: &NumberValue) -> Result<bool, InvalidInput> {
    Ok(trial_division(normalize(value)?))
}

/// 6k±1 trial division. Every prime above 3 has the form 6k±1, so after
/// ruling out multiples of 2 and 3 only two of every six candidates need a
/// division, and candidates stop at sqrt(n).
fn trial_division(n: i64) -> bool {
    if n < 2 {
        // Covers negatives, 0 and 1.
        return false;
    }
    if n < 4 {
        // 2 and 3.
        return true;
    }
    if n % 2 == 0 || n % 3 == 0 {
        return false;
    }
    let mut i: i64 = 5;
    while i.saturating_mul(i) <= n {
        if n % i == 0 || n % (i + 2) == 0 {
            return false;
        }
        i += 6;
    }
    true
}
