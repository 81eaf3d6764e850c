use crate::{CoreError, CoreResult};

/// Floating point type used for weights, temperatures and rates.
pub type Real = f64;

/// Absolute and relative tolerance pair for comparing summed weights.
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

/// `v <= limit`, forgiving rounding noise from summing fractions.
pub fn within_limit(v: Real, limit: Real, tol: Tolerances) -> bool {
    v <= limit || nearly_equal(v, limit, tol)
}

pub fn ensure_finite(v: Real, what: &'static str) -> CoreResult<Real> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite { what, value: v })
    }
}

/// Finite and strictly greater than zero.
pub fn ensure_positive(v: Real, what: &'static str) -> CoreResult<Real> {
    ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(CoreError::NotPositive { what, value: v })
    }
}

/// Finite and within `[min, max]` (inclusive).
pub fn ensure_in_range(v: Real, min: Real, max: Real, what: &'static str) -> CoreResult<Real> {
    ensure_finite(v, what)?;
    if v < min || v > max {
        return Err(CoreError::OutOfRange {
            what,
            value: v,
            min,
            max,
        });
    }
    Ok(v)
}

/// Percentage helper: finite and within `[0, 100]`.
pub fn ensure_percent(v: Real, what: &'static str) -> CoreResult<Real> {
    ensure_in_range(v, 0.0, 100.0, what)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn in_range_accepts_exactly_the_interval(v in -50.0_f64..150.0_f64) {
            let ok = ensure_percent(v, "v").is_ok();
            prop_assert_eq!(ok, (0.0..=100.0).contains(&v));
        }
    }
}
