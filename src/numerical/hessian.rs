//! Second-derivative test for a 2x2 Hessian.
//!
//! D = fxx*fyy - fxy^2. D > 0 with fxx > 0 is a local minimum, D > 0 with
//! fxx < 0 a local maximum, D < 0 a saddle (eigenvalues of opposite sign),
//! and D within a small band around zero leaves the test inconclusive.

use strum_macros::Display;

/// Determinants inside this band count as "zero": the second-derivative
/// test is inconclusive there.
pub const HESSIAN_DET_TOL: f64 = 1e-9;

/// Outcome of the second-derivative test at a candidate point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum Classification {
    #[strum(serialize = "Local minimum")]
    LocalMin,
    #[strum(serialize = "Local maximum")]
    LocalMax,
    #[strum(serialize = "Saddle point")]
    Saddle,
    #[strum(serialize = "Undetermined")]
    Undetermined,
}

/// Classifies a critical point from its second partial derivatives.
/// Non-finite inputs yield `Undetermined`.
pub fn classify(fxx: f64, fyy: f64, fxy: f64) -> Classification {
    if !fxx.is_finite() || !fyy.is_finite() || !fxy.is_finite() {
        return Classification::Undetermined;
    }
    let det = fxx * fyy - fxy * fxy;
    if det > HESSIAN_DET_TOL {
        if fxx > 0.0 {
            Classification::LocalMin
        } else {
            Classification::LocalMax
        }
    } else if det < -HESSIAN_DET_TOL {
        Classification::Saddle
    } else {
        Classification::Undetermined
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_minimum() {
        assert_eq!(classify(2.0, 2.0, 0.0), Classification::LocalMin);
    }

    #[test]
    fn test_local_maximum() {
        assert_eq!(classify(-2.0, -2.0, 0.0), Classification::LocalMax);
    }

    #[test]
    fn test_saddle() {
        assert_eq!(classify(2.0, -2.0, 0.0), Classification::Saddle);
        // det < 0 through the mixed term alone
        assert_eq!(classify(1.0, 1.0, 2.0), Classification::Saddle);
    }

    #[test]
    fn test_inconclusive_on_zero_determinant() {
        assert_eq!(classify(0.0, 0.0, 0.0), Classification::Undetermined);
        assert_eq!(classify(2.0, 0.0, 0.0), Classification::Undetermined);
    }

    #[test]
    fn test_inconclusive_within_tolerance_band() {
        assert_eq!(classify(1.0, 1e-12, 0.0), Classification::Undetermined);
    }

    #[test]
    fn test_non_finite_inputs() {
        assert_eq!(classify(f64::NAN, 1.0, 0.0), Classification::Undetermined);
        assert_eq!(
            classify(1.0, f64::INFINITY, 0.0),
            Classification::Undetermined
        );
    }

    #[test]
    fn test_display_labels() {
        assert_eq!(Classification::LocalMin.to_string(), "Local minimum");
        assert_eq!(Classification::Saddle.to_string(), "Saddle point");
    }
}
