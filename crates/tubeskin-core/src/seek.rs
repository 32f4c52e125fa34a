//! Progress-bar seek math

use crate::{Error, Result};

/// Fraction of the bar left of a click, clamped to `[0, 1]`.
///
/// `offset_x` is measured from the bar's left edge, `width` is its rendered
/// width. A zero, negative or non-finite width is rejected.
pub fn seek_fraction(offset_x: f64, width: f64) -> Result<f64> {
    if !(width.is_finite() && width > 0.0) || !offset_x.is_finite() {
        return Err(Error::InvalidSeek { offset_x, width });
    }
    Ok((offset_x / width).clamp(0.0, 1.0))
}

/// Absolute seek position for a fraction of the total duration
pub fn seek_target(fraction: f64, duration: f64) -> f64 {
    if !(duration.is_finite() && duration > 0.0) {
        return 0.0;
    }
    fraction.clamp(0.0, 1.0) * duration
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_midpoint() {
        let fraction = seek_fraction(200.0, 400.0).unwrap();
        assert_eq!(fraction, 0.5);
        assert_eq!(seek_target(fraction, 300.0), 150.0);
    }

    #[test]
    fn test_clamped() {
        assert_eq!(seek_fraction(-5.0, 400.0).unwrap(), 0.0);
        assert_eq!(seek_fraction(450.0, 400.0).unwrap(), 1.0);
    }

    #[test]
    fn test_invalid_width() {
        assert!(seek_fraction(10.0, 0.0).is_err());
        assert!(seek_fraction(10.0, f64::NAN).is_err());
        assert!(seek_fraction(f64::INFINITY, 100.0).is_err());
    }

    #[test]
    fn test_unknown_duration() {
        assert_eq!(seek_target(0.5, 0.0), 0.0);
        assert_eq!(seek_target(0.5, f64::NAN), 0.0);
    }
}
