//! Shared angle helpers.

/// Normalize an angle to [0, 360) degrees.
pub fn normalize_360(deg: f64) -> f64 {
    let r = deg % 360.0;
    if r < 0.0 { r + 360.0 } else { r }
}

/// Normalize an angle to [-180, 180) degrees.
pub fn normalize_pm180(deg: f64) -> f64 {
    let r = normalize_360(deg);
    if r >= 180.0 { r - 360.0 } else { r }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_positive() {
        assert!((normalize_360(45.0) - 45.0).abs() < 1e-15);
    }

    #[test]
    fn normalize_360_wraps() {
        assert!(normalize_360(360.0).abs() < 1e-15);
    }

    #[test]
    fn normalize_negative() {
        assert!((normalize_360(-10.0) - 350.0).abs() < 1e-15);
    }

    #[test]
    fn pm180_folds_upper_half() {
        assert!((normalize_pm180(350.0) + 10.0).abs() < 1e-12);
        assert!((normalize_pm180(-190.0) - 170.0).abs() < 1e-12);
        assert!((normalize_pm180(180.0) + 180.0).abs() < 1e-12);
    }
}
