//! Shared numeric helpers for boundary searches.

/// Bisect to find the zero crossing of `f` between `t_a` and `t_b`.
///
/// Returns `None` when `f` has the same sign at both ends.
pub(crate) fn bisect_zero<F>(
    mut t_a: f64,
    mut t_b: f64,
    max_iter: u32,
    convergence_days: f64,
    f: F,
) -> Option<f64>
where
    F: Fn(f64) -> f64,
{
    let mut f_a = f(t_a);
    let f_b = f(t_b);
    if f_a * f_b > 0.0 {
        return None;
    }

    for _ in 0..max_iter {
        let t_mid = 0.5 * (t_a + t_b);
        let f_mid = f(t_mid);

        if f_a * f_mid <= 0.0 {
            t_b = t_mid;
        } else {
            t_a = t_mid;
            f_a = f_mid;
        }

        if (t_b - t_a).abs() < convergence_days {
            break;
        }
    }

    Some(0.5 * (t_a + t_b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_linear_root() {
        let t = bisect_zero(0.0, 10.0, 60, 1e-10, |t| t - 3.25).unwrap();
        assert!((t - 3.25).abs() < 1e-9);
    }

    #[test]
    fn unbracketed_is_none() {
        assert!(bisect_zero(0.0, 1.0, 60, 1e-10, |t| t + 5.0).is_none());
    }
}
