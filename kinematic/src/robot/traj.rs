use crate::{Error, Result};

/// Smooth step `3t² - 2t³`, zero velocity at both ends.
///
/// The input is clamped into `[0, 1]`.
pub fn smooth_step(t: f64) -> f64 {
    let t = t.clamp(0., 1.);
    t * t * (3. - 2. * t)
}

/// Joint trajectory from `start` to `end` with `n` samples, timed by
/// [`smooth_step()`].
///
/// Both ends are included when `n > 1`.
pub fn joint_path(start: &[f64], end: &[f64], n: usize) -> Result<Vec<Vec<f64>>> {
    if start.len() != end.len() {
        return Err(Error::JointCount { expect: start.len(), got: end.len() });
    }
    let step = if n > 1 { (n - 1) as f64 } else { 1. };
    let path = (0..n)
        .map(|i| {
            let s = smooth_step(i as f64 / step);
            start.iter().zip(end).map(|(a, b)| a + (b - a) * s).collect()
        })
        .collect();
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn step() {
        assert_eq!(smooth_step(0.), 0.);
        assert_eq!(smooth_step(1.), 1.);
        assert_eq!(smooth_step(0.5), 0.5);
        assert_eq!(smooth_step(-1.), 0.);
        assert_eq!(smooth_step(2.), 1.);
        // Symmetric around the middle
        assert_abs_diff_eq!(smooth_step(0.2) + smooth_step(0.8), 1., epsilon = 1e-12);
    }

    #[test]
    fn path() {
        let path = joint_path(&[0., 1.], &[1., -1.], 5).unwrap();
        assert_eq!(path.len(), 5);
        assert_eq!(path[0], [0., 1.]);
        assert_eq!(path[2], [0.5, 0.]);
        assert_eq!(path[4], [1., -1.]);
        // Slow at the ends
        assert!(path[1][0] < 0.25);
        assert_eq!(joint_path(&[0.], &[1.], 1).unwrap(), [vec![0.]]);
        assert!(joint_path(&[0.], &[1.], 0).unwrap().is_empty());
        assert_eq!(
            joint_path(&[0.], &[1., 2.], 3),
            Err(Error::JointCount { expect: 1, got: 2 })
        );
    }
}
