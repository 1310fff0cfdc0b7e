//! Vector Arithmetic
//!
//! The handful of dense f32 operations composition and scoring need.

/// Compute dot product of two vectors
///
/// Accumulates in f64 so products of large or tiny f32 components neither
/// overflow nor flush to zero. Uses unrolled loop for better CPU performance.
#[inline]
pub fn dot_product(a: &[f32], b: &[f32]) -> f64 {
    debug_assert_eq!(a.len(), b.len(), "Vector dimensions must match");

    let len = a.len();
    let mut sum = 0.0f64;

    // Process 4 elements at a time (manual unrolling)
    let chunks = len / 4;
    let remainder = len % 4;

    for i in 0..chunks {
        let idx = i * 4;
        sum += a[idx] as f64 * b[idx] as f64;
        sum += a[idx + 1] as f64 * b[idx + 1] as f64;
        sum += a[idx + 2] as f64 * b[idx + 2] as f64;
        sum += a[idx + 3] as f64 * b[idx + 3] as f64;
    }

    for i in (len - remainder)..len {
        sum += a[i] as f64 * b[i] as f64;
    }

    sum
}

/// Euclidean (L2) norm, accumulated in f64
#[inline]
pub fn euclidean_norm(v: &[f32]) -> f64 {
    v.iter().map(|&x| x as f64 * x as f64).sum::<f64>().sqrt()
}

/// `acc += v`, element-wise
#[inline]
pub fn add_assign(acc: &mut [f32], v: &[f32]) {
    debug_assert_eq!(acc.len(), v.len(), "Vector dimensions must match");
    for (a, x) in acc.iter_mut().zip(v) {
        *a += *x;
    }
}

/// `v *= factor`, element-wise
#[inline]
pub fn scale(v: &mut [f32], factor: f32) {
    for x in v.iter_mut() {
        *x *= factor;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot_product() {
        let a = vec![1.0, 2.0, 3.0];
        let b = vec![4.0, 5.0, 6.0];
        assert!((dot_product(&a, &b) - 32.0).abs() < 1e-6);
    }

    #[test]
    fn test_dot_product_unrolled_with_remainder() {
        let a: Vec<f32> = (1..=7).map(|x| x as f32).collect();
        let b = vec![1.0; 7];
        assert!((dot_product(&a, &b) - 28.0).abs() < 1e-6);
    }

    #[test]
    fn test_euclidean_norm() {
        assert!((euclidean_norm(&[3.0, 4.0, 0.0]) - 5.0).abs() < 1e-6);
        assert_eq!(euclidean_norm(&[0.0, 0.0]), 0.0);
    }

    #[test]
    fn test_norm_and_dot_keep_extreme_magnitudes() {
        // both square to out-of-range values in f32
        assert!((euclidean_norm(&[1e20, 0.0]) / 1e20 - 1.0).abs() < 1e-6);
        assert!(euclidean_norm(&[1e-25, 0.0]) > 0.0);
        assert!(dot_product(&[1e20, 0.0], &[2e20, 0.0]).is_finite());
        assert!(dot_product(&[1e-25], &[2e-25]) > 0.0);
    }

    #[test]
    fn test_add_and_scale() {
        let mut acc = vec![0.0, 0.0];
        add_assign(&mut acc, &[1.0, 2.0]);
        add_assign(&mut acc, &[3.0, 2.0]);
        scale(&mut acc, 0.5);
        assert_eq!(acc, vec![2.0, 2.0]);
    }
}
