//! Sample statistics over return series.
//!
//! Generic over `T: Float` so the same code serves `f64` estimators and
//! `f32` test inputs.

use num_traits::Float;

/// Arithmetic mean. `None` for an empty slice.
///
/// ```
/// use pricer_core::math::statistics::mean;
///
/// assert_eq!(mean(&[1.0_f64, 2.0, 3.0]), Some(2.0));
/// assert_eq!(mean::<f64>(&[]), None);
/// ```
pub fn mean<T: Float>(values: &[T]) -> Option<T> {
    if values.is_empty() {
        return None;
    }
    let n = T::from(values.len())?;
    let sum = values.iter().fold(T::zero(), |acc, &v| acc + v);
    Some(sum / n)
}

/// Unbiased sample variance (n − 1 denominator). `None` for fewer than 2 values.
///
/// A constant series yields exactly zero (the rounded mean is not trusted
/// for that case).
pub fn sample_variance<T: Float>(values: &[T]) -> Option<T> {
    if values.len() < 2 {
        return None;
    }
    if values.iter().all(|&v| v == values[0]) {
        return Some(T::zero());
    }
    let m = mean(values)?;
    let denom = T::from(values.len() - 1)?;
    let sum_sq = values.iter().fold(T::zero(), |acc, &v| {
        let d = v - m;
        acc + d * d
    });
    Some(sum_sq / denom)
}

/// Sample standard deviation, `sqrt(sample_variance)`.
///
/// ```
/// use pricer_core::math::statistics::sample_std_dev;
///
/// let sd = sample_std_dev(&[2.0_f64, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
/// assert!((sd - 2.138089935).abs() < 1e-9);
/// ```
pub fn sample_std_dev<T: Float>(values: &[T]) -> Option<T> {
    sample_variance(values).map(Float::sqrt)
}
