//! Standard normal cumulative distribution function.
//!
//! `norm_cdf` is generic over `T: Float` so the same code serves `f64` pricing
//! and `f32` test inputs.

use num_traits::Float;

/// Square root of 2.
const SQRT_2: f64 = std::f64::consts::SQRT_2;

/// Chebyshev-fitted coefficients for erfc, lowest order first.
const ERFC_COEFFS: [f64; 10] = [
    -1.265_512_23,
    1.000_023_68,
    0.374_091_96,
    0.096_784_18,
    -0.186_288_06,
    0.278_868_07,
    -1.135_203_98,
    1.488_515_87,
    -0.822_152_23,
    0.170_872_77,
];

/// Converts an `f64` constant into `T`.
///
/// Every `Float` type can represent these constants; NaN marks the
/// impossible case instead of panicking.
#[inline]
fn constant<T: Float>(value: f64) -> T {
    T::from(value).unwrap_or_else(T::nan)
}

/// Horner evaluation of the erfc exponent polynomial P(t).
#[inline]
fn erfc_poly<T: Float>(t: T) -> T {
    ERFC_COEFFS
        .iter()
        .rev()
        .fold(T::zero(), |acc, &c| constant::<T>(c) + t * acc)
}

/// Complementary error function.
///
/// Uses the Chebyshev fit `erfc(z) = t·exp(−z² + P(t) − P(1))`,
/// `t = 1/(1 + z/2)`, with relative error below 1.4e-7 for all `z ≥ 0`.
/// Subtracting `P(1)` pins `erfc(0)` to exactly 1 so that `Φ(0) = 0.5`.
/// Relative (not absolute) accuracy keeps tail probabilities meaningful,
/// so deep out-of-the-money prices stay non-negative.
///
/// # Mathematical Definition
/// erfc(x) = 1 - erf(x) = (2/√π) ∫_x^∞ e^(-t²) dt
#[inline]
fn erfc_approx<T: Float>(x: T) -> T {
    let one = T::one();
    let abs_x = x.abs();

    // t = 1 / (1 + |x| / 2)
    let t = one / (one + constant::<T>(0.5) * abs_x);

    let exponent = -abs_x * abs_x + erfc_poly(t) - erfc_poly(one);
    let erfc_abs = t * exponent.exp();

    // erfc(-x) = 2 - erfc(x) keeps Φ(x) + Φ(-x) = 1
    if x < T::zero() {
        constant::<T>(2.0) - erfc_abs
    } else {
        erfc_abs
    }
}

/// Standard normal cumulative distribution function.
///
/// Computes P(X <= x) where X ~ N(0, 1) using the complementary error function.
///
/// # Mathematical Definition
/// Φ(x) = (1/2) * erfc(-x / sqrt(2))
///
/// # Accuracy
/// Relative error below 1.4e-7 in both tails.
///
/// # Examples
/// ```
/// use pricer_models::analytical::distributions::norm_cdf;
///
/// let cdf_0 = norm_cdf(0.0_f64);
/// assert!((cdf_0 - 0.5).abs() < 1e-7);
///
/// let cdf_neg = norm_cdf(-3.0_f64);
/// assert!(cdf_neg < 0.01);
///
/// let cdf_pos = norm_cdf(3.0_f64);
/// assert!(cdf_pos > 0.99);
/// ```
#[inline]
pub fn norm_cdf<T: Float>(x: T) -> T {
    let arg = -x / constant::<T>(SQRT_2);
    constant::<T>(0.5) * erfc_approx(arg)
}
