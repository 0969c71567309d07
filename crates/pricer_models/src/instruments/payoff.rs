//! Vanilla payoff definitions.

use num_traits::Float;

/// Type of vanilla option payoff.
///
/// # Examples
/// ```
/// use pricer_models::instruments::PayoffType;
///
/// assert_eq!(PayoffType::Call.evaluate(110.0_f64, 100.0), 10.0);
/// assert_eq!(PayoffType::Put.evaluate(110.0_f64, 100.0), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PayoffType {
    /// Call option: max(S - K, 0)
    Call,
    /// Put option: max(K - S, 0)
    Put,
}

impl PayoffType {
    /// Both legs, call first.
    pub const ALL: [PayoffType; 2] = [PayoffType::Call, PayoffType::Put];

    /// Evaluates the payoff at terminal price `spot`.
    #[inline]
    pub fn evaluate<T: Float>(&self, spot: T, strike: T) -> T {
        let intrinsic = match self {
            PayoffType::Call => spot - strike,
            PayoffType::Put => strike - spot,
        };
        intrinsic.max(T::zero())
    }

    /// Returns whether this is the call leg.
    #[inline]
    pub fn is_call(&self) -> bool {
        matches!(self, PayoffType::Call)
    }

    /// Returns whether this is the put leg.
    #[inline]
    pub fn is_put(&self) -> bool {
        matches!(self, PayoffType::Put)
    }

    /// Lower-case label used in reports.
    pub fn name(&self) -> &'static str {
        match self {
            PayoffType::Call => "call",
            PayoffType::Put => "put",
        }
    }
}

impl std::fmt::Display for PayoffType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_payoff() {
        assert_eq!(PayoffType::Call.evaluate(110.0_f64, 100.0), 10.0);
        assert_eq!(PayoffType::Call.evaluate(90.0_f64, 100.0), 0.0);
        assert_eq!(PayoffType::Call.evaluate(100.0_f64, 100.0), 0.0);
    }

    #[test]
    fn test_put_payoff() {
        assert_eq!(PayoffType::Put.evaluate(90.0_f64, 100.0), 10.0);
        assert_eq!(PayoffType::Put.evaluate(110.0_f64, 100.0), 0.0);
    }

    #[test]
    fn test_call_minus_put_is_forward_payoff() {
        for s in [50.0_f64, 99.5, 100.0, 150.0] {
            let diff = PayoffType::Call.evaluate(s, 100.0) - PayoffType::Put.evaluate(s, 100.0);
            assert_eq!(diff, s - 100.0);
        }
    }

    #[test]
    fn test_predicates_and_display() {
        assert!(PayoffType::Call.is_call());
        assert!(PayoffType::Put.is_put());
        assert_eq!(PayoffType::Put.to_string(), "put");
    }
}
