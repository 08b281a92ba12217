//! Exact mana quantities
//!
//! Every amount a cost can mention is a whole number, a whole number plus a
//! half (the un-set half symbols), or infinity. Storing amounts as a count
//! of half-units keeps them exact and hashable, which the cost multiset
//! relies on; floating point only appears at the query boundary
//! ([`Amount::to_f64`]).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;

/// An exact, non-negative mana quantity.
///
/// The variant order matters: deriving `Ord` places every finite amount
/// below `Infinite`, and finite amounts compare by their half-unit count.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Amount {
    /// A finite amount counted in half-units (`Halves(3)` is 1½)
    Halves(u32),
    /// The `{∞}` amount
    Infinite,
}

impl Amount {
    pub const ZERO: Amount = Amount::Halves(0);
    pub const HALF: Amount = Amount::Halves(1);
    pub const ONE: Amount = Amount::Halves(2);
    pub const TWO: Amount = Amount::Halves(4);

    /// Amount of `n` whole mana
    pub fn whole(n: u32) -> Self {
        Amount::Halves(n.saturating_mul(2))
    }

    /// Amount of `n` whole mana plus one half
    pub fn and_a_half(n: u32) -> Self {
        Amount::Halves(n.saturating_mul(2).saturating_add(1))
    }

    pub fn is_zero(self) -> bool {
        self == Amount::ZERO
    }

    pub fn is_finite(self) -> bool {
        matches!(self, Amount::Halves(_))
    }

    pub fn to_f64(self) -> f64 {
        match self {
            Amount::Halves(h) => f64::from(h) / 2.0,
            Amount::Infinite => f64::INFINITY,
        }
    }

    /// Saturating subtraction: never goes below zero, and subtracting
    /// anything finite from infinity leaves infinity.
    pub fn saturating_sub(self, other: Amount) -> Amount {
        match (self, other) {
            (Amount::Halves(a), Amount::Halves(b)) => Amount::Halves(a.saturating_sub(b)),
            (Amount::Infinite, Amount::Halves(_)) => Amount::Infinite,
            (_, Amount::Infinite) => Amount::ZERO,
        }
    }

    pub fn saturating_mul(self, n: u32) -> Amount {
        match self {
            Amount::Halves(h) => Amount::Halves(h.saturating_mul(n)),
            Amount::Infinite => {
                if n == 0 {
                    Amount::ZERO
                } else {
                    Amount::Infinite
                }
            }
        }
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, other: Amount) -> Amount {
        match (self, other) {
            (Amount::Halves(a), Amount::Halves(b)) => Amount::Halves(a.saturating_add(b)),
            _ => Amount::Infinite,
        }
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Amount {
        iter.fold(Amount::ZERO, Add::add)
    }
}

impl Default for Amount {
    fn default() -> Self {
        Amount::ZERO
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Amount::Halves(h) => {
                let whole = h / 2;
                match (whole, h % 2) {
                    (0, 1) => write!(f, "½"),
                    (w, 0) => write!(f, "{}", w),
                    (w, _) => write!(f, "{}½", w),
                }
            }
            Amount::Infinite => write!(f, "∞"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering() {
        assert!(Amount::ZERO < Amount::HALF);
        assert!(Amount::HALF < Amount::ONE);
        assert!(Amount::whole(100) < Amount::Infinite);
        assert_eq!(Amount::whole(2), Amount::TWO);
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(Amount::ONE + Amount::HALF, Amount::Halves(3));
        assert_eq!(Amount::ONE + Amount::Infinite, Amount::Infinite);
        assert_eq!(Amount::TWO.saturating_sub(Amount::ONE), Amount::ONE);
        assert_eq!(Amount::ONE.saturating_sub(Amount::TWO), Amount::ZERO);
        assert_eq!(Amount::Infinite.saturating_sub(Amount::whole(9)), Amount::Infinite);
        assert_eq!(Amount::ONE.saturating_mul(3), Amount::whole(3));
        assert_eq!(Amount::Infinite.saturating_mul(0), Amount::ZERO);
    }

    #[test]
    fn test_sum() {
        let total: Amount = [Amount::ONE, Amount::TWO, Amount::HALF].into_iter().sum();
        assert_eq!(total, Amount::Halves(7));
    }

    #[test]
    fn test_display() {
        assert_eq!(Amount::ZERO.to_string(), "0");
        assert_eq!(Amount::HALF.to_string(), "½");
        assert_eq!(Amount::and_a_half(3).to_string(), "3½");
        assert_eq!(Amount::whole(12).to_string(), "12");
        assert_eq!(Amount::Infinite.to_string(), "∞");
    }

    #[test]
    fn test_to_f64() {
        assert_eq!(Amount::HALF.to_f64(), 0.5);
        assert_eq!(Amount::whole(3).to_f64(), 3.0);
        assert!(Amount::Infinite.to_f64().is_infinite());
    }
}
