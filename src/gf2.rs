//! Finite field GF(2) arithmetic.
//!
//! This module contains the struct [GF2], a binary field scalar that can be
//! used as the element type of [ndarray] arrays. Addition is XOR and
//! multiplication is AND, which is what the dense row operations of the
//! [`gauss`](crate::gauss) module and the parity products of the
//! [`encoder`](crate::encoder) module need.

use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Sub, SubAssign};
use ndarray::ScalarOperand;
use num_traits::{One, Zero};

/// Finite field GF(2) element.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct GF2(u8);

impl GF2 {
    /// Creates a GF(2) element from a bit value.
    ///
    /// # Panics
    ///
    /// This function panics if `bit` is not 0 or 1.
    pub fn new(bit: u8) -> GF2 {
        assert!(bit <= 1);
        GF2(bit)
    }

    /// Returns the element as a bit value (0 or 1).
    pub fn bit(&self) -> u8 {
        self.0
    }
}

impl Zero for GF2 {
    fn zero() -> GF2 {
        GF2(0)
    }

    fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl One for GF2 {
    fn one() -> GF2 {
        GF2(1)
    }

    fn is_one(&self) -> bool {
        self.0 == 1
    }
}

impl Add for GF2 {
    type Output = GF2;

    #[allow(clippy::suspicious_arithmetic_impl)]
    fn add(self, rhs: GF2) -> GF2 {
        GF2(self.0 ^ rhs.0)
    }
}

impl Sub for GF2 {
    type Output = GF2;

    #[allow(clippy::suspicious_arithmetic_impl)]
    fn sub(self, rhs: GF2) -> GF2 {
        // subtraction is addition in characteristic 2
        self + rhs
    }
}

impl Mul for GF2 {
    type Output = GF2;

    #[allow(clippy::suspicious_arithmetic_impl)]
    fn mul(self, rhs: GF2) -> GF2 {
        GF2(self.0 & rhs.0)
    }
}

impl Div for GF2 {
    type Output = GF2;

    fn div(self, rhs: GF2) -> GF2 {
        // the only unit is 1, so division only has to reject a zero divisor
        if rhs.is_zero() {
            panic!("division by zero");
        }
        self
    }
}

impl AddAssign for GF2 {
    fn add_assign(&mut self, rhs: GF2) {
        *self = *self + rhs;
    }
}

impl SubAssign for GF2 {
    fn sub_assign(&mut self, rhs: GF2) {
        *self = *self - rhs;
    }
}

impl MulAssign for GF2 {
    fn mul_assign(&mut self, rhs: GF2) {
        *self = *self * rhs;
    }
}

impl DivAssign for GF2 {
    fn div_assign(&mut self, rhs: GF2) {
        *self = *self / rhs;
    }
}

impl ScalarOperand for GF2 {}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn add_is_xor() {
        assert_eq!(GF2::new(0) + GF2::new(0), GF2::new(0));
        assert_eq!(GF2::new(0) + GF2::new(1), GF2::new(1));
        assert_eq!(GF2::new(1) + GF2::new(0), GF2::new(1));
        assert_eq!(GF2::new(1) + GF2::new(1), GF2::new(0));
    }

    #[test]
    fn sub_equals_add() {
        for a in 0..=1 {
            for b in 0..=1 {
                assert_eq!(GF2::new(a) - GF2::new(b), GF2::new(a) + GF2::new(b));
            }
        }
    }

    #[test]
    fn mul_is_and() {
        assert_eq!(GF2::new(0) * GF2::new(0), GF2::new(0));
        assert_eq!(GF2::new(0) * GF2::new(1), GF2::new(0));
        assert_eq!(GF2::new(1) * GF2::new(0), GF2::new(0));
        assert_eq!(GF2::new(1) * GF2::new(1), GF2::new(1));
    }

    #[test]
    #[should_panic]
    fn div_by_zero() {
        let _ = GF2::new(1) / GF2::new(0);
    }
}
