//! Numeric value and its arithmetic table.
//!
//! `Number` keeps the int/float distinction the source's host language
//! gets for free, but only surfaces it in `Display`: arithmetic between two
//! ints stays integral, arithmetic touching a float promotes to float, and
//! `/` is always true (float) division regardless of operand types,
//! mirroring `number_.py`'s direct use of Python's own `/` and `//`.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NumberValue {
    Int(i64),
    Float(f64),
}

impl NumberValue {
    pub fn as_f64(self) -> f64 {
        match self {
            NumberValue::Int(n) => n as f64,
            NumberValue::Float(f) => f,
        }
    }

    pub fn is_zero(self) -> bool {
        match self {
            NumberValue::Int(n) => n == 0,
            NumberValue::Float(f) => f == 0.0,
        }
    }

    pub fn is_truthy(self) -> bool {
        !self.is_zero()
    }

    pub fn from_bool(b: bool) -> Self {
        NumberValue::Int(b as i64)
    }

    fn both_int(self, other: NumberValue) -> Option<(i64, i64)> {
        match (self, other) {
            (NumberValue::Int(a), NumberValue::Int(b)) => Some((a, b)),
            _ => None,
        }
    }

    pub fn add(self, other: NumberValue) -> NumberValue {
        match self.both_int(other) {
            Some((a, b)) => NumberValue::Int(a.wrapping_add(b)),
            None => NumberValue::Float(self.as_f64() + other.as_f64()),
        }
    }

    pub fn sub(self, other: NumberValue) -> NumberValue {
        match self.both_int(other) {
            Some((a, b)) => NumberValue::Int(a.wrapping_sub(b)),
            None => NumberValue::Float(self.as_f64() - other.as_f64()),
        }
    }

    pub fn mul(self, other: NumberValue) -> NumberValue {
        match self.both_int(other) {
            Some((a, b)) => NumberValue::Int(a.wrapping_mul(b)),
            None => NumberValue::Float(self.as_f64() * other.as_f64()),
        }
    }

    /// True division: always float, matching the source's bare `/`.
    pub fn div(self, other: NumberValue) -> NumberValue {
        NumberValue::Float(self.as_f64() / other.as_f64())
    }

    /// Floor division: stays integral when both operands are ints,
    /// matching Python's `//` (rounds toward negative infinity, unlike
    /// `i64::div_euclid` which instead forces a non-negative remainder -
    /// the two disagree whenever the divisor is negative).
    pub fn floor_div(self, other: NumberValue) -> NumberValue {
        match self.both_int(other) {
            Some((a, b)) => NumberValue::Int(floor_div_i64(a, b)),
            None => NumberValue::Float((self.as_f64() / other.as_f64()).floor()),
        }
    }

    /// Matches Python's `%`: the remainder's sign always follows the
    /// divisor, not the dividend (again unlike `i64::rem_euclid`).
    pub fn modulo(self, other: NumberValue) -> NumberValue {
        match self.both_int(other) {
            Some((a, b)) => NumberValue::Int(floor_mod_i64(a, b)),
            None => {
                let a = self.as_f64();
                let b = other.as_f64();
                NumberValue::Float(a - b * (a / b).floor())
            }
        }
    }

    /// Exponentiation; a negative integer exponent promotes to float since
    /// `i64` cannot represent a fractional result.
    pub fn pow(self, other: NumberValue) -> NumberValue {
        match self.both_int(other) {
            Some((a, b)) if b >= 0 && b <= u32::MAX as i64 => {
                NumberValue::Int(a.wrapping_pow(b as u32))
            }
            _ => NumberValue::Float(self.as_f64().powf(other.as_f64())),
        }
    }

    pub fn eq(self, other: NumberValue) -> bool {
        self.as_f64() == other.as_f64()
    }

    pub fn lt(self, other: NumberValue) -> bool {
        self.as_f64() < other.as_f64()
    }

    pub fn gt(self, other: NumberValue) -> bool {
        self.as_f64() > other.as_f64()
    }

    pub fn lte(self, other: NumberValue) -> bool {
        self.as_f64() <= other.as_f64()
    }

    pub fn gte(self, other: NumberValue) -> bool {
        self.as_f64() >= other.as_f64()
    }
}

fn floor_div_i64(a: i64, b: i64) -> i64 {
    let q = a.wrapping_div(b);
    let r = a.wrapping_rem(b);
    if r != 0 && (r < 0) != (b < 0) {
        q - 1
    } else {
        q
    }
}

fn floor_mod_i64(a: i64, b: i64) -> i64 {
    let r = a.wrapping_rem(b);
    if r != 0 && (r < 0) != (b < 0) {
        r + b
    } else {
        r
    }
}

impl fmt::Display for NumberValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumberValue::Int(n) => write!(f, "{n}"),
            NumberValue::Float(x) => write!(f, "{x}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_arithmetic_stays_integral() {
        assert_eq!(NumberValue::Int(3).add(NumberValue::Int(4)), NumberValue::Int(7));
        assert_eq!(NumberValue::Int(7).floor_div(NumberValue::Int(2)), NumberValue::Int(3));
    }

    #[test]
    fn float_promotion_on_mixed_operands() {
        assert_eq!(
            NumberValue::Int(1).add(NumberValue::Float(0.5)),
            NumberValue::Float(1.5)
        );
    }

    #[test]
    fn division_is_always_float() {
        assert_eq!(NumberValue::Int(4).div(NumberValue::Int(2)), NumberValue::Float(2.0));
    }

    #[test]
    fn negative_pow_promotes_to_float() {
        assert_eq!(NumberValue::Int(2).pow(NumberValue::Int(-1)), NumberValue::Float(0.5));
    }

    #[test]
    fn floor_division_rounds_toward_negative_infinity_like_python() {
        assert_eq!(NumberValue::Int(7).floor_div(NumberValue::Int(-2)), NumberValue::Int(-4));
        assert_eq!(NumberValue::Int(-7).floor_div(NumberValue::Int(2)), NumberValue::Int(-4));
        assert_eq!(NumberValue::Int(-7).floor_div(NumberValue::Int(-2)), NumberValue::Int(3));
    }

    #[test]
    fn modulo_sign_follows_the_divisor_like_python() {
        assert_eq!(NumberValue::Int(7).modulo(NumberValue::Int(-2)), NumberValue::Int(-1));
        assert_eq!(NumberValue::Int(-7).modulo(NumberValue::Int(2)), NumberValue::Int(1));
        assert_eq!(NumberValue::Int(-7).modulo(NumberValue::Int(-2)), NumberValue::Int(-1));
    }
}
