use std::{cmp::Ordering, fmt::Display, str::FromStr};

use num_traits::{checked_pow, Zero};

use crate::err::{EelError, EelResult};

/// Payload of `Value::Number`. Integer and float share one variant kind and
/// are told apart by their text: anything that parses as an integer is `Int`.
#[derive(Debug, Clone, Copy)]
pub enum Number {
    Int(i64),
    Float(f64),
}

pub fn is_int(text: &str) -> bool {
    text.trim().parse::<i64>().is_ok()
}

/// Float literal that is not also an integer literal.
pub fn is_float_strict(text: &str) -> bool {
    text.trim().parse::<f64>().is_ok() && !is_int(text)
}

impl FromStr for Number {
    type Err = EelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(n) = trimmed.parse::<i64>() {
            return Ok(Self::Int(n));
        }
        if is_float_strict(trimmed) {
            if let Ok(f) = trimmed.parse::<f64>() {
                return Ok(Self::Float(f));
            }
        }

        Err(EelError::decode("Number", s, "not a numeric literal"))
    }
}

impl Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Number::Int(n) => write!(f, "{n}"),
            // Debug keeps the fraction on whole floats ("3.0"), so the text
            // never reads back as an Int.
            Number::Float(n) => write!(f, "{n:?}"),
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Number::Int(l), Number::Int(r)) => l == r,
            _ => self.as_f64() == other.as_f64(),
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Number::Int(l), Number::Int(r)) => l.partial_cmp(r),
            _ => self.as_f64().partial_cmp(&other.as_f64()),
        }
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

fn overflow(op: &str) -> EelError {
    EelError::InvalidOperation(format!("integer overflow in {op}"))
}

fn zero_division(op: &str) -> EelError {
    EelError::InvalidOperation(format!("division by zero in {op}"))
}

/// Floored `(quotient, remainder)` for a non-zero divisor. The quotient is
/// derived from the remainder so `q * r + m` gives back `l`.
fn float_divmod(l: f64, r: f64) -> (f64, f64) {
    let mut m = l % r;
    let mut div = (l - m) / r;
    if m != 0.0 {
        if (r < 0.0) != (m < 0.0) {
            m += r;
            div -= 1.0;
        }
    } else {
        m = 0.0_f64.copysign(r);
    }

    let q = if div != 0.0 {
        let floored = div.floor();
        if div - floored > 0.5 {
            floored + 1.0
        } else {
            floored
        }
    } else {
        0.0_f64.copysign(l / r)
    };
    (q, m)
}

impl Number {
    pub const fn as_f64(self) -> f64 {
        match self {
            Number::Int(n) => n as f64,
            Number::Float(f) => f,
        }
    }

    pub const fn is_int(self) -> bool {
        matches!(self, Self::Int(_))
    }

    pub fn is_zero(self) -> bool {
        match self {
            Number::Int(n) => n.is_zero(),
            Number::Float(f) => f.is_zero(),
        }
    }

    pub fn add(self, rhs: Self) -> EelResult<Self> {
        match (self, rhs) {
            (Number::Int(l), Number::Int(r)) => l
                .checked_add(r)
                .map(Self::Int)
                .ok_or_else(|| overflow("+")),
            _ => Ok(Self::Float(self.as_f64() + rhs.as_f64())),
        }
    }

    pub fn sub(self, rhs: Self) -> EelResult<Self> {
        match (self, rhs) {
            (Number::Int(l), Number::Int(r)) => l
                .checked_sub(r)
                .map(Self::Int)
                .ok_or_else(|| overflow("-")),
            _ => Ok(Self::Float(self.as_f64() - rhs.as_f64())),
        }
    }

    pub fn mul(self, rhs: Self) -> EelResult<Self> {
        match (self, rhs) {
            (Number::Int(l), Number::Int(r)) => l
                .checked_mul(r)
                .map(Self::Int)
                .ok_or_else(|| overflow("*")),
            _ => Ok(Self::Float(self.as_f64() * rhs.as_f64())),
        }
    }

    /// True division, always a float.
    pub fn div(self, rhs: Self) -> EelResult<Self> {
        if rhs.is_zero() {
            return Err(zero_division("/"));
        }
        Ok(Self::Float(self.as_f64() / rhs.as_f64()))
    }

    /// Floored modulo: a non-zero result has the sign of the divisor.
    pub fn rem(self, rhs: Self) -> EelResult<Self> {
        if rhs.is_zero() {
            return Err(zero_division("%"));
        }
        match (self, rhs) {
            (Number::Int(l), Number::Int(r)) => {
                let m = l.checked_rem(r).ok_or_else(|| overflow("%"))?;
                if m != 0 && (m < 0) != (r < 0) {
                    Ok(Self::Int(m + r))
                } else {
                    Ok(Self::Int(m))
                }
            }
            _ => Ok(Self::Float(float_divmod(self.as_f64(), rhs.as_f64()).1)),
        }
    }

    /// Division rounded toward negative infinity.
    pub fn floor_div(self, rhs: Self) -> EelResult<Self> {
        if rhs.is_zero() {
            return Err(zero_division("//"));
        }
        match (self, rhs) {
            (Number::Int(l), Number::Int(r)) => {
                let q = l.checked_div(r).ok_or_else(|| overflow("//"))?;
                if l % r != 0 && (l < 0) != (r < 0) {
                    Ok(Self::Int(q - 1))
                } else {
                    Ok(Self::Int(q))
                }
            }
            _ => Ok(Self::Float(float_divmod(self.as_f64(), rhs.as_f64()).0)),
        }
    }

    pub fn pow(self, rhs: Self) -> EelResult<Self> {
        match (self, rhs) {
            (Number::Int(base), Number::Int(exp)) if exp >= 0 => {
                let exp = usize::try_from(exp).map_err(|_| overflow("**"))?;
                checked_pow(base, exp).map(Self::Int).ok_or_else(|| overflow("**"))
            }
            (Number::Int(0), Number::Int(_)) => Err(zero_division("**")),
            _ => Ok(Self::Float(self.as_f64().powf(rhs.as_f64()))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_text_wins_over_float() {
        assert!(is_int("42"));
        assert!(!is_float_strict("42"));
        assert!(is_float_strict("4.2"));
        assert!(matches!("42".parse::<Number>(), Ok(Number::Int(42))));
        assert!(matches!("-0.5".parse::<Number>(), Ok(Number::Float(f)) if f == -0.5));
        assert!("4x".parse::<Number>().is_err());
    }

    #[test]
    fn whole_floats_keep_their_fraction() {
        assert_eq!(Number::Float(3.0).to_string(), "3.0");
        assert_eq!(Number::Int(3).to_string(), "3");
        assert!(matches!(Number::Float(1e20).to_string().parse::<Number>(), Ok(Number::Float(_))));
    }

    #[test]
    fn modulo_and_floor_division_floor_toward_negative_infinity() -> anyhow::Result<()> {
        assert_eq!(Number::Int(-7).rem(Number::Int(3))?, Number::Int(2));
        assert_eq!(Number::Int(7).rem(Number::Int(-3))?, Number::Int(-2));
        assert_eq!(Number::Int(-7).floor_div(Number::Int(2))?, Number::Int(-4));
        assert_eq!(Number::Int(7).floor_div(Number::Int(2))?, Number::Int(3));
        assert_eq!(Number::Float(-7.5).floor_div(Number::Float(2.0))?, Number::Float(-4.0));
        assert_eq!(Number::Float(-1.0).rem(Number::Float(3.0))?, Number::Float(2.0));
        Ok(())
    }

    #[test]
    fn division_is_true_division() -> anyhow::Result<()> {
        let q = Number::Int(7).div(Number::Int(2))?;
        assert!(matches!(q, Number::Float(f) if f == 3.5));
        assert!(Number::Int(1).div(Number::Int(0)).is_err());
        assert!(Number::Int(1).floor_div(Number::Float(0.0)).is_err());
        Ok(())
    }

    #[test]
    fn integer_overflow_is_reported() {
        assert!(Number::Int(i64::MAX).add(Number::Int(1)).is_err());
        assert!(Number::Int(2).pow(Number::Int(64)).is_err());
        assert!(Number::Int(i64::MIN).floor_div(Number::Int(-1)).is_err());
    }

    #[test]
    fn negative_exponent_goes_float() -> anyhow::Result<()> {
        assert_eq!(Number::Int(2).pow(Number::Int(10))?, Number::Int(1024));
        assert!(matches!(Number::Int(2).pow(Number::Int(-1))?, Number::Float(f) if f == 0.5));
        Ok(())
    }

    #[test]
    fn float_floor_division_agrees_with_modulo() -> anyhow::Result<()> {
        let (a, b) = (Number::Float(1.0), Number::Float(0.1));
        let q = a.floor_div(b)?;
        let m = a.rem(b)?;
        assert_eq!(q, Number::Float(9.0));
        assert_eq!(m, Number::Float(0.09999999999999995));
        assert!((q.as_f64() * 0.1 + m.as_f64() - 1.0).abs() < 1e-12);

        assert_eq!(Number::Float(7.0).floor_div(Number::Float(-2.0))?, Number::Float(-4.0));
        assert_eq!(Number::Float(7.0).rem(Number::Float(-2.0))?, Number::Float(-1.0));
        Ok(())
    }
}
