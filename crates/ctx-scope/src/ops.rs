//! Compound assignment operators
//!
//! Each operator is one read followed by at most one write. The arithmetic
//! follows double-precision semantics with 32-bit integer conversion for the
//! bitwise and shift operators.

use crate::value::Value;

/// Compound assignment operator (`+=`, `<<=`, `??=`, ...)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssignOp {
    /// `+=`, string concatenation when either side is a string
    Add,
    /// `-=`
    Sub,
    /// `*=`
    Mul,
    /// `/=`
    Div,
    /// `%=`, sign follows the dividend
    Rem,
    /// `**=`
    Pow,
    /// `<<=`
    Shl,
    /// `>>=`, sign-propagating
    Shr,
    /// `>>>=`, zero-filling
    UShr,
    /// `&=`
    BitAnd,
    /// `|=`
    BitOr,
    /// `^=`
    BitXor,
    /// `&&=`, assigns only when the current value is truthy
    And,
    /// `||=`, assigns only when the current value is falsy
    Or,
    /// `??=`, assigns only when the current value is undefined or null
    Nullish,
}

impl AssignOp {
    /// Source-level operator token
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+=",
            Self::Sub => "-=",
            Self::Mul => "*=",
            Self::Div => "/=",
            Self::Rem => "%=",
            Self::Pow => "**=",
            Self::Shl => "<<=",
            Self::Shr => ">>=",
            Self::UShr => ">>>=",
            Self::BitAnd => "&=",
            Self::BitOr => "|=",
            Self::BitXor => "^=",
            Self::And => "&&=",
            Self::Or => "||=",
            Self::Nullish => "??=",
        }
    }

    /// Returns true for the short-circuiting operators
    #[inline]
    #[must_use]
    pub fn is_logical(self) -> bool {
        matches!(self, Self::And | Self::Or | Self::Nullish)
    }

    /// Whether a logical operator writes, given the current value
    ///
    /// Always true for arithmetic operators.
    #[must_use]
    pub fn writes(self, current: &Value) -> bool {
        match self {
            Self::And => current.is_truthy(),
            Self::Or => !current.is_truthy(),
            Self::Nullish => current.is_nullish(),
            _ => true,
        }
    }

    /// Combine the current value with the right-hand side
    ///
    /// Logical operators return `rhs` unconditionally; callers check
    /// [`writes`](Self::writes) first.
    #[must_use]
    pub fn apply(self, lhs: &Value, rhs: Value) -> Value {
        let l = lhs.to_number();
        let n = match self {
            Self::And | Self::Or | Self::Nullish => return rhs,
            Self::Add => {
                if matches!(lhs, Value::String(_)) || matches!(rhs, Value::String(_)) {
                    return Value::String(format!("{lhs}{rhs}"));
                }
                l + rhs.to_number()
            }
            Self::Sub => l - rhs.to_number(),
            Self::Mul => l * rhs.to_number(),
            Self::Div => l / rhs.to_number(),
            Self::Rem => l % rhs.to_number(),
            Self::Pow => pow(l, rhs.to_number()),
            Self::Shl => f64::from(to_int32(l).wrapping_shl(shift_count(&rhs))),
            Self::Shr => f64::from(to_int32(l) >> shift_count(&rhs)),
            Self::UShr => f64::from(to_uint32(l) >> shift_count(&rhs)),
            Self::BitAnd => f64::from(to_int32(l) & to_int32(rhs.to_number())),
            Self::BitOr => f64::from(to_int32(l) | to_int32(rhs.to_number())),
            Self::BitXor => f64::from(to_int32(l) ^ to_int32(rhs.to_number())),
        };
        Value::Number(n)
    }
}

fn pow(base: f64, exp: f64) -> f64 {
    if exp.is_nan() || (base.abs() == 1.0 && exp.is_infinite()) {
        return f64::NAN;
    }
    base.powf(exp)
}

fn shift_count(rhs: &Value) -> u32 {
    to_uint32(rhs.to_number()) & 31
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_uint32(n: f64) -> u32 {
    if !n.is_finite() {
        return 0;
    }
    n.trunc().rem_euclid(4_294_967_296.0) as u32
}

#[allow(clippy::cast_possible_wrap)]
fn to_int32(n: f64) -> i32 {
    to_uint32(n) as i32
}
