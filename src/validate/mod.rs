//! String validators for form input.

use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidateError {
    #[error("Unknown relational operator: {0}")]
    UnknownOperator(String),
}

/// Relational operator used by [`is_int_cmp`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelOp {
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
}

impl RelOp {
    pub fn apply(self, lhs: i32, rhs: i32) -> bool {
        match self {
            RelOp::Eq => lhs == rhs,
            RelOp::Ne => lhs != rhs,
            RelOp::Lt => lhs < rhs,
            RelOp::Gt => lhs > rhs,
            RelOp::Le => lhs <= rhs,
            RelOp::Ge => lhs >= rhs,
        }
    }
}

impl FromStr for RelOp {
    type Err = ValidateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "==" => Ok(RelOp::Eq),
            "!=" => Ok(RelOp::Ne),
            "<" => Ok(RelOp::Lt),
            ">" => Ok(RelOp::Gt),
            "<=" => Ok(RelOp::Le),
            ">=" => Ok(RelOp::Ge),
            other => Err(ValidateError::UnknownOperator(other.to_string())),
        }
    }
}

/// Parses a 32-bit signed integer with an optional leading sign.
pub fn parse_int(expr: &str) -> Option<i32> {
    expr.parse::<i32>().ok()
}

pub fn is_int(expr: &str) -> bool {
    parse_int(expr).is_some()
}

/// True if `expr` is an integer of the requested sign. `zero` additionally
/// accepts 0.
pub fn is_int_signed(expr: &str, positive: bool, zero: bool) -> bool {
    match parse_int(expr) {
        Some(n) => (if positive { n > 0 } else { n < 0 }) || (zero && n == 0),
        None => false,
    }
}

/// True if `expr` is an integer `m` and `m <op> n` holds.
pub fn is_int_cmp(expr: &str, op: RelOp, n: i32) -> bool {
    parse_int(expr).is_some_and(|m| op.apply(m, n))
}

/// True if `expr` is non-empty and made only of ASCII letters, plus spaces
/// when `spaces` is set.
pub fn is_alphabet(expr: &str, spaces: bool) -> bool {
    is_alphabet_cased(expr, true, true, spaces)
}

/// Letter check with the allowed cases spelled out. Both `lower` and `upper`
/// must be set; any other combination rejects every input.
pub fn is_alphabet_cased(expr: &str, lower: bool, upper: bool, spaces: bool) -> bool {
    if !(lower && upper) {
        return false;
    }
    !expr.is_empty()
        && expr
            .chars()
            .all(|c| c.is_ascii_alphabetic() || (spaces && c == ' '))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_int() {
        assert!(is_int("2024"));
        assert!(is_int("-12"));
        assert!(is_int("+7"));
        assert!(!is_int("Year"));
        assert!(!is_int(""));
        assert!(!is_int("12.5"));
        assert!(!is_int("99999999999"));
    }

    #[test]
    fn test_is_int_signed() {
        assert!(is_int_signed("5", true, false));
        assert!(!is_int_signed("0", true, false));
        assert!(is_int_signed("0", true, true));
        assert!(is_int_signed("-3", false, false));
        assert!(!is_int_signed("3", false, true));
        assert!(is_int_signed("0", false, true));
        assert!(!is_int_signed("abc", true, true));
    }

    #[test]
    fn test_rel_op_parsing() {
        assert_eq!("<=".parse::<RelOp>(), Ok(RelOp::Le));
        assert_eq!("!=".parse::<RelOp>(), Ok(RelOp::Ne));
        assert_eq!(
            "=<".parse::<RelOp>(),
            Err(ValidateError::UnknownOperator("=<".to_string()))
        );
    }

    #[test]
    fn test_is_int_cmp() {
        assert!(is_int_cmp("10", RelOp::Gt, 5));
        assert!(is_int_cmp("5", RelOp::Ge, 5));
        assert!(!is_int_cmp("5", RelOp::Lt, 5));
        assert!(is_int_cmp("5", RelOp::Eq, 5));
        assert!(!is_int_cmp("five", RelOp::Eq, 5));
    }

    #[test]
    fn test_is_alphabet() {
        assert!(is_alphabet("January", false));
        assert!(!is_alphabet("New Year", false));
        assert!(is_alphabet("New Year", true));
        assert!(!is_alphabet("May1", true));
        assert!(!is_alphabet("", true));
    }

    #[test]
    fn test_is_alphabet_cased_requires_both_cases() {
        assert!(is_alphabet_cased("March", true, true, false));
        assert!(!is_alphabet_cased("march", true, false, false));
        assert!(!is_alphabet_cased("MARCH", false, true, false));
        assert!(!is_alphabet_cased("March", false, false, true));
    }
}
