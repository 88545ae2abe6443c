use crate::interpreter::error::EvalError;
use crate::interpreter::token::Token;
use std::fmt;
use std::fmt::Formatter;

/// A binary mathematical operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Exponentiate,
}

/// An unary mathematical operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    Negate,
}

impl UnaryOperator {
    pub fn token(&self) -> Token {
        match self {
            UnaryOperator::Negate => Token::UnaryMinus,
        }
    }

    pub fn evaluate(&self, x: f64) -> f64 {
        match self {
            UnaryOperator::Negate => -x,
        }
    }
}

impl BinaryOperator {
    pub fn token(&self) -> Token {
        Token::Operator(*self)
    }

    /// The canonical character of the operator, as the lexer accepts it.
    pub fn symbol(&self) -> char {
        match self {
            BinaryOperator::Add => '+',
            BinaryOperator::Subtract => '-',
            BinaryOperator::Multiply => '*',
            BinaryOperator::Divide => '/',
            BinaryOperator::Exponentiate => '^',
        }
    }

    pub(crate) fn associativity(&self) -> Associativity {
        match self {
            BinaryOperator::Add
            | BinaryOperator::Subtract
            | BinaryOperator::Multiply
            | BinaryOperator::Divide => Associativity::Left,
            BinaryOperator::Exponentiate => Associativity::Right,
        }
    }

    pub(crate) fn precedence(&self) -> u8 {
        match self {
            BinaryOperator::Add | BinaryOperator::Subtract => 0,
            BinaryOperator::Multiply | BinaryOperator::Divide => 1,
            BinaryOperator::Exponentiate => 2,
        }
    }

    pub(crate) fn precedence_eq(&self, other: &Self) -> bool {
        self.precedence().eq(&other.precedence())
    }

    pub(crate) fn precedence_gt(&self, other: &Self) -> bool {
        self.precedence().gt(&other.precedence())
    }

    /// Applies the operator to two operands.
    ///
    /// Division by exactly zero, and zero raised to a negative power, are reported
    /// as [`EvalError::DivideByZero`] instead of producing an infinity.
    /// A negative base with a non-integral exponent has no real result, and neither
    /// has any combination of infinities that would come out as NaN, like `inf - inf`.
    pub fn evaluate(&self, a: f64, b: f64) -> Result<f64, EvalError> {
        let result = match self {
            BinaryOperator::Add => a + b,
            BinaryOperator::Subtract => a - b,
            BinaryOperator::Multiply => a * b,
            BinaryOperator::Divide => {
                if b == 0.0 {
                    return Err(EvalError::DivideByZero);
                }
                a / b
            }
            BinaryOperator::Exponentiate => {
                if a == 0.0 && b < 0.0 {
                    return Err(EvalError::DivideByZero);
                }
                if a < 0.0 && b.fract() != 0.0 {
                    return Err(self.domain_error(a));
                }
                f64::powf(a, b)
            }
        };

        if result.is_nan() {
            return Err(self.domain_error(a));
        }
        Ok(result)
    }

    fn domain_error(&self, argument: f64) -> EvalError {
        let operation = match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Exponentiate => "^",
        };
        EvalError::DomainError {
            operation,
            argument,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Associativity {
    Left,
    Right,
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parameterized_macro::parameterized;

    #[test]
    fn operator_equality_correspond_with_precedence() {
        let equal1 = BinaryOperator::Multiply;
        let equal2 = BinaryOperator::Divide;
        assert!(equal1.precedence_eq(&equal2))
    }

    #[test]
    fn operator_gt_correspond_with_precedence() {
        let greater = BinaryOperator::Multiply;
        let lesser = BinaryOperator::Add;
        assert!(greater.precedence_gt(&lesser))
    }

    #[test]
    fn exponentiation_is_the_only_right_associative_operator() {
        let right_associative: Vec<BinaryOperator> = [
            BinaryOperator::Add,
            BinaryOperator::Subtract,
            BinaryOperator::Multiply,
            BinaryOperator::Divide,
            BinaryOperator::Exponentiate,
        ]
        .into_iter()
        .filter(|operator| operator.associativity() == Associativity::Right)
        .collect();

        assert_eq!(right_associative, vec![BinaryOperator::Exponentiate]);
    }

    #[parameterized(
    operator = {
    BinaryOperator::Add,
    BinaryOperator::Subtract,
    BinaryOperator::Multiply,
    BinaryOperator::Divide,
    BinaryOperator::Exponentiate,
    BinaryOperator::Exponentiate,
    },
    a = { 2.5, 2.0, 4.0, 1.0, 2.0, -8.0 },
    b = { 0.5, 5.0, 0.25, 4.0, 10.0, 3.0 },
    expected = { 3.0, -3.0, 1.0, 0.25, 1024.0, -512.0 }
    )]
    fn binary_operator_evaluates_correctly(
        operator: BinaryOperator,
        a: f64,
        b: f64,
        expected: f64,
    ) {
        assert_eq!(operator.evaluate(a, b), Ok(expected));
    }

    #[test]
    fn division_by_zero_is_an_error() {
        assert_eq!(
            BinaryOperator::Divide.evaluate(5.0, 0.0),
            Err(EvalError::DivideByZero)
        );
    }

    #[test]
    fn division_by_negative_zero_is_an_error() {
        assert_eq!(
            BinaryOperator::Divide.evaluate(5.0, -0.0),
            Err(EvalError::DivideByZero)
        );
    }

    #[test]
    fn zero_to_a_negative_power_is_division_by_zero() {
        assert_eq!(
            BinaryOperator::Exponentiate.evaluate(0.0, -1.0),
            Err(EvalError::DivideByZero)
        );
    }

    #[test]
    fn negative_base_with_fractional_exponent_is_domain_error() {
        let result = BinaryOperator::Exponentiate.evaluate(-8.0, 1.0 / 3.0);

        assert!(matches!(result, Err(EvalError::DomainError { .. })));
    }

    #[parameterized(
    operator = {
    BinaryOperator::Subtract,
    BinaryOperator::Add,
    BinaryOperator::Divide,
    BinaryOperator::Multiply,
    },
    a = { f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY, 0.0 },
    b = { f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY }
    )]
    fn undefined_combination_of_infinities_is_domain_error(
        operator: BinaryOperator,
        a: f64,
        b: f64,
    ) {
        let result = operator.evaluate(a, b);

        assert!(
            matches!(result, Err(EvalError::DomainError { .. })),
            "{} {} {} returned {:?}",
            a,
            operator,
            b,
            result
        );
    }

    #[test]
    fn overflow_to_infinity_is_not_an_error() {
        assert_eq!(
            BinaryOperator::Multiply.evaluate(1e300, 1e300),
            Ok(f64::INFINITY)
        );
    }

    #[test]
    fn negate_flips_sign() {
        assert_eq!(UnaryOperator::Negate.evaluate(3.5), -3.5);
        assert_eq!(UnaryOperator::Negate.evaluate(-3.5), 3.5);
    }
}
