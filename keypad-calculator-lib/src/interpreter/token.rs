use crate::interpreter::function::FunctionKind;
use crate::interpreter::operator::BinaryOperator;
use std::fmt;
use std::fmt::Formatter;

/// A discrete part of an expression
#[derive(Copy, Clone, PartialEq)]
pub enum Token {
    Number(f64),
    Operator(BinaryOperator),
    LeftParenthesis,
    RightParenthesis,
    Function(FunctionKind),
    /// A `-` in prefix position, e.g. the first one in `-2 - 3`.
    UnaryMinus,
}

impl Token {
    pub fn is_binary_operator(&self) -> bool {
        matches!(self, Token::Operator(_))
    }

    /// Whether a `-` following this token negates rather than subtracts.
    pub(crate) fn expects_operand(previous: Option<&Token>) -> bool {
        matches!(
            previous,
            None | Some(Token::Operator(_))
                | Some(Token::LeftParenthesis)
                | Some(Token::Function(_))
                | Some(Token::UnaryMinus)
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(value) => write!(f, "{}", value),
            Token::Operator(operator) => write!(f, "{}", operator),
            Token::LeftParenthesis => write!(f, "("),
            Token::RightParenthesis => write!(f, ")"),
            Token::Function(function) => write!(f, "{}", function),
            Token::UnaryMinus => write!(f, "-"),
        }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
