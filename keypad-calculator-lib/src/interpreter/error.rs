use crate::interpreter::token::Token;
use thiserror::Error;

/// Failure to split the input text into tokens.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexError {
    #[error("unexpected character '{character}' at position {position}")]
    UnexpectedChar { character: char, position: usize },

    #[error("'{text}' at position {position} is not a valid number")]
    MalformedNumber { text: String, position: usize },
}

/// Failure to build an expression tree out of a token sequence.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("the expression is empty")]
    EmptyExpression,

    #[error("mismatched parenthesis")]
    UnbalancedParens,

    #[error("an operator is missing an operand")]
    MissingOperand,

    #[error("did not expect '{0}'")]
    UnexpectedToken(Token),

    #[error("unexpected '{0}' after the end of the expression")]
    TrailingInput(Token),
}

/// Failure to compute the value of a well-formed expression.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("division by zero")]
    DivideByZero,

    #[error("{operation} is not defined for {argument}")]
    DomainError {
        operation: &'static str,
        argument: f64,
    },
}

/// Any failure of the calculator core.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Eval(#[from] EvalError),
}
