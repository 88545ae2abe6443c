pub mod error;
pub mod evaluator;
pub mod function;
pub mod lexer;
pub mod operator;
pub mod parser;
pub mod syntax;
pub mod token;

use crate::interpreter::error::CoreError;
use crate::interpreter::function::FunctionKind;
use crate::interpreter::token::Token;
use itertools::Itertools;
use log::{debug, trace};
use syntax::expression_tree::Node;

/// Calculates the value of the given arithmetic expression.
///
/// # Arguments
///
/// * `expression`: A text expression in infix format, e.g. `(2 + 3) * 4`.
///
/// returns: The value of the expression.
///
/// # Examples
///
/// ```
/// use keypad_calculator::interpreter::evaluate_expression;
///
/// assert_eq!(evaluate_expression("2+3*4"), Ok(14.0));
/// assert!(evaluate_expression("5/0").is_err());
/// ```
pub fn evaluate_expression(expression: &str) -> Result<f64, CoreError> {
    let expression_tree = convert(expression)?;
    let value = evaluator::evaluate(&expression_tree)?;
    debug!("{} = {}", expression, value);
    Ok(value)
}

/// Applies a named function directly to a number, without parsing anything.
///
/// This is what a function key does: the whole pending input has already been
/// turned into one number, which becomes the sole argument.
///
/// # Examples
///
/// ```
/// use keypad_calculator::interpreter::apply_function;
/// use keypad_calculator::interpreter::function::FunctionKind;
///
/// assert_eq!(apply_function(FunctionKind::Factorial, 5.0), Ok(120.0));
/// ```
pub fn apply_function(kind: FunctionKind, argument: f64) -> Result<f64, CoreError> {
    let value = kind.evaluate(argument)?;
    debug!("{}({}) = {}", kind, argument, value);
    Ok(value)
}

/// Converts the given input string into an equivalent expression tree,
/// without evaluating it.
///
/// # Arguments
///
/// * `expression`: The text-representation of the infix expression.
///
/// returns: The equivalent expression tree.
///
/// # Examples
///
/// ```
/// use keypad_calculator::interpreter::{convert, tokens_to_string};
/// # use keypad_calculator::interpreter::error::CoreError;
///
/// # fn main() -> Result<(), CoreError> {
/// let tree = convert("(1+2)*3")?;
/// assert_eq!(tokens_to_string(&tree.to_infix()), "(1 + 2) * 3");
/// # Ok(()) }
/// ```
pub fn convert(expression: &str) -> Result<Node, CoreError> {
    let tokens = lexer::tokenize(expression)?;
    trace!("tokens of {:?}: {:?}", expression, tokens);
    let expression_tree = parser::parse(tokens)?;
    trace!("tree of {:?}: {:?}", expression, expression_tree);
    Ok(expression_tree)
}

/// Renders a result the way the calculator displays it.
///
/// Integral values have no decimal point and other values use the shortest text that
/// parses back to the same number. Exponent notation is never used, so the text of
/// any finite result is itself a valid expression.
///
/// # Examples
///
/// ```
/// use keypad_calculator::interpreter::format_result;
///
/// assert_eq!(format_result(14.0), "14");
/// assert_eq!(format_result(0.1 + 0.2), "0.30000000000000004");
/// assert_eq!(format_result(f64::INFINITY), "Infinity");
/// ```
pub fn format_result(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value.is_sign_positive() {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        }
    } else if value == 0.0 {
        // Also covers negative zero.
        "0".to_string()
    } else {
        format!("{}", value)
    }
}

/// Pretty-prints the given vector of tokens with added whitespace.
///
/// # Arguments
///
/// * `tokens`: The tokens to print.
///
/// returns: A pretty-printed text-version of the given tokens.
///
/// # Examples
///
/// ```
/// use keypad_calculator::interpreter::tokens_to_string;
/// use keypad_calculator::interpreter::operator::BinaryOperator;
/// use keypad_calculator::interpreter::token::Token;
///
/// let tokens = vec![
///     Token::Number(2.0),
///     Token::Operator(BinaryOperator::Exponentiate),
///     Token::UnaryMinus,
///     Token::Number(1.0),
///     Token::Operator(BinaryOperator::Add),
///     Token::Number(3.0),
/// ];
/// assert_eq!(tokens_to_string(&tokens), "2^-1 + 3");
/// ```
pub fn tokens_to_string(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|token| match token {
            Token::Operator(operator) if operator.precedence() < 2 => format!(" {} ", token),
            _ => token.to_string(),
        })
        .join("")
}
