mod infix_converter;

use crate::interpreter::error::ParseError;
use crate::interpreter::parser::infix_converter::InfixConverter;
use crate::interpreter::syntax::expression_tree::Node;
use crate::interpreter::token::Token;

/// Parses the given tokens into an equivalent expression tree.
///
/// From loosest to tightest binding: `+ -`, `* /` (both left-associative),
/// `^` (right-associative), prefix `-`, then numbers, parenthesized groups and function calls.
/// Either a complete tree or an error is returned, never a partial tree.
///
/// # Arguments
///
/// * `infix_tokens`: The tokens to parse, in infix format.
///
/// returns: The equivalent expression tree.
///
/// # Examples
///
/// ```
/// use keypad_calculator::interpreter::operator::BinaryOperator;
/// use keypad_calculator::interpreter::parser::parse;
/// use keypad_calculator::interpreter::token::Token;
///
/// let infix_tokens = vec![
///     Token::Number(2.0),
///     Token::Operator(BinaryOperator::Exponentiate),
///     Token::Number(8.0),
/// ];
/// let tree = parse(infix_tokens).unwrap();
/// let regenerated_tokens = tree.to_infix();
/// ```
pub fn parse(infix_tokens: Vec<Token>) -> Result<Node, ParseError> {
    InfixConverter::new(infix_tokens).convert()
}


#[cfg(test)]
mod error_tests {
    use super::*;
    use crate::interpreter::function::FunctionKind;
    use crate::interpreter::lexer::tokenize;
    use crate::interpreter::operator::BinaryOperator;
    use parameterized_macro::parameterized;

    #[parameterized(
    expression = {
    "",
    "(2+3",
    "((1)",
    "2+3)",
    ")",
    "2+",
    "-",
    "*3",
    "()",
    "sin",
    "2+*3",
    "2*/3",
    "sin 30",
    "(2 3)",
    "2 3",
    "(1)(2)",
    "4 sqrt(4)",
    "sqrt(2",
    "(-)",
    },
    expected = {
    ParseError::EmptyExpression,
    ParseError::UnbalancedParens,
    ParseError::UnbalancedParens,
    ParseError::UnbalancedParens,
    ParseError::MissingOperand,
    ParseError::MissingOperand,
    ParseError::MissingOperand,
    ParseError::MissingOperand,
    ParseError::MissingOperand,
    ParseError::MissingOperand,
    ParseError::UnexpectedToken(Token::Operator(BinaryOperator::Multiply)),
    ParseError::UnexpectedToken(Token::Operator(BinaryOperator::Divide)),
    ParseError::UnexpectedToken(Token::Number(30.0)),
    ParseError::UnexpectedToken(Token::Number(3.0)),
    ParseError::TrailingInput(Token::Number(3.0)),
    ParseError::TrailingInput(Token::LeftParenthesis),
    ParseError::TrailingInput(Token::Function(FunctionKind::Sqrt)),
    ParseError::UnbalancedParens,
    ParseError::MissingOperand,
    }
    )]
    fn malformed_expression_returns_parse_error(expression: &str, expected: ParseError) {
        assert_eq!(parse(tokenize(expression).unwrap()).unwrap_err(), expected);
    }
}
