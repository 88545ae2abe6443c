use crate::interpreter::error::LexError;
use crate::interpreter::function::FunctionKind;
use crate::interpreter::operator::BinaryOperator;
use crate::interpreter::token::Token;
use itertools::Itertools;
use std::iter::{Enumerate, Peekable};
use std::str::Chars;

type Characters<'a> = Peekable<Enumerate<Chars<'a>>>;

/// Splits the given text into tokens.
///
/// Whitespace is skipped. A `-` is tokenized as [`Token::UnaryMinus`] wherever an operand
/// is expected, and as a subtraction everywhere else. Both `^` and `**` mean exponentiation.
///
/// # Arguments
///
/// * `expression`: The text-representation of the infix expression.
///
/// returns: The tokens of the expression, in the same order as in the text.
///
/// # Examples
///
/// ```
/// use keypad_calculator::interpreter::lexer::tokenize;
/// use keypad_calculator::interpreter::token::Token;
///
/// let tokens = tokenize("-2.5 ** 2").unwrap();
///
/// assert_eq!(tokens[0], Token::UnaryMinus);
/// assert_eq!(tokens[1], Token::Number(2.5));
/// assert_eq!(tokens.len(), 4);
/// ```
pub fn tokenize(expression: &str) -> Result<Vec<Token>, LexError> {
    let mut characters = expression.chars().enumerate().peekable();
    let mut tokens: Vec<Token> = vec![];

    while let Some(&(position, character)) = characters.peek() {
        let token = match character {
            c if c.is_whitespace() => {
                characters.next();
                continue;
            }
            c if c.is_ascii_digit() || c == '.' => lex_number(&mut characters, position)?,
            c if c.is_ascii_alphabetic() => lex_function(&mut characters, position)?,
            '*' => {
                characters.next();
                if characters.next_if(|&(_, next)| next == '*').is_some() {
                    Token::Operator(BinaryOperator::Exponentiate)
                } else {
                    Token::Operator(BinaryOperator::Multiply)
                }
            }
            '-' => {
                characters.next();
                if Token::expects_operand(tokens.last()) {
                    Token::UnaryMinus
                } else {
                    Token::Operator(BinaryOperator::Subtract)
                }
            }
            single => {
                characters.next();
                lex_single(single).ok_or(LexError::UnexpectedChar {
                    character: single,
                    position,
                })?
            }
        };
        tokens.push(token);
    }

    Ok(tokens)
}

fn lex_single(character: char) -> Option<Token> {
    match character {
        '+' => Some(Token::Operator(BinaryOperator::Add)),
        '/' => Some(Token::Operator(BinaryOperator::Divide)),
        '^' => Some(Token::Operator(BinaryOperator::Exponentiate)),
        '(' => Some(Token::LeftParenthesis),
        ')' => Some(Token::RightParenthesis),
        _ => None,
    }
}

fn lex_number(characters: &mut Characters, position: usize) -> Result<Token, LexError> {
    let text: String = characters
        .peeking_take_while(|&(_, c)| c.is_ascii_digit() || c == '.')
        .map(|(_, c)| c)
        .collect();

    let malformed = || LexError::MalformedNumber {
        text: text.clone(),
        position,
    };

    if text.matches('.').count() > 1 {
        return Err(malformed());
    }
    text.parse::<f64>()
        .map(Token::Number)
        .map_err(|_| malformed())
}

fn lex_function(characters: &mut Characters, position: usize) -> Result<Token, LexError> {
    let word: String = characters
        .peeking_take_while(|&(_, c)| c.is_ascii_alphanumeric())
        .map(|(_, c)| c)
        .collect();

    match word.parse::<FunctionKind>() {
        Ok(function) => Ok(Token::Function(function)),
        Err(_) => Err(LexError::UnexpectedChar {
            character: word.chars().next().unwrap_or_default(),
            position,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn simple_expression_returns_tokens() {
        let expected = vec![
            Token::Number(2.0),
            Token::Operator(BinaryOperator::Add),
            Token::Number(3.0),
            Token::Operator(BinaryOperator::Multiply),
            Token::Number(4.0),
        ];

        let actual = tokenize("2+3*4").unwrap();

        assert_eq!(actual, expected);
    }

    #[test]
    fn whitespace_is_ignored() {
        let compact = tokenize("(1.5+2)/3").unwrap();
        let spaced = tokenize("  ( 1.5 +\t2 ) / 3 ").unwrap();

        assert_eq!(spaced, compact);
    }

    #[test]
    fn double_asterisk_is_exponentiation() {
        let expected = vec![
            Token::Number(2.0),
            Token::Operator(BinaryOperator::Exponentiate),
            Token::Number(8.0),
        ];

        assert_eq!(tokenize("2**8").unwrap(), expected);
        assert_eq!(tokenize("2^8").unwrap(), expected);
    }

    #[test]
    fn minus_in_prefix_position_is_unary() {
        let expected = vec![
            Token::UnaryMinus,
            Token::Number(2.0),
            Token::Operator(BinaryOperator::Subtract),
            Token::LeftParenthesis,
            Token::UnaryMinus,
            Token::UnaryMinus,
            Token::Number(3.0),
            Token::RightParenthesis,
            Token::Operator(BinaryOperator::Multiply),
            Token::UnaryMinus,
            Token::Number(1.0),
        ];

        let actual = tokenize("-2-(--3)*-1").unwrap();

        assert_eq!(actual, expected);
    }

    #[test]
    fn minus_after_closing_parenthesis_is_subtraction() {
        let tokens = tokenize("(1)-1").unwrap();

        assert_eq!(tokens[3], Token::Operator(BinaryOperator::Subtract));
    }

    #[test]
    fn function_keywords_are_recognized() {
        let expected = vec![
            Token::Function(FunctionKind::Log10),
            Token::LeftParenthesis,
            Token::UnaryMinus,
            Token::Number(0.5),
            Token::RightParenthesis,
        ];

        let actual = tokenize("log10(-.5)").unwrap();

        assert_eq!(actual, expected);
    }

    #[test]
    fn number_may_end_with_decimal_point() {
        assert_eq!(tokenize("5.").unwrap(), vec![Token::Number(5.0)]);
    }

    #[test]
    fn number_with_two_decimal_points_is_malformed() {
        let error = tokenize("1+1.2.3").unwrap_err();

        assert_eq!(
            error,
            LexError::MalformedNumber {
                text: "1.2.3".to_string(),
                position: 2
            }
        );
    }

    #[test]
    fn lone_decimal_point_is_malformed() {
        let error = tokenize("3*.").unwrap_err();

        assert!(matches!(error, LexError::MalformedNumber { position: 2, .. }));
    }

    #[test]
    fn unknown_character_is_reported_with_position() {
        let error = tokenize("2 % 3").unwrap_err();

        assert_eq!(
            error,
            LexError::UnexpectedChar {
                character: '%',
                position: 2
            }
        );
    }

    #[test]
    fn display_glyphs_are_not_operators() {
        let error = tokenize("2×3").unwrap_err();

        assert_eq!(
            error,
            LexError::UnexpectedChar {
                character: '×',
                position: 1
            }
        );
    }

    #[test]
    fn unknown_word_is_reported_at_its_first_character() {
        let error = tokenize("1+pi").unwrap_err();

        assert_eq!(
            error,
            LexError::UnexpectedChar {
                character: 'p',
                position: 2
            }
        );
    }

    #[test]
    fn empty_input_returns_no_tokens() {
        assert!(tokenize("   ").unwrap().is_empty());
    }
}
