use crate::interpreter::error::ParseError;
use crate::interpreter::function::FunctionKind;
use crate::interpreter::operator::{Associativity, BinaryOperator};
use crate::interpreter::syntax::expression_tree::Node;
use crate::interpreter::token::Token;

/// Something waiting on the operator stack for its operands to be complete.
#[derive(Debug, Copy, Clone, PartialEq)]
enum Pending {
    Operator(BinaryOperator),
    Negation,
    Group,
    Call(FunctionKind),
}

/// Converts infix tokens to an expression tree with an operator stack and an operand stack,
/// so that the nesting depth of the input only costs heap memory.
pub(super) struct InfixConverter {
    tokens: Vec<Token>,
    position: usize,
    operators: Vec<Pending>,
    operands: Vec<Node>,
    open_groups: usize,
}

impl InfixConverter {
    pub(super) fn new(tokens: Vec<Token>) -> Self {
        InfixConverter {
            tokens,
            position: 0,
            operators: vec![],
            operands: vec![],
            open_groups: 0,
        }
    }

    /// Converts the whole token sequence as a single expression.
    pub(super) fn convert(mut self) -> Result<Node, ParseError> {
        if self.tokens.is_empty() {
            return Err(ParseError::EmptyExpression);
        }

        let mut expects_operand = true;
        while let Some(token) = self.advance() {
            expects_operand = if expects_operand {
                self.parse_operand_token(token)?
            } else {
                self.parse_operator_token(token)?
            };
        }
        if expects_operand {
            return Err(ParseError::MissingOperand);
        }

        self.transfer_leftover_operators()?;
        self.pop_operand()
    }

    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.position).copied()
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.peek();
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    /// The token before the one that was just consumed.
    fn before_current(&self) -> Option<Token> {
        self.position
            .checked_sub(2)
            .and_then(|index| self.tokens.get(index))
            .copied()
    }

    /// Handles a token where an operand should start.
    /// Returns whether an operand is still expected afterwards.
    fn parse_operand_token(&mut self, token: Token) -> Result<bool, ParseError> {
        match token {
            Token::Number(value) => {
                self.complete_operand(Node::new_literal(value));
                Ok(false)
            }
            Token::UnaryMinus => {
                self.operators.push(Pending::Negation);
                Ok(true)
            }
            Token::LeftParenthesis => {
                self.open_group(Pending::Group);
                Ok(true)
            }
            Token::Function(function) => match self.advance() {
                Some(Token::LeftParenthesis) => {
                    self.open_group(Pending::Call(function));
                    Ok(true)
                }
                Some(token) => Err(ParseError::UnexpectedToken(token)),
                None => Err(ParseError::MissingOperand),
            },
            Token::Operator(_) => match self.before_current() {
                Some(previous) if previous.is_binary_operator() => {
                    Err(ParseError::UnexpectedToken(token))
                }
                _ => Err(ParseError::MissingOperand),
            },
            Token::RightParenthesis => Err(ParseError::MissingOperand),
        }
    }

    /// Handles a token following a complete operand.
    /// Returns whether an operand is expected afterwards.
    fn parse_operator_token(&mut self, token: Token) -> Result<bool, ParseError> {
        match token {
            Token::Operator(operator) => {
                self.transfer_operators_binding_tighter_than(operator)?;
                self.operators.push(Pending::Operator(operator));
                Ok(true)
            }
            Token::RightParenthesis => {
                self.close_group()?;
                Ok(false)
            }
            _ if self.open_groups > 0 => Err(ParseError::UnexpectedToken(token)),
            _ => Err(ParseError::TrailingInput(token)),
        }
    }

    fn open_group(&mut self, group: Pending) {
        self.open_groups += 1;
        self.operators.push(group);
    }

    fn close_group(&mut self) -> Result<(), ParseError> {
        if self.open_groups == 0 {
            return Err(ParseError::UnbalancedParens);
        }
        loop {
            match self.operators.pop() {
                Some(Pending::Operator(operator)) => self.build_binary_operation(operator)?,
                Some(Pending::Group) => break,
                Some(Pending::Call(function)) => {
                    let argument = self.pop_operand()?;
                    self.operands.push(Node::new_function_call(function, argument));
                    break;
                }
                // Negations are folded into their operand as soon as it is complete.
                Some(Pending::Negation) | None => return Err(ParseError::MissingOperand),
            }
        }
        self.open_groups -= 1;

        let group = self.pop_operand()?;
        self.complete_operand(group);
        Ok(())
    }

    /// Pushes a finished operand, applying the negations directly in front of it.
    fn complete_operand(&mut self, mut operand: Node) {
        while self.operators.last() == Some(&Pending::Negation) {
            self.operators.pop();
            operand = Node::new_negation(operand);
        }
        self.operands.push(operand);
    }

    fn transfer_operators_binding_tighter_than(
        &mut self,
        operator: BinaryOperator,
    ) -> Result<(), ParseError> {
        while let Some(&Pending::Operator(other_operator)) = self.operators.last() {
            let binds_tighter = other_operator.precedence_gt(&operator)
                || (other_operator.precedence_eq(&operator)
                    && operator.associativity() == Associativity::Left);
            if !binds_tighter {
                break;
            }
            self.operators.pop();
            self.build_binary_operation(other_operator)?;
        }
        Ok(())
    }

    fn transfer_leftover_operators(&mut self) -> Result<(), ParseError> {
        while let Some(pending) = self.operators.pop() {
            match pending {
                Pending::Operator(operator) => self.build_binary_operation(operator)?,
                Pending::Group | Pending::Call(_) => return Err(ParseError::UnbalancedParens),
                Pending::Negation => return Err(ParseError::MissingOperand),
            }
        }
        Ok(())
    }

    fn build_binary_operation(&mut self, operator: BinaryOperator) -> Result<(), ParseError> {
        let right_operand = self.pop_operand()?;
        let left_operand = self.pop_operand()?;
        self.operands.push(Node::new_binary_operation(
            operator,
            left_operand,
            right_operand,
        ));
        Ok(())
    }

    fn pop_operand(&mut self) -> Result<Node, ParseError> {
        self.operands.pop().ok_or(ParseError::MissingOperand)
    }
}
