use crate::interpreter::function::FunctionKind;
use crate::interpreter::operator::{Associativity, BinaryOperator, UnaryOperator};
use crate::interpreter::syntax::syntax_visitor::{
    walk_binary_operation, walk_function_call, walk_unary_operation, SyntaxVisitor,
};
use crate::interpreter::token::Token;
use crate::interpreter::tokens_to_string;
use ptree::{write_tree, TreeBuilder};
use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::mem;

#[derive(Clone, PartialEq)]
pub enum Node {
    // Terminal symbols (leaves)
    Literal(f64),
    // Non-terminal symbols (non-leaves)
    BinaryOperation {
        operator: BinaryOperator,
        left_operand: Box<Node>,
        right_operand: Box<Node>,
    },
    UnaryOperation {
        operator: UnaryOperator,
        operand: Box<Node>,
    },
    FunctionCall {
        function: FunctionKind,
        argument: Box<Node>,
    },
}

impl Node {
    pub fn new_literal(value: f64) -> Node {
        Node::Literal(value)
    }

    pub fn new_binary_operation(
        operator: BinaryOperator,
        left_operand: Node,
        right_operand: Node,
    ) -> Node {
        Node::BinaryOperation {
            operator,
            left_operand: Box::new(left_operand),
            right_operand: Box::new(right_operand),
        }
    }

    pub fn new_negation(operand: Node) -> Node {
        Node::UnaryOperation {
            operator: UnaryOperator::Negate,
            operand: Box::new(operand),
        }
    }

    pub fn new_function_call(function: FunctionKind, argument: Node) -> Node {
        Node::FunctionCall {
            function,
            argument: Box::new(argument),
        }
    }

    pub fn as_binary_operator(&self) -> Option<BinaryOperator> {
        match self {
            Node::BinaryOperation { operator, .. } => Some(*operator),
            Node::Literal(_) | Node::UnaryOperation { .. } | Node::FunctionCall { .. } => None,
        }
    }

    /// Calls the correct visitor method for the node variant on the given visitor.
    pub(crate) fn accept(&self, visitor: &mut impl SyntaxVisitor) {
        match self {
            Node::Literal(value) => visitor.visit_literal(*value),
            Node::BinaryOperation {
                operator,
                left_operand,
                right_operand,
            } => visitor.visit_binary_operation(operator, left_operand, right_operand),
            Node::UnaryOperation { operator, operand } => {
                visitor.visit_unary_operation(operator, operand)
            }
            Node::FunctionCall { function, argument } => {
                visitor.visit_function_call(function, argument)
            }
        }
    }

    /// Regenerates the tokens of the expression in infix order, with only the
    /// parentheses needed to keep the structure of the tree.
    pub fn to_infix(&self) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut fragments = vec![Fragment::Expression(self)];

        // Fragments are pushed in reverse, so they pop in reading order.
        while let Some(fragment) = fragments.pop() {
            match fragment {
                Fragment::Token(token) => tokens.push(token),
                Fragment::Expression(Node::Literal(value)) => tokens.push(Token::Number(*value)),
                Fragment::Expression(Node::BinaryOperation {
                    operator,
                    left_operand,
                    right_operand,
                }) => {
                    push_operand(
                        &mut fragments,
                        right_operand,
                        needs_parentheses(*operator, right_operand, Associativity::Right),
                    );
                    fragments.push(Fragment::Token(operator.token()));
                    push_operand(
                        &mut fragments,
                        left_operand,
                        needs_parentheses(*operator, left_operand, Associativity::Left),
                    );
                }
                Fragment::Expression(Node::UnaryOperation { operator, operand }) => {
                    push_operand(
                        &mut fragments,
                        operand,
                        operand.as_binary_operator().is_some(),
                    );
                    fragments.push(Fragment::Token(operator.token()));
                }
                Fragment::Expression(Node::FunctionCall { function, argument }) => {
                    push_operand(&mut fragments, argument, true);
                    fragments.push(Fragment::Token(Token::Function(*function)));
                }
            }
        }

        tokens
    }

    /// Moves the children of this node out, leaving literals in their place.
    fn take_children(&mut self, children: &mut Vec<Node>) {
        let placeholder = || Node::Literal(0.0);
        match self {
            Node::Literal(_) => {}
            Node::BinaryOperation {
                left_operand,
                right_operand,
                ..
            } => {
                children.push(mem::replace(left_operand.as_mut(), placeholder()));
                children.push(mem::replace(right_operand.as_mut(), placeholder()));
            }
            Node::UnaryOperation { operand, .. } => {
                children.push(mem::replace(operand.as_mut(), placeholder()));
            }
            Node::FunctionCall { argument, .. } => {
                children.push(mem::replace(argument.as_mut(), placeholder()));
            }
        }
    }

    fn format_tree(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut visitor = TreeBuilderVisitor {
            builder: TreeBuilder::new("expression".into()),
        };
        self.accept(&mut visitor);

        let mut buffer: Vec<u8> = Vec::new();
        match write_tree(&visitor.builder.build(), &mut buffer) {
            Ok(_) => {}
            Err(_) => return Err(fmt::Error),
        }
        let text = match std::str::from_utf8(&buffer) {
            Ok(text) => text,
            Err(_) => return Err(fmt::Error),
        };
        f.write_str(text)
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.format_tree(f)
    }
}

impl Debug for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", tokens_to_string(&self.to_infix()))
    }
}

impl Drop for Node {
    /// Tears the tree down level by level instead of recursing through every box.
    fn drop(&mut self) {
        let mut detached = vec![];
        self.take_children(&mut detached);
        while let Some(mut node) = detached.pop() {
            node.take_children(&mut detached);
        }
    }
}

struct TreeBuilderVisitor {
    builder: TreeBuilder,
}

impl SyntaxVisitor for TreeBuilderVisitor {
    fn visit_literal(&mut self, value: f64) {
        self.builder.add_empty_child(format!("{}", value));
    }
    fn visit_binary_operation(
        &mut self,
        operator: &BinaryOperator,
        left_operand: &Node,
        right_operand: &Node,
    ) {
        self.builder.begin_child(format!("{}", operator));
        walk_binary_operation(self, left_operand, right_operand);
        self.builder.end_child();
    }
    fn visit_unary_operation(&mut self, operator: &UnaryOperator, operand: &Node) {
        self.builder.begin_child(format!("{}", operator));
        walk_unary_operation(self, operand);
        self.builder.end_child();
    }
    fn visit_function_call(&mut self, function: &FunctionKind, argument: &Node) {
        self.builder.begin_child(format!("{}", function));
        walk_function_call(self, argument);
        self.builder.end_child();
    }
}

/// A child operation needs parentheses when it binds looser than its parent, or
/// when it binds equally tight but sits on the side the parent does not associate towards.
fn needs_parentheses(parent: BinaryOperator, child: &Node, side: Associativity) -> bool {
    match child.as_binary_operator() {
        Some(child_operator) => {
            parent.precedence_gt(&child_operator)
                || (parent.precedence_eq(&child_operator) && parent.associativity() != side)
        }
        None => false,
    }
}

enum Fragment<'a> {
    Token(Token),
    Expression(&'a Node),
}

fn push_operand<'a>(fragments: &mut Vec<Fragment<'a>>, operand: &'a Node, parenthesize: bool) {
    if parenthesize {
        fragments.push(Fragment::Token(Token::RightParenthesis));
    }
    fragments.push(Fragment::Expression(operand));
    if parenthesize {
        fragments.push(Fragment::Token(Token::LeftParenthesis));
    }
}
