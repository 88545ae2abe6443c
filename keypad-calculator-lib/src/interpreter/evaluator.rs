use crate::interpreter::error::EvalError;
use crate::interpreter::syntax::expression_tree::Node;

/// Computes the value of the given expression tree.
///
/// The tree is walked in post-order with an explicit stack: operands are evaluated
/// before the operation that combines them, and the first failing operation aborts
/// the walk. Deep trees cost heap memory, not call stack.
///
/// # Arguments
///
/// * `tree`: A well-formed expression tree.
///
/// returns: The numeric value of the expression.
///
/// # Examples
///
/// ```
/// use keypad_calculator::interpreter::evaluator::evaluate;
/// use keypad_calculator::interpreter::operator::BinaryOperator;
/// use keypad_calculator::interpreter::syntax::expression_tree::Node;
///
/// let tree = Node::new_binary_operation(
///     BinaryOperator::Multiply,
///     Node::new_literal(6.0),
///     Node::new_negation(Node::new_literal(7.0)),
/// );
///
/// assert_eq!(evaluate(&tree), Ok(-42.0));
/// ```
pub fn evaluate(tree: &Node) -> Result<f64, EvalError> {
    let mut steps = vec![Step::Visit(tree)];
    let mut values: Vec<f64> = vec![];

    while let Some(step) = steps.pop() {
        match step {
            Step::Visit(Node::Literal(value)) => values.push(*value),
            Step::Visit(
                node @ Node::BinaryOperation {
                    left_operand,
                    right_operand,
                    ..
                },
            ) => {
                steps.push(Step::Combine(node));
                steps.push(Step::Visit(right_operand));
                steps.push(Step::Visit(left_operand));
            }
            Step::Visit(node @ Node::UnaryOperation { operand, .. }) => {
                steps.push(Step::Combine(node));
                steps.push(Step::Visit(operand));
            }
            Step::Visit(node @ Node::FunctionCall { argument, .. }) => {
                steps.push(Step::Combine(node));
                steps.push(Step::Visit(argument));
            }
            Step::Combine(node) => {
                let value = combine(node, &mut values)?;
                values.push(value);
            }
        }
    }

    Ok(pop_value(&mut values))
}

/// Work left on the evaluation stack. An operation is combined only after
/// all of its operands have been visited.
enum Step<'a> {
    Visit(&'a Node),
    Combine(&'a Node),
}

fn combine(node: &Node, values: &mut Vec<f64>) -> Result<f64, EvalError> {
    match node {
        Node::Literal(value) => Ok(*value),
        Node::BinaryOperation { operator, .. } => {
            let right = pop_value(values);
            let left = pop_value(values);
            operator.evaluate(left, right)
        }
        Node::UnaryOperation { operator, .. } => Ok(operator.evaluate(pop_value(values))),
        Node::FunctionCall { function, .. } => function.evaluate(pop_value(values)),
    }
}

fn pop_value(values: &mut Vec<f64>) -> f64 {
    // Every visited subtree leaves exactly one value behind.
    values.pop().unwrap_or(f64::NAN)
}
