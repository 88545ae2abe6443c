//! The display state of one calculator, driven one key at a time.

use crate::interpreter::error::CoreError;
use crate::interpreter::function::FunctionKind;
use crate::interpreter::operator::BinaryOperator;
use crate::interpreter::{apply_function, evaluate_expression, format_result};
use log::debug;
use std::f64::consts::PI;

/// What the display shows in place of the input after a failure.
pub const ERROR_INDICATOR: &str = "Error";

/// A single key press, already normalized from its button label or keystroke.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Key {
    /// A decimal digit, `'0'..='9'`.
    Digit(char),
    Point,
    Operator(BinaryOperator),
    LeftParenthesis,
    RightParenthesis,
    Function(FunctionKind),
    Pi,
    ToggleSign,
    Evaluate,
    Backspace,
    Clear,
}

impl Key {
    /// Maps a keystroke to a key. Keystrokes without a key are ignored by returning `None`.
    pub fn from_char(character: char) -> Option<Key> {
        match character {
            '\r' | '\n' | '=' => Some(Key::Evaluate),
            '\x08' | '\x7f' => Some(Key::Backspace),
            '\x1b' => Some(Key::Clear),
            '*' => Some(Key::Operator(BinaryOperator::Multiply)),
            '/' => Some(Key::Operator(BinaryOperator::Divide)),
            '^' => Some(Key::Operator(BinaryOperator::Exponentiate)),
            '+' => Some(Key::Operator(BinaryOperator::Add)),
            '-' => Some(Key::Operator(BinaryOperator::Subtract)),
            '(' => Some(Key::LeftParenthesis),
            ')' => Some(Key::RightParenthesis),
            '.' => Some(Key::Point),
            'p' => Some(Key::Pi),
            digit if digit.is_ascii_digit() => Some(Key::Digit(digit)),
            _ => None,
        }
    }

    /// Maps the label printed on a keypad button to its key.
    pub fn from_label(label: &str) -> Option<Key> {
        match label {
            "C" => Some(Key::Clear),
            "⌫" => Some(Key::Backspace),
            "π" => Some(Key::Pi),
            "±" => Some(Key::ToggleSign),
            "÷" => Some(Key::Operator(BinaryOperator::Divide)),
            "×" => Some(Key::Operator(BinaryOperator::Multiply)),
            "x^y" => Some(Key::Operator(BinaryOperator::Exponentiate)),
            "sin" => Some(Key::Function(FunctionKind::Sin)),
            "cos" => Some(Key::Function(FunctionKind::Cos)),
            "tan" => Some(Key::Function(FunctionKind::Tan)),
            "√" => Some(Key::Function(FunctionKind::Sqrt)),
            "x²" => Some(Key::Function(FunctionKind::Square)),
            "n!" => Some(Key::Function(FunctionKind::Factorial)),
            "log" => Some(Key::Function(FunctionKind::Log10)),
            "+" | "-" | "(" | ")" | "." | "=" | "0" | "1" | "2" | "3" | "4" | "5" | "6" | "7"
            | "8" | "9" => label.chars().next().and_then(Key::from_char),
            _ => None,
        }
    }

    /// Whether the key adds to the pending input, as opposed to acting on all of it.
    fn is_input(&self) -> bool {
        matches!(
            self,
            Key::Digit(_)
                | Key::Point
                | Key::Operator(_)
                | Key::LeftParenthesis
                | Key::RightParenthesis
                | Key::Pi
                | Key::ToggleSign
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// Keys accumulate into the pending input.
    Editing,
    /// The last evaluation failed. The next input key starts over with an empty input.
    Errored(CoreError),
}

/// The pending input and history of one calculator.
///
/// # Examples
///
/// ```
/// use keypad_calculator::session::{Key, Session};
///
/// let mut session = Session::new();
/// session.press_all("2+3*4=".chars().filter_map(Key::from_char));
///
/// assert_eq!(session.display(), "14");
/// assert_eq!(session.history(), "2+3*4");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    input: String,
    history: String,
    state: SessionState,
}

impl Default for Session {
    fn default() -> Self {
        Session::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Session {
            input: String::new(),
            history: String::new(),
            state: SessionState::Editing,
        }
    }

    /// The main display: the pending input, or the error indicator.
    pub fn display(&self) -> &str {
        match self.state {
            SessionState::Editing => self.input.as_str(),
            SessionState::Errored(_) => ERROR_INDICATOR,
        }
    }

    /// The expression that produced the current result.
    pub fn history(&self) -> &str {
        &self.history
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn press_all(&mut self, keys: impl IntoIterator<Item = Key>) {
        keys.into_iter().for_each(|key| self.press(key));
    }

    pub fn press(&mut self, key: Key) {
        if let SessionState::Errored(_) = self.state {
            if key.is_input() || key == Key::Backspace {
                self.input.clear();
                self.state = SessionState::Editing;
            }
        }

        match key {
            Key::Digit(digit) => self.input.push(digit),
            Key::Point => self.input.push('.'),
            Key::Operator(operator) => self.input.push(operator.symbol()),
            Key::LeftParenthesis => self.input.push('('),
            Key::RightParenthesis => self.input.push(')'),
            Key::Pi => self.input = format_result(PI),
            Key::ToggleSign => self.toggle_sign(),
            Key::Backspace => {
                self.input.pop();
            }
            Key::Clear => *self = Session::new(),
            Key::Evaluate => self.evaluate(),
            Key::Function(function) => self.apply(function),
        }
    }

    fn toggle_sign(&mut self) {
        if self.input.starts_with('-') {
            self.input.remove(0);
        } else {
            self.input.insert(0, '-');
        }
    }

    fn evaluate(&mut self) {
        if let SessionState::Errored(_) = self.state {
            return;
        }
        self.history = self.input.clone();
        let result = self.pending_value();
        self.finish(result);
    }

    /// The whole pending input is evaluated into the argument of the function.
    fn apply(&mut self, function: FunctionKind) {
        if let SessionState::Errored(_) = self.state {
            return;
        }
        let result = self
            .pending_value()
            .and_then(|argument| apply_function(function, argument));
        self.history = format!("{}({})", function, self.input);
        self.finish(result);
    }

    /// A displayed infinity carries on as that value, anything else is evaluated.
    fn pending_value(&self) -> Result<f64, CoreError> {
        match self.input.as_str() {
            "Infinity" => Ok(f64::INFINITY),
            "-Infinity" => Ok(f64::NEG_INFINITY),
            input => evaluate_expression(input),
        }
    }

    fn finish(&mut self, result: Result<f64, CoreError>) {
        match result {
            Ok(value) => self.input = format_result(value),
            Err(error) => {
                debug!("{:?} failed: {}", self.history, error);
                self.state = SessionState::Errored(error);
            }
        }
    }
}
