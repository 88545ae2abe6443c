use crate::interpreter::error::EvalError;
use std::fmt;
use std::fmt::Formatter;
use std::str;

/// The largest argument accepted by [`FunctionKind::Factorial`].
/// `171!` no longer fits in an `f64`.
pub const FACTORIAL_CEILING: f64 = 170.0;

/// How close to zero the cosine of an angle has to be for its tangent to be undefined.
const TANGENT_POLE_EPSILON: f64 = 1e-10;

/// A named single-argument function, as found on the calculator keypad.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FunctionKind {
    Sin,
    Cos,
    Tan,
    Sqrt,
    Square,
    Factorial,
    Log10,
}

impl FunctionKind {
    pub const ALL: [FunctionKind; 7] = [
        FunctionKind::Sin,
        FunctionKind::Cos,
        FunctionKind::Tan,
        FunctionKind::Sqrt,
        FunctionKind::Square,
        FunctionKind::Factorial,
        FunctionKind::Log10,
    ];

    /// The keyword used for the function in expression text.
    pub fn name(&self) -> &'static str {
        match self {
            FunctionKind::Sin => "sin",
            FunctionKind::Cos => "cos",
            FunctionKind::Tan => "tan",
            FunctionKind::Sqrt => "sqrt",
            FunctionKind::Square => "square",
            FunctionKind::Factorial => "factorial",
            FunctionKind::Log10 => "log10",
        }
    }

    /// Applies the function to a single argument.
    ///
    /// Trigonometric functions take their argument in degrees.
    ///
    /// # Examples
    ///
    /// ```
    /// use keypad_calculator::interpreter::function::FunctionKind;
    ///
    /// assert_eq!(FunctionKind::Factorial.evaluate(5.0), Ok(120.0));
    /// assert!(FunctionKind::Sqrt.evaluate(-4.0).is_err());
    /// ```
    pub fn evaluate(&self, x: f64) -> Result<f64, EvalError> {
        let result = match self {
            FunctionKind::Sin => x.to_radians().sin(),
            FunctionKind::Cos => x.to_radians().cos(),
            FunctionKind::Tan => {
                let radians = x.to_radians();
                if radians.cos().abs() < TANGENT_POLE_EPSILON {
                    return Err(self.domain_error(x));
                }
                radians.tan()
            }
            FunctionKind::Sqrt => {
                if x < 0.0 {
                    return Err(self.domain_error(x));
                }
                x.sqrt()
            }
            FunctionKind::Square => x * x,
            FunctionKind::Factorial => factorial(x).ok_or_else(|| self.domain_error(x))?,
            FunctionKind::Log10 => {
                if x <= 0.0 {
                    return Err(self.domain_error(x));
                }
                x.log10()
            }
        };

        // Trigonometry of an infinite angle, or any function of NaN.
        if result.is_nan() {
            return Err(self.domain_error(x));
        }
        Ok(result)
    }

    fn domain_error(&self, argument: f64) -> EvalError {
        EvalError::DomainError {
            operation: self.name(),
            argument,
        }
    }
}

/// Only defined for integers in `0..=170`; NaN fails the truncation check.
fn factorial(x: f64) -> Option<f64> {
    if x.trunc() != x || x < 0.0 || x > FACTORIAL_CEILING {
        return None;
    }
    let n = x as u32;
    Some((2..=n).fold(1.0, |product, factor| product * factor as f64))
}

impl fmt::Display for FunctionKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl str::FromStr for FunctionKind {
    type Err = ();

    fn from_str(input: &str) -> Result<FunctionKind, Self::Err> {
        FunctionKind::ALL
            .into_iter()
            .find(|function| function.name() == input)
            .ok_or(())
    }
}
