use anyhow::{anyhow, Context, Result};
use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use keypad_calculator::interpreter::function::FunctionKind;
use keypad_calculator::interpreter::{
    apply_function, convert, evaluate_expression, format_result, tokens_to_string,
};
use keypad_calculator::session::{Key, Session};
use log::{info, warn};
use std::io;
use std::io::{BufRead, Write};

/// Evaluates arithmetic expressions, either once or as an interactive keypad
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Arguments {
    /// The expression to evaluate. Without one, keys are read from standard input
    expression: Option<String>,

    /// Apply a function (sin, cos, tan, sqrt, square, factorial, log10) to the value of the expression
    #[clap(short, long, requires = "expression")]
    function: Option<String>,

    /// Print the expression tree before the result
    #[clap(short, long, requires = "expression")]
    tree: bool,

    #[clap(flatten)]
    verbose: Verbosity<WarnLevel>,
}

fn main() -> Result<()> {
    let args = Arguments::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    match args.expression {
        Some(ref expression) => {
            let result = calculate(expression, args.function.as_deref(), args.tree)?;
            println!("{}", result);
            Ok(())
        }
        None => {
            info!("reading keys from standard input");
            run_keypad(io::stdin().lock(), io::stdout().lock())
        }
    }
}

fn calculate(expression: &str, function: Option<&str>, print_tree: bool) -> Result<String> {
    if print_tree {
        let tree = convert(expression)
            .with_context(|| format!("could not parse {:?}", expression))?;
        println!("{}", tokens_to_string(&tree.to_infix()));
        print!("{}", tree);
    }

    let value = evaluate_expression(expression)
        .with_context(|| format!("could not evaluate {:?}", expression))?;

    let value = match function {
        Some(name) => {
            let kind = name
                .parse::<FunctionKind>()
                .map_err(|_| anyhow!("there is no function called {:?}", name))?;
            apply_function(kind, value)
                .with_context(|| format!("could not apply {} to {}", kind, expression))?
        }
        None => value,
    };

    Ok(format_result(value))
}

/// Feeds each input line to a keypad session and prints history and display after it.
///
/// A line starting with `:` presses the button with that label. Any other line is typed
/// key by key and then evaluated, like pressing enter.
fn run_keypad(input: impl BufRead, mut output: impl Write) -> Result<()> {
    let mut session = Session::new();

    for line in input.lines() {
        let line = line.context("could not read from standard input")?;

        match line.strip_prefix(':') {
            Some(label) => match Key::from_label(label.trim()) {
                Some(key) => session.press(key),
                None => warn!("there is no button labelled {:?}", label.trim()),
            },
            None => {
                session.press_all(line.chars().filter_map(Key::from_char));
                session.press(Key::Evaluate);
            }
        }

        writeln!(output, "{}", session.history()).context("could not write to standard output")?;
        writeln!(output, "{}", session.display()).context("could not write to standard output")?;
    }

    Ok(())
}
