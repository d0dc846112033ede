use crate::interpreter::{evaluator::core::Context, value::core::Value};

/// `ask()` / `ask(prompt)`: the next line of input without its terminator.
///
/// The prompt's printed form goes to the input source, not to the program's
/// output. At the end of input the result is the empty string.
pub fn ask(context: &mut Context, args: &[Value]) -> Value {
    let prompt = args.first().map(ToString::to_string).unwrap_or_default();

    Value::String(context.input.read_line(&prompt).unwrap_or_default())
}
