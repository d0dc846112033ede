use rand::Rng;

use crate::{
    ast::Position,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

/// `rand()`: a float drawn uniformly from `[0, 1)`.
pub fn rand(context: &mut Context) -> Value {
    Value::Float(context.rng.random::<f64>())
}

/// `randint(lo, hi)`: an integer drawn uniformly from `lo..=hi`.
///
/// # Errors
/// `InvalidArgument` if `lo > hi`.
pub fn randint(context: &mut Context, args: &[Value], position: Position) -> EvalResult<Value> {
    let lo = args[0].as_integer(position)?;
    let hi = args[1].as_integer(position)?;

    if lo > hi {
        return Err(RuntimeError::InvalidArgument { details: format!("Empty range for randint({lo}, {hi})."),
                                                   position });
    }
    Ok(Value::Integer(context.rng.random_range(lo..=hi)))
}
