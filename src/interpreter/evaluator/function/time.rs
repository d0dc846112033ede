use chrono::Utc;

use crate::{interpreter::value::core::Value, util::num::i64_to_f64};

/// `time()`: seconds since the Unix epoch, with microsecond resolution.
#[must_use]
pub fn now() -> Value {
    Value::Float(i64_to_f64(Utc::now().timestamp_micros()) / 1e6)
}
