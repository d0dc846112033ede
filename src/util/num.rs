/// `2^63` as a float, the first value past the `i64` range.
const I64_LIMIT: f64 = 9_223_372_036_854_775_808.0;

/// Converts an `i64` to `f64`, rounding to the nearest representable value.
///
/// Arithmetic between integers and floats follows this conversion, so very
/// large integers lose their low bits exactly as they would in any mixed
/// computation.
///
/// ## Example
/// ```
/// use lexiscript::util::num::i64_to_f64;
///
/// assert_eq!(i64_to_f64(42), 42.0);
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub const fn i64_to_f64(value: i64) -> f64 {
    value as f64
}

/// Truncates a float toward zero and converts it to `i64`.
///
/// ## Returns
/// - `Some(i64)`: The truncated value.
/// - `None`: If the value is NaN, infinite or outside the `i64` range.
///
/// ## Example
/// ```
/// use lexiscript::util::num::f64_to_i64_checked;
///
/// assert_eq!(f64_to_i64_checked(-3.9), Some(-3));
/// assert_eq!(f64_to_i64_checked(f64::NAN), None);
/// assert_eq!(f64_to_i64_checked(1e300), None);
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn f64_to_i64_checked(value: f64) -> Option<i64> {
    let truncated = value.trunc();
    // i64::MIN is exactly -2^63; i64::MAX rounds up to 2^63 as a float.
    if (-I64_LIMIT..I64_LIMIT).contains(&truncated) {
        Some(truncated as i64)
    } else {
        None
    }
}

/// Converts a possibly negative index into a position within a sequence of
/// length `len`.
///
/// Negative indices count from the end, so `-1` is the last element.
///
/// ## Returns
/// - `Some(usize)`: The position if it lies inside the sequence.
/// - `None`: If the index is out of range after normalisation.
///
/// ## Example
/// ```
/// use lexiscript::util::num::normalize_index;
///
/// assert_eq!(normalize_index(1, 3), Some(1));
/// assert_eq!(normalize_index(-1, 3), Some(2));
/// assert_eq!(normalize_index(3, 3), None);
/// assert_eq!(normalize_index(-4, 3), None);
/// ```
#[must_use]
pub fn normalize_index(index: i64, len: usize) -> Option<usize> {
    let len = i64::try_from(len).ok()?;
    let position = if index < 0 { index.checked_add(len)? } else { index };
    if (0..len).contains(&position) {
        usize::try_from(position).ok()
    } else {
        None
    }
}

/// Resolves optional slice bounds against a sequence of length `len`.
///
/// Omitted bounds default to the start and the end. Negative bounds count
/// from the end. Out-of-range bounds are clamped, so slicing never fails; an
/// empty range is returned as `start == end`.
///
/// ## Example
/// ```
/// use lexiscript::util::num::slice_bounds;
///
/// assert_eq!(slice_bounds(Some(1), Some(3), 4), (1, 3));
/// assert_eq!(slice_bounds(None, Some(-1), 4), (0, 3));
/// assert_eq!(slice_bounds(Some(-100), Some(100), 4), (0, 4));
/// assert_eq!(slice_bounds(Some(3), Some(1), 4), (3, 3));
/// ```
#[must_use]
pub fn slice_bounds(start: Option<i64>, end: Option<i64>, len: usize) -> (usize, usize) {
    let clamp = |bound: i64| -> usize {
        let len_i = i64::try_from(len).unwrap_or(i64::MAX);
        let position = if bound < 0 { bound.saturating_add(len_i) } else { bound };
        usize::try_from(position.clamp(0, len_i)).unwrap_or(0)
    };

    let start = start.map_or(0, clamp);
    let end = end.map_or(len, clamp);

    (start, end.max(start))
}

/// Formats a float the way the language prints it.
///
/// Finite values use the shortest digits that round-trip. Magnitudes from
/// `1e-4` up to (but excluding) `1e16` print in positional notation with at
/// least one fractional digit; everything else uses scientific notation with a
/// signed, two-digit exponent.
///
/// ## Example
/// ```
/// use lexiscript::util::num::format_float;
///
/// assert_eq!(format_float(1.0), "1.0");
/// assert_eq!(format_float(0.1 + 0.2), "0.30000000000000004");
/// assert_eq!(format_float(1e16), "1e+16");
/// assert_eq!(format_float(1.5e-5), "1.5e-05");
/// assert_eq!(format_float(0.0001), "0.0001");
/// assert_eq!(format_float(-0.0), "-0.0");
/// assert_eq!(format_float(f64::INFINITY), "inf");
/// assert_eq!(format_float(f64::NAN), "nan");
/// ```
#[must_use]
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let scientific = format!("{value:e}");
    let (mantissa, exponent) = scientific.split_once('e')
                                         .unwrap_or((scientific.as_str(), "0"));
    let exponent = exponent.parse::<i32>().unwrap_or(0);

    if value == 0.0 || (-4..16).contains(&exponent) {
        let positional = value.to_string();
        if positional.contains('.') {
            positional
        } else {
            format!("{positional}.0")
        }
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{:02}", exponent.unsigned_abs())
    }
}

/// Rounds to the nearest integer, resolving ties toward the even neighbour.
///
/// ## Example
/// ```
/// use lexiscript::util::num::round_half_even_i64;
///
/// // round 25 to the nearest ten
/// assert_eq!(round_half_even_i64(25, 10), Some(20));
/// assert_eq!(round_half_even_i64(35, 10), Some(40));
/// assert_eq!(round_half_even_i64(-26, 10), Some(-30));
/// ```
#[must_use]
pub fn round_half_even_i64(value: i64, step: i64) -> Option<i64> {
    if step <= 0 {
        return None;
    }
    let quotient = value.div_euclid(step);
    let remainder = value.rem_euclid(step);
    let twice = remainder.checked_mul(2)?;

    let rounded = if twice > step || (twice == step && quotient % 2 != 0) {
        quotient.checked_add(1)?
    } else {
        quotient
    };
    rounded.checked_mul(step)
}
