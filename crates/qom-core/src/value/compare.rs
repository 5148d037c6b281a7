use crate::value::{Value, ValueType};
use std::cmp::Ordering;
use thiserror::Error as ThisError;

///
/// TypeMismatchError
///
/// Comparison between two values of different, non-coercible types.
/// Reported to the caller; constraint evaluation absorbs it as Unknown.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, ThisError)]
#[error("cannot compare {left:?} with {right:?}")]
pub struct TypeMismatchError {
    pub left: ValueType,
    pub right: ValueType,
}

/// Strict comparator with the documented coercions.
///
/// Ordering rules:
/// 1. Same variant: variant-specific total order
/// 2. Long ⇄ Double: exact numeric comparison (no lossy casts)
/// 3. String-like family: lexicographic over the text form
///
/// Everything else is a mismatch.
pub(crate) fn try_compare(left: &Value, right: &Value) -> Result<Ordering, TypeMismatchError> {
    match (left, right) {
        (Value::Binary(a), Value::Binary(b)) => Ok(a.cmp(b)),
        (Value::Boolean(a), Value::Boolean(b)) => Ok(a.cmp(b)),
        (Value::Date(a), Value::Date(b)) => Ok(a.cmp(b)),
        (Value::Double(a), Value::Double(b)) => Ok(a.cmp(b)),
        (Value::Long(a), Value::Long(b)) => Ok(a.cmp(b)),
        (Value::Long(a), Value::Double(b)) => Ok(cmp_long_double(*a, b.get())),
        (Value::Double(a), Value::Long(b)) => Ok(cmp_long_double(*b, a.get()).reverse()),
        _ => match (left.as_text(), right.as_text()) {
            (Some(a), Some(b)) => Ok(a.cmp(b)),
            _ => Err(TypeMismatchError {
                left: left.value_type(),
                right: right.value_type(),
            }),
        },
    }
}

/// Exact comparison of an i64 against a finite f64.
///
/// Avoids the lossy `as f64` widening above 2^53 by comparing against the
/// truncated integer part and then the fractional remainder.
#[expect(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
fn cmp_long_double(long: i64, double: f64) -> Ordering {
    // i64::MAX as f64 rounds up to 2^63, so >= means the double is larger
    // than every i64; i64::MIN as f64 is exactly -2^63.
    if double >= i64::MAX as f64 {
        return Ordering::Less;
    }
    if double < i64::MIN as f64 {
        return Ordering::Greater;
    }

    let trunc = double.trunc();
    let trunc_long = trunc as i64;

    match long.cmp(&trunc_long) {
        Ordering::Equal => {
            let frac = double - trunc;
            if frac > 0.0 {
                Ordering::Less
            } else if frac < 0.0 {
                Ordering::Greater
            } else {
                Ordering::Equal
            }
        }
        other => other,
    }
}

/// Total comparator over arbitrary value pairs, used by ordering keys.
///
/// Coercible pairs compare by `try_compare`; everything else falls back to
/// the canonical type rank so the result stays a total weak order.
pub(crate) fn ordering_key_cmp(left: &Value, right: &Value) -> Ordering {
    try_compare(left, right).unwrap_or_else(|mismatch| {
        mismatch
            .left
            .canonical_rank()
            .cmp(&mismatch.right.canonical_rank())
    })
}
