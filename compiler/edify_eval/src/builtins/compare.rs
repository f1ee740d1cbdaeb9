use edify_ir::Expr;

use crate::errors::{int_parse_failure, wrong_arg_count, EvalResult};
use crate::eval::read_args;
use crate::state::State;
use crate::value::Value;

/// `less_than_int(a, b)` is `"t"` iff `a < b`.
pub fn less_than_int(name: &str, state: &mut State, argv: &[Expr]) -> EvalResult {
    compare_ints(name, state, argv, |l, r| l < r)
}

/// `greater_than_int(a, b)` is `"t"` iff `a > b`.
pub fn greater_than_int(name: &str, state: &mut State, argv: &[Expr]) -> EvalResult {
    compare_ints(name, state, argv, |l, r| l > r)
}

fn compare_ints(
    name: &str,
    state: &mut State,
    argv: &[Expr],
    op: fn(i64, i64) -> bool,
) -> EvalResult {
    if argv.len() != 2 {
        return Err(wrong_arg_count(name, "2", argv.len()));
    }

    let args = read_args(state, argv)?;
    let left = parse_int(&args[0]).ok_or_else(|| int_parse_failure(&args[0]))?;
    let right = parse_int(&args[1]).ok_or_else(|| int_parse_failure(&args[1]))?;
    Ok(Value::bool(op(left, right)))
}

/// Parse a signed 64-bit integer.
///
/// Leading whitespace is skipped. Text starting with `0x`/`0X` is unsigned
/// hex; anything else is decimal with an optional `+`/`-` sign, so a sign
/// before a hex prefix is rejected. Trailing characters and values outside
/// the `i64` range are rejected.
pub fn parse_int(text: &str) -> Option<i64> {
    let text = text.trim_start_matches(is_c_space);

    if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        return i64::try_from(parse_magnitude(hex, 16)?).ok();
    }

    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let magnitude = i128::from(parse_magnitude(digits, 10)?);
    i64::try_from(if negative { -magnitude } else { magnitude }).ok()
}

fn parse_magnitude(digits: &str, radix: u32) -> Option<u64> {
    // from_str_radix tolerates its own sign; digits only here.
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    u64::from_str_radix(digits, radix).ok()
}

/// C `isspace` in the default locale, which includes vertical tab.
fn is_c_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
}
