use super::*;
use pretty_assertions::assert_eq;

#[test]
fn unknown_function_has_kind_and_cause() {
    let err = unknown_function("frobnicate");
    assert_eq!(
        err.kind,
        EvalErrorKind::UnknownFunction {
            name: "frobnicate".to_string()
        }
    );
    assert_eq!(err.message, r#"unknown function "frobnicate""#);
    assert_eq!(err.cause, CauseCode::UnknownFunction);
}

#[test]
fn arity_mismatch_pluralizes() {
    assert_eq!(
        wrong_arg_count("sleep", "1", 2).message,
        "sleep() expects 1 argument, got 2"
    );
    assert_eq!(
        wrong_arg_count("ifelse", "2 or 3", 1).message,
        "ifelse() expects 2 or 3 arguments, got 1"
    );
    assert_eq!(
        wrong_arg_count("assert", "at least 1", 0).cause,
        CauseCode::ArgsParsingFailure
    );
}

#[test]
fn int_parse_names_the_text() {
    let err = int_parse_failure("abc");
    assert_eq!(err.message, "failed to parse int in abc");
    assert_eq!(
        err.kind,
        EvalErrorKind::IntParse {
            text: "abc".to_string()
        }
    );
}

#[test]
fn type_mismatch_message() {
    let err = type_mismatch("string", "blob");
    assert_eq!(err.message, "expecting string, got value type blob");
    assert_eq!(err.cause, CauseCode::ArgsParsingFailure);
}

#[test]
fn assertion_failed_quotes_condition() {
    let err = assertion_failed(r#"is_substring("x", "abc")"#);
    assert_eq!(err.message, r#"assert failed: is_substring("x", "abc")"#);
    assert_eq!(err.cause, CauseCode::AssertionFailure);
}

#[test]
fn recursion_limit_has_cause() {
    let err = recursion_limit_exceeded(64);
    assert_eq!(err.kind, EvalErrorKind::RecursionLimit { depth: 64 });
    assert_eq!(err.message, "maximum nesting depth exceeded (limit: 64)");
    assert_eq!(err.cause, CauseCode::RecursionLimit);
}

#[test]
fn arg_range_errors() {
    assert_eq!(
        arg_range_exceeded(1, 3, 2).message,
        "argument range 1+3 exceeds 2 available arguments"
    );
    assert_eq!(empty_arg_range().kind, EvalErrorKind::EmptyArgRange);
}

#[test]
fn already_aborted_carries_recorded_state() {
    let err = already_aborted("assert failed: x", CauseCode::AssertionFailure);
    assert!(err.is_short_circuit());
    assert_eq!(err.message, "assert failed: x");
    assert_eq!(err.cause, CauseCode::AssertionFailure);
}

#[test]
fn new_is_custom_without_cause() {
    let err = EvalError::new("something broke");
    assert_eq!(
        err.kind,
        EvalErrorKind::Custom {
            message: "something broke".to_string()
        }
    );
    assert_eq!(err.cause, CauseCode::NoCause);
    assert!(!err.is_short_circuit());
}

#[test]
fn or_span_keeps_innermost_location() {
    let err = EvalError::new("x")
        .with_span(Span::new(4, 8))
        .or_span(Span::new(0, 20));
    assert_eq!(err.span, Some(Span::new(4, 8)));

    let err = EvalError::new("x").or_span(Span::new(0, 20));
    assert_eq!(err.span, Some(Span::new(0, 20)));

    let err = EvalError::new("x").or_span(Span::DUMMY);
    assert_eq!(err.span, None);
}

#[test]
fn display_appends_specified_cause() {
    assert_eq!(EvalError::new("plain").to_string(), "plain");
    assert_eq!(
        unknown_function("f").to_string(),
        r#"unknown function "f" [unknown_function (300)]"#
    );
}
