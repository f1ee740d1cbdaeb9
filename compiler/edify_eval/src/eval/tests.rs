#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::errors::EvalErrorKind;
use crate::function_table::FunctionTable;
use crate::print_handler::silent_handler;
use crate::shared::SharedRegistry;
use edify_ir::Span;
use pretty_assertions::assert_eq;

fn count(_name: &str, state: &mut State, _argv: &[Expr]) -> EvalResult {
    if let Some(n) = state.cookie_mut::<usize>() {
        *n += 1;
    }
    Ok(Value::string("x"))
}

fn fail(_name: &str, state: &mut State, _argv: &[Expr]) -> EvalResult {
    Err(crate::error_abort!(state, "boom"))
}

fn quiet(_name: &str, _state: &mut State, _argv: &[Expr]) -> EvalResult {
    Err(EvalError::new(""))
}

fn blob(_name: &str, _state: &mut State, _argv: &[Expr]) -> EvalResult {
    Ok(Value::blob(vec![0, 1, 2]))
}

fn table() -> SharedRegistry<FunctionTable> {
    let mut table = FunctionTable::with_builtins();
    table.register("count", count);
    table.register("fail", fail);
    table.register("quiet", quiet);
    table.register("blob", blob);
    SharedRegistry::new(table)
}

fn state() -> State {
    State::builder("")
        .function_table(table())
        .print_handler(silent_handler())
        .cookie(0usize)
        .build()
}

fn calls(state: &State) -> usize {
    state.cookie::<usize>().copied().unwrap_or_default()
}

fn call(name: &str) -> Expr {
    Expr::call(name, vec![])
}

#[test]
fn literal_evaluates_to_its_text() {
    let mut state = state();
    assert_eq!(
        evaluate_value(&mut state, &Expr::literal("hello")),
        Ok(Value::string("hello"))
    );
    assert_eq!(evaluate(&mut state, &Expr::literal("")), Ok(String::new()));
}

#[test]
fn unknown_function_is_latched() {
    let mut state = state();
    let err = evaluate(&mut state, &call("nope")).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::UnknownFunction {
            name: "nope".to_string()
        }
    );
    assert_eq!(state.errmsg(), r#"unknown function "nope""#);
    assert_eq!(state.cause_code(), CauseCode::UnknownFunction);
}

#[test]
fn aborted_state_runs_nothing() {
    let mut state = state();
    assert!(evaluate(&mut state, &call("fail")).is_err());

    let err = evaluate(&mut state, &call("count")).unwrap_err();
    assert!(err.is_short_circuit());
    assert_eq!(err.message, "boom");
    assert_eq!(calls(&state), 0);
}

#[test]
fn read_args_stops_at_first_failure() {
    let mut state = state();
    let argv = vec![call("count"), call("fail"), call("count")];
    let err = read_args(&mut state, &argv).unwrap_err();
    assert_eq!(err.message, "boom");
    assert_eq!(calls(&state), 1);
    assert_eq!(state.errmsg(), "boom");
}

#[test]
fn read_args_evaluates_in_order() {
    let mut state = state();
    let argv = vec![Expr::literal("a"), call("count"), Expr::literal("c")];
    assert_eq!(
        read_args(&mut state, &argv),
        Ok(vec!["a".to_string(), "x".to_string(), "c".to_string()])
    );
    assert_eq!(read_args(&mut state, &[]), Ok(vec![]));
}

#[test]
fn read_args_range_selects_window() {
    let mut state = state();
    let argv = vec![call("count"), Expr::literal("b"), Expr::literal("c")];
    assert_eq!(
        read_args_range(&mut state, &argv, 1, 2),
        Ok(vec!["b".to_string(), "c".to_string()])
    );
    assert_eq!(read_args_range(&mut state, &argv, 3, 0), Ok(vec![]));
    assert_eq!(calls(&state), 0);
}

#[test]
fn range_past_end_evaluates_nothing() {
    let mut state = state();
    let argv = vec![call("count"), call("count")];
    let err = read_args_range(&mut state, &argv, 1, 2).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::ArgRange {
            start: 1,
            len: 2,
            available: 2
        }
    );
    assert_eq!(err.cause, CauseCode::ArgsParsingFailure);
    assert_eq!(calls(&state), 0);
}

#[test]
fn range_overflow_is_rejected() {
    let mut state = state();
    let argv = vec![call("count")];
    let err = read_args_range(&mut state, &argv, 1, usize::MAX).unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::ArgRange { .. }));
    assert_eq!(calls(&state), 0);
}

#[test]
fn read_value_args_requires_a_range() {
    let mut state = state();
    let err = read_value_args(&mut state, &[]).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::EmptyArgRange);

    let argv = vec![call("count")];
    let err = read_value_args_range(&mut state, &argv, 0, 0).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::EmptyArgRange);
    assert_eq!(calls(&state), 0);
}

#[test]
fn read_value_args_keeps_blobs() {
    let mut state = state();
    let argv = vec![Expr::literal("a"), call("blob")];
    assert_eq!(
        read_value_args(&mut state, &argv),
        Ok(vec![Value::string("a"), Value::blob(vec![0, 1, 2])])
    );
}

#[test]
fn evaluate_rejects_blob() {
    let mut state = state();
    let err = evaluate(&mut state, &call("blob")).unwrap_err();
    assert_eq!(err.message, "expecting string, got value type blob");
    assert_eq!(state.errmsg(), "expecting string, got value type blob");
    assert_eq!(state.cause_code(), CauseCode::ArgsParsingFailure);

    let mut state = self::state();
    let argv = vec![call("blob")];
    assert!(read_args(&mut state, &argv).is_err());
}

#[test]
fn error_abort_appends_and_keeps_cause() {
    let mut state = state();
    let first = error_abort(&mut state, format_args!("a{}", 1));
    let second = crate::error_abort!(&mut state, "b{}", 2);
    assert_eq!(first.message, "a1");
    assert_eq!(second.message, "b2");
    assert_eq!(state.errmsg(), "a1b2");
    assert_eq!(state.cause_code(), CauseCode::NoCause);
}

#[test]
fn error_abort_with_cause_sets_cause() {
    let mut state = state();
    let err = crate::error_abort_with_cause!(
        &mut state,
        CauseCode::FileOpenFailure,
        "open {}: denied",
        "/tmp/x"
    );
    assert_eq!(err.cause, CauseCode::FileOpenFailure);
    assert_eq!(state.errmsg(), "open /tmp/x: denied");
    assert_eq!(state.cause_code(), CauseCode::FileOpenFailure);
}

#[test]
fn first_failure_wins() {
    let mut state = state();
    let argv = vec![call("fail")];
    assert!(read_args(&mut state, &argv).is_err());
    assert!(evaluate(&mut state, &call("nope")).is_err());
    assert_eq!(state.errmsg(), "boom");
    assert_eq!(state.cause_code(), CauseCode::NoCause);
}

#[test]
fn empty_message_gets_context() {
    let mut state = state();
    assert!(evaluate(&mut state, &call("quiet")).is_err());
    assert_eq!(state.errmsg(), "quiet() failed");
}

#[test]
fn depth_limit_fails_the_run() {
    let mut state = State::builder("")
        .function_table(table())
        .max_depth(2)
        .build();
    let nested = Expr::call(
        "concat",
        vec![Expr::call("concat", vec![Expr::call("concat", vec![])])],
    );
    let err = evaluate(&mut state, &nested).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::RecursionLimit { depth: 2 });
    assert_eq!(state.cause_code(), CauseCode::RecursionLimit);
    assert!(state.call_stack().is_empty());

    let mut state = State::builder("")
        .function_table(table())
        .max_depth(2)
        .build();
    let shallow = Expr::call("concat", vec![Expr::call("concat", vec![])]);
    assert_eq!(evaluate(&mut state, &shallow), Ok(String::new()));
}

#[test]
fn backtrace_and_span_point_at_innermost_call() {
    let mut state = state();
    let inner = call("fail").with_span(Span::new(7, 13));
    let outer = Expr::call("concat", vec![inner]).with_span(Span::new(0, 14));
    let err = evaluate(&mut state, &outer).unwrap_err();

    assert_eq!(err.span, Some(Span::new(7, 13)));
    let names: Vec<_> = err
        .backtrace
        .as_ref()
        .map(|bt| bt.frames().iter().map(|f| f.name.clone()).collect())
        .unwrap_or_default();
    assert_eq!(names, vec!["fail".to_string(), "concat".to_string()]);
    assert!(state.call_stack().is_empty());
}

#[test]
fn deep_nesting_does_not_overflow() {
    let mut state = state();
    let mut expr = Expr::literal("leaf");
    for _ in 0..5_000 {
        expr = Expr::call("concat", vec![expr]);
    }
    assert_eq!(evaluate(&mut state, &expr), Ok("leaf".to_string()));
}

#[test]
fn condition_is_true_for_any_non_empty_text() {
    let mut state = state();
    assert_eq!(evaluate_condition(&mut state, &Expr::literal("")), Ok(false));
    assert_eq!(evaluate_condition(&mut state, &Expr::literal("0")), Ok(true));
    assert_eq!(evaluate_condition(&mut state, &Expr::literal(" ")), Ok(true));
    assert_eq!(evaluate_condition(&mut state, &call("count")), Ok(true));
    assert_eq!(calls(&state), 1);
}

#[test]
fn condition_rejects_blob() {
    let mut state = state();
    let err = evaluate_condition(&mut state, &call("blob")).unwrap_err();
    assert_eq!(err.message, "expecting string, got value type blob");
    assert!(state.is_aborted());
}
