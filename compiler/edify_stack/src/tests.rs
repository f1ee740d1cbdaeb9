use super::*;

#[test]
fn returns_closure_result() {
    assert_eq!(ensure_sufficient_stack(|| "t"), "t");
}

#[test]
fn passes_errors_through() {
    let result: Result<(), String> = ensure_sufficient_stack(|| Err("abort called".to_string()));
    assert_eq!(result, Err("abort called".to_string()));
}

#[test]
fn nested_call_chain_does_not_overflow() {
    // Mirrors concat(concat(concat(...))) nested 100k deep.
    fn nest(depth: u32) -> String {
        ensure_sufficient_stack(|| {
            if depth == 0 {
                String::from("x")
            } else {
                nest(depth - 1)
            }
        })
    }

    assert_eq!(nest(100_000), "x");
}
