use super::*;

#[test]
fn span_basic() {
    let span = Span::new(10, 20);
    assert_eq!(span.len(), 10);
    assert!(!span.is_empty());
    assert_eq!(span.to_range(), 10..20);
}

#[test]
fn dummy_span_is_empty() {
    assert!(Span::DUMMY.is_empty());
    assert_eq!(Span::DUMMY.len(), 0);
}

#[test]
fn try_from_range_rejects_oversized_offsets() {
    let too_big = u32::MAX as usize + 1;
    assert_eq!(
        Span::try_from_range(too_big..too_big),
        Err(SpanError::StartTooLarge(too_big))
    );
    assert_eq!(
        Span::try_from_range(0..too_big),
        Err(SpanError::EndTooLarge(too_big))
    );
    assert_eq!(Span::try_from_range(3..7), Ok(Span::new(3, 7)));
}

#[test]
fn slice_returns_covered_text() {
    let script = r#"assert(is_substring("a", "b"))"#;
    let span = Span::new(7, 29);
    assert_eq!(span.slice(script), Some(r#"is_substring("a", "b")"#));
}

#[test]
fn slice_out_of_range_is_none() {
    assert_eq!(Span::new(4, 40).slice("short"), None);
    assert_eq!(Span::DUMMY.slice("anything"), None);
}

#[test]
fn display_and_debug_agree() {
    let span = Span::new(1, 5);
    assert_eq!(span.to_string(), "1..5");
    assert_eq!(format!("{span:?}"), "1..5");
}
