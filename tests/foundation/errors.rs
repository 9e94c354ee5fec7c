//! Integration tests for error types

use gridline_foundation::{EntityId, Error, ErrorContext, ErrorKind, Position};

#[test]
fn error_display_uses_kind() {
    let err = Error::out_of_bounds(EntityId::new(4), Position::new(9, 1), 5, 5);
    let text = err.to_string();
    assert!(text.contains("(9, 1)"));
    assert!(text.contains("5x5"));
}

#[test]
fn error_context_is_kept() {
    let err = Error::unknown_objective("treasure").with_context(
        ErrorContext::new()
            .with_operation("resolve objective")
            .with_note("registered: default, exit"),
    );
    assert!(matches!(err.kind, ErrorKind::UnknownObjective(ref n) if n == "treasure"));
    let context = err.context.unwrap();
    assert!(context.to_string().contains("resolve objective"));
}

#[test]
fn dangling_reference_names_the_relation() {
    let err = Error::dangling_reference(EntityId::new(1), EntityId::new(2), "portal pair");
    assert!(err.to_string().contains("portal pair"));
}

#[test]
fn errors_are_std_errors() {
    fn takes_std(_: &dyn std::error::Error) {}
    takes_std(&Error::invalid_config("no rules"));
}
