//! Tests for error construction and display.

use keystone_foundation::{Error, ErrorContext, ErrorKind};

#[test]
fn arity_message_matches_contract() {
    let err = Error::arity_mismatch("transfer", 3, 1);
    assert_eq!(
        err.to_string(),
        "procedure 'transfer' requires 3 arguments, got 1"
    );
}

#[test]
fn access_denied_names_procedure_and_origin() {
    let err = Error::access_denied("admin-only", "external");
    let msg = err.to_string();
    assert!(msg.contains("admin-only"));
    assert!(msg.contains("external"));
}

#[test]
fn instruction_failures_chain_to_the_root_cause() {
    let root = Error::undefined_variable("balance");
    let wrapped = Error::instruction_failed("debit", 2, root);
    let outer = Error::instruction_failed("transfer", 0, wrapped);

    assert!(matches!(
        outer.root_kind(),
        ErrorKind::UndefinedVariable(name) if name == "balance"
    ));

    let msg = outer.to_string();
    assert!(msg.contains("procedure 'transfer' instruction 0"));
    assert!(msg.contains("procedure 'debit' instruction 2"));
}

#[test]
fn context_records_call_stack() {
    let ctx = ErrorContext::new().with_frame("transfer").with_frame("debit");
    assert_eq!(ctx.stack.len(), 2);

    let rendered = ctx.to_string();
    assert!(rendered.contains("in transfer"));
    assert!(rendered.contains("in debit"));
}
