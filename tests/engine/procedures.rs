//! Tests for procedure definition, validation, and registration.

use keystone_engine::{Procedure, ProcedureRegistry, Scoping};
use keystone_foundation::ErrorKind;

#[test]
fn scoping_accepts_only_public_and_private() {
    assert_eq!(Scoping::clean(0).unwrap(), Scoping::Public);
    assert_eq!(Scoping::clean(1).unwrap(), Scoping::Private);

    for raw in 2..=u8::MAX {
        let err = Scoping::clean(raw).unwrap_err();
        assert!(
            matches!(err.kind, ErrorKind::InvalidScoping { raw: r } if r == raw),
            "raw {raw} must be rejected"
        );
    }
}

#[test]
fn registration_is_atomic_for_invalid_definitions() {
    let mut registry = ProcedureRegistry::new();
    registry
        .register(Procedure::new("good", Scoping::Public))
        .unwrap();

    let err = registry
        .register(Procedure::new("bad", Scoping::Public).with_parameters(["x", "x"]))
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::DuplicateParameter { .. }));

    // The registry holds exactly the procedures that validated.
    assert_eq!(registry.names().collect::<Vec<_>>(), vec!["good"]);
    assert!(registry.lookup("bad").is_err());
}

#[test]
fn definitions_are_immutable_once_registered() {
    let mut registry = ProcedureRegistry::new();
    registry
        .register(
            Procedure::new("fixed", Scoping::Public).with_parameters(["a"]),
        )
        .unwrap();

    // A second registration under the same name is rejected rather than
    // replacing the definition.
    let err = registry
        .register(Procedure::new("fixed", Scoping::Private))
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::DuplicateProcedure(_)));

    let stored = registry.lookup("fixed").unwrap();
    assert_eq!(stored.scoping(), Scoping::Public);
    assert_eq!(stored.parameters(), ["a".to_string()]);
}

#[test]
fn independent_registries_do_not_interfere() {
    let mut a = ProcedureRegistry::new();
    let mut b = ProcedureRegistry::new();

    a.register(Procedure::new("only-in-a", Scoping::Public))
        .unwrap();
    b.register(Procedure::new("only-in-b", Scoping::Public))
        .unwrap();

    assert!(a.lookup("only-in-b").is_err());
    assert!(b.lookup("only-in-a").is_err());
}
