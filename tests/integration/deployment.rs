//! Deploy a manifest, execute against a snapshot, persist the result.

use std::sync::Arc;

use keystone_engine::{
    BinaryOp, CallContext, CallOrigin, Engine, Expr, Instruction,
};
use keystone_foundation::{ErrorKind, Value};
use keystone_runtime::{DeploymentManifest, ProcedureDef, serialize};
use keystone_storage::Snapshot;

fn counter_manifest() -> DeploymentManifest {
    DeploymentManifest {
        procedures: vec![
            ProcedureDef {
                name: "bump".to_string(),
                parameters: vec!["key".to_string()],
                scoping: 1,
                body: vec![
                    Instruction::Get {
                        key: Expr::var("key"),
                        bind: "current".to_string(),
                    },
                    Instruction::Assign {
                        name: "current".to_string(),
                        expr: Expr::binary(
                            BinaryOp::Add,
                            Expr::var("current"),
                            Expr::literal(1i64),
                        ),
                    },
                    Instruction::Put {
                        key: Expr::var("key"),
                        value: Expr::var("current"),
                    },
                ],
            },
            ProcedureDef {
                name: "record-visit".to_string(),
                parameters: vec![],
                scoping: 0,
                body: vec![
                    Instruction::Call {
                        procedure: "bump".to_string(),
                        args: vec![Expr::literal("visits")],
                        bind: None,
                    },
                    Instruction::Put {
                        key: Expr::literal("last-visitor"),
                        value: Expr::var("@caller"),
                    },
                ],
            },
        ],
    }
}

#[test]
fn deploy_execute_persist() {
    // Ship the manifest over the wire.
    let bytes = counter_manifest().to_bytes().unwrap();
    let manifest = DeploymentManifest::from_bytes(&bytes).unwrap();

    let registry = manifest.deploy().unwrap();
    let engine = Engine::new(Arc::new(registry));

    let genesis = Snapshot::new().put(Value::from("visits"), Value::Int(0));
    let ctx = CallContext::new(CallOrigin::External).with_caller("alice");

    let outcome = engine
        .execute_in_transaction(&genesis, "record-visit", &[], &ctx)
        .unwrap();
    assert_eq!(
        outcome.snapshot.get(&Value::from("visits")),
        Some(&Value::Int(1))
    );
    assert_eq!(
        outcome.snapshot.get(&Value::from("last-visitor")),
        Some(&Value::from("alice"))
    );

    // Persist the committed snapshot and read it back.
    let path = std::env::temp_dir().join("keystone_integration_snapshot.msgpack");
    serialize::save_to_file(&outcome.snapshot, &path).unwrap();
    let restored = serialize::load_from_file(&path).unwrap();
    assert_eq!(restored, outcome.snapshot);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn deployed_private_procedures_stay_private() {
    let registry = counter_manifest().deploy().unwrap();
    let engine = Engine::new(Arc::new(registry));
    let snapshot = Snapshot::new();
    let ctx = CallContext::new(CallOrigin::External);

    let err = engine
        .execute_in_transaction(&snapshot, "bump", &[Value::from("visits")], &ctx)
        .unwrap_err();
    assert!(matches!(err.root_kind(), ErrorKind::AccessDenied { .. }));
}

#[test]
fn manifest_with_bad_scoping_never_deploys() {
    let mut manifest = counter_manifest();
    manifest.procedures[0].scoping = 3;

    let err = manifest.deploy().unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidScoping { raw: 3 }));
}
