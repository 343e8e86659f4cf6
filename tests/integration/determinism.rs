//! Replica determinism: identical procedure, arguments, and starting
//! snapshot must produce identical outcomes, run after run.

use std::sync::Arc;

use proptest::prelude::*;

use keystone_engine::{
    BinaryOp, CallContext, CallOrigin, Engine, Expr, Instruction, Procedure, ProcedureRegistry,
    Scoping,
};
use keystone_foundation::Value;
use keystone_storage::Snapshot;

fn transfer_engine() -> Engine {
    let mut registry = ProcedureRegistry::new();
    registry
        .register(
            Procedure::new("debit", Scoping::Private)
                .with_parameters(["account", "amount"])
                .with_body([
                    Instruction::Get {
                        key: Expr::var("account"),
                        bind: "balance".to_string(),
                    },
                    Instruction::Require {
                        cond: Expr::binary(BinaryOp::Ge, Expr::var("balance"), Expr::var("amount")),
                        message: "insufficient balance".to_string(),
                    },
                    Instruction::Put {
                        key: Expr::var("account"),
                        value: Expr::binary(
                            BinaryOp::Sub,
                            Expr::var("balance"),
                            Expr::var("amount"),
                        ),
                    },
                ]),
        )
        .unwrap();
    registry
        .register(
            Procedure::new("credit", Scoping::Private)
                .with_parameters(["account", "amount"])
                .with_body([
                    Instruction::Get {
                        key: Expr::var("account"),
                        bind: "balance".to_string(),
                    },
                    Instruction::Put {
                        key: Expr::var("account"),
                        value: Expr::binary(
                            BinaryOp::Add,
                            Expr::var("balance"),
                            Expr::var("amount"),
                        ),
                    },
                ]),
        )
        .unwrap();
    registry
        .register(
            Procedure::new("transfer", Scoping::Public)
                .with_parameters(["from", "to", "amount"])
                .with_body([
                    Instruction::Call {
                        procedure: "debit".to_string(),
                        args: vec![Expr::var("from"), Expr::var("amount")],
                        bind: None,
                    },
                    Instruction::Call {
                        procedure: "credit".to_string(),
                        args: vec![Expr::var("to"), Expr::var("amount")],
                        bind: None,
                    },
                ]),
        )
        .unwrap();
    Engine::new(Arc::new(registry))
}

proptest! {
    #[test]
    fn transfer_outcomes_are_identical_across_runs(
        alice in 0i64..1_000_000,
        bob in 0i64..1_000_000,
        amount in 0i64..2_000_000,
    ) {
        let engine = transfer_engine();
        let snapshot = Snapshot::new()
            .put(Value::from("alice"), Value::Int(alice))
            .put(Value::from("bob"), Value::Int(bob));
        let ctx = CallContext::new(CallOrigin::External).with_caller("alice");
        let args = [Value::from("alice"), Value::from("bob"), Value::Int(amount)];

        let first = engine.execute_in_transaction(&snapshot, "transfer", &args, &ctx);
        let second = engine.execute_in_transaction(&snapshot, "transfer", &args, &ctx);

        match (first, second) {
            (Ok(a), Ok(b)) => {
                prop_assert!(amount <= alice);
                prop_assert_eq!(a.snapshot, b.snapshot);
                prop_assert_eq!(a.value, b.value);
            }
            (Err(a), Err(b)) => {
                prop_assert!(amount > alice);
                // Failures map to "no effect" identically on every run.
                prop_assert_eq!(a.to_string(), b.to_string());
            }
            (a, b) => {
                prop_assert!(false, "diverging outcomes: {a:?} vs {b:?}");
            }
        }
    }

    #[test]
    fn serialized_snapshots_are_byte_identical(
        amount in 0i64..100,
    ) {
        let engine = transfer_engine();
        let snapshot = Snapshot::new()
            .put(Value::from("alice"), Value::Int(500))
            .put(Value::from("bob"), Value::Int(0));
        let ctx = CallContext::new(CallOrigin::External);
        let args = [Value::from("alice"), Value::from("bob"), Value::Int(amount)];

        let a = engine
            .execute_in_transaction(&snapshot, "transfer", &args, &ctx)
            .unwrap();
        let b = engine
            .execute_in_transaction(&snapshot, "transfer", &args, &ctx)
            .unwrap();

        let bytes_a = keystone_runtime::serialize::to_bytes(&a.snapshot).unwrap();
        let bytes_b = keystone_runtime::serialize::to_bytes(&b.snapshot).unwrap();
        prop_assert_eq!(bytes_a, bytes_b);
    }
}
