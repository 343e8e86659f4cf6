//! Tests for the transaction boundary.

use keystone_foundation::Value;
use keystone_storage::{Snapshot, Transaction};

fn accounts() -> Snapshot {
    Snapshot::new()
        .put(Value::from("alice"), Value::Int(100))
        .put(Value::from("bob"), Value::Int(50))
}

#[test]
fn commit_is_all_writes() {
    let mut txn = Transaction::begin(accounts());
    txn.put(Value::from("alice"), Value::Int(90));
    txn.put(Value::from("bob"), Value::Int(60));

    let snap = txn.commit();
    assert_eq!(snap.get(&Value::from("alice")), Some(&Value::Int(90)));
    assert_eq!(snap.get(&Value::from("bob")), Some(&Value::Int(60)));
}

#[test]
fn rollback_is_no_writes() {
    let base = accounts();
    let mut txn = Transaction::begin(base.clone());
    txn.put(Value::from("alice"), Value::Int(0));
    txn.delete(&Value::from("bob"));

    assert_eq!(txn.rollback(), base);
}

#[test]
fn dropping_a_transaction_leaves_the_base_untouched() {
    let base = accounts();
    {
        let mut txn = Transaction::begin(base.clone());
        txn.put(Value::from("alice"), Value::Int(0));
        // Dropped without commit.
    }
    assert_eq!(base.get(&Value::from("alice")), Some(&Value::Int(100)));
}

#[test]
fn sequential_transactions_compose() {
    let s0 = accounts();

    let mut t1 = Transaction::begin(s0);
    t1.put(Value::from("alice"), Value::Int(90));
    let s1 = t1.commit();

    let mut t2 = Transaction::begin(s1);
    t2.put(Value::from("bob"), Value::Int(60));
    let s2 = t2.commit();

    assert_eq!(s2.get(&Value::from("alice")), Some(&Value::Int(90)));
    assert_eq!(s2.get(&Value::from("bob")), Some(&Value::Int(60)));
}
