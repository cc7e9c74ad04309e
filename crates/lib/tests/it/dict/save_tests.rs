use aliasdict::{Key, MemberAccess, persist::JournalEvent};
use serde_json::json;

use crate::helpers::journaled_dict;

#[test]
fn test_save_on_creation() {
    let (mut x, journal) = journaled_dict::<serde_json::Value>();
    x.update([("total", json!(6)), ("usergroup", json!("Knights of Ni"))])
        .unwrap();

    assert_eq!(
        journal.saved(),
        vec![
            (Key::from("total"), json!(6)),
            (Key::from("usergroup"), json!("Knights of Ni"))
        ]
    );
}

#[test]
fn test_save_on_update() {
    let (mut x, journal) = journaled_dict::<i64>();
    x.set("total", 6).unwrap();
    journal.take();

    let total = *x.get_member("total").unwrap();
    x.set_member("total", total + 1).unwrap();
    assert_eq!(journal.saved(), vec![(Key::from("total"), 7)]);
}

#[test]
fn test_save_sequence_reports_canonical_keys() {
    let (mut x, journal) = journaled_dict::<i32>();
    x.set_direct("store", 0);
    x.update([(Key::from("a"), 1), (Key::from(2), 2)]).unwrap();
    x.set_member("b", 3).unwrap();
    x.set("c", 4).unwrap();
    x.set(3, 5).unwrap();
    x.set_member("_3", 6).unwrap();
    x.set(3, 7).unwrap();
    x.set("_3", 8).unwrap();
    assert!(x.set("?3", 9).is_err());
    x.set_member("_4", 9).unwrap();
    x.set("_4", 10).unwrap();
    assert!(x.set("4", 11).is_err());

    assert_eq!(
        journal.saved(),
        vec![
            (Key::from("a"), 1),
            (Key::from(2), 2),
            (Key::from("b"), 3),
            (Key::from("c"), 4),
            (Key::from(3), 5),
            (Key::from(3), 6),
            (Key::from(3), 7),
            (Key::from(3), 8),
            (Key::from("_4"), 9),
            (Key::from("_4"), 10),
        ]
    );
}

#[test]
fn test_alias_changes_signal_without_a_key() {
    let (mut x, journal) = journaled_dict::<i32>();
    x.set("a", 1).unwrap();
    x.add_alias("a", "first").unwrap();
    x.delete_alias("first").unwrap();
    x.delete("a").unwrap();
    x.clear();

    let alias_signal = JournalEvent::Save {
        key: None,
        value: None,
    };
    assert_eq!(
        journal.events(),
        vec![
            JournalEvent::Save {
                key: Some(Key::from("a")),
                value: Some(1)
            },
            alias_signal.clone(),
            alias_signal.clone(),
            JournalEvent::Delete {
                key: Some(Key::from("a"))
            },
            alias_signal,
        ]
    );
}

#[test]
fn test_failed_operations_are_not_saved() {
    let (mut x, journal) = journaled_dict::<i32>();
    x.set(1, 1).unwrap();
    journal.take();

    assert!(x.set("1", 2).is_err());
    assert!(x.add_alias(1, "_1").is_ok());
    journal.take();
    assert!(x.add_alias("missing", "m").is_err());
    assert!(x.delete_alias(1).is_err());
    assert!(x.delete("missing").is_err());
    assert!(journal.is_empty());
}

#[test]
fn test_persistence_is_per_instance() {
    let (mut a, journal_a) = journaled_dict::<i32>();
    let (mut b, journal_b) = journaled_dict::<i32>();
    a.set("x", 1).unwrap();
    b.set("y", 2).unwrap();
    b.set("z", 3).unwrap();

    assert_eq!(journal_a.len(), 1);
    assert_eq!(journal_b.len(), 2);
}

#[test]
fn test_write_through_derived_alias_saves_canonical_key() {
    let (mut x, journal) = journaled_dict::<i64>();
    x.set("total weight", 6).unwrap();
    x.set("total_weight", 7).unwrap();
    x.set("_total", 8).unwrap();

    assert_eq!(
        journal.saved(),
        vec![
            (Key::from("total weight"), 6),
            (Key::from("total weight"), 7),
            (Key::from("_total"), 8),
        ]
    );
    assert_eq!(x.len(), 2);
}
