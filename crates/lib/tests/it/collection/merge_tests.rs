//! Merge precedence, bulk value transformation, and capability broadcasts.

use satchel::{Collection, Items, Key, Structured, Value};

// ===== MERGE =====

#[test]
fn test_merge_incoming_wins_on_conflicts() {
    let mut ours = Collection::new();
    ours.set("b", 3).set("c", 4);

    let mut theirs = Collection::new();
    theirs.set("a", 1).set("b", 2);

    ours.merge(theirs).unwrap();

    assert_eq!(ours.get_as::<i64>("a"), Some(1));
    assert_eq!(ours.get_as::<i64>("b"), Some(2));
    assert_eq!(ours.get_as::<i64>("c"), Some(4));

    // Incoming entries lead the order; surviving entries follow.
    let keys: Vec<_> = ours.keys().cloned().collect();
    assert_eq!(keys, [Key::from("a"), Key::from("b"), Key::from("c")]);
}

#[test]
fn test_merge_accepts_plain_mapping() {
    let mut bag = Collection::new();
    bag.set("kept", 1);

    let mut incoming = Items::new();
    incoming.insert(Key::from("added"), Value::Int(2));

    bag.merge(incoming).unwrap();

    assert_eq!(bag.get_as::<i64>("kept"), Some(1));
    assert_eq!(bag.get_as::<i64>("added"), Some(2));
}

#[test]
fn test_merge_rejects_scalar_source() {
    let mut bag = Collection::new();
    bag.set("kept", 1);
    let snapshot = bag.clone();

    let err = bag.merge(5).unwrap_err();

    assert!(err.is_merge_error());
    assert!(err.to_string().contains("not a structured source"));
    assert_eq!(bag, snapshot);
}

#[test]
fn test_merge_rejects_null_and_text_sources() {
    let mut bag = Collection::new();
    assert!(bag.merge(Value::Null).unwrap_err().is_merge_error());
    assert!(bag.merge("text").unwrap_err().is_merge_error());
}

#[test]
fn test_merge_structured_source() {
    let mut bag = Collection::new();
    bag.set("b", 3);

    let other = Collection::new().with("a", 1).with("b", 2);
    bag.merge_structured(&other);

    assert_eq!(bag.get_as::<i64>("a"), Some(1));
    assert_eq!(bag.get_as::<i64>("b"), Some(2));

    // A plain mapping is itself a structured source.
    let mut plain = Items::new();
    plain.insert(Key::from("c"), Value::Int(9));
    bag.merge_structured(&plain);
    assert_eq!(bag.get_as::<i64>("c"), Some(9));
}

#[test]
fn test_merge_is_chainable() {
    let mut bag = Collection::new();
    bag.set("a", 1);

    let incoming = Collection::new().with("b", 2);
    bag.merge(incoming).unwrap().set("c", 3);

    assert_eq!(bag.len(), 3);
}

#[test]
fn test_merge_empty_incoming_keeps_existing() {
    let mut bag = Collection::new();
    bag.set("a", 1).set("b", 2);
    let snapshot = bag.clone();

    bag.merge(Collection::new()).unwrap();
    assert_eq!(bag, snapshot);
}

// ===== MAP_VALUES =====

#[test]
fn test_map_values_preserves_keys_and_order() {
    let mut bag = Collection::new();
    bag.set("a", 1).push(2).set("c", 3);

    bag.map_values(|value| match value {
        Value::Int(number) => Value::Int(number * 10),
        other => other,
    });

    let keys: Vec<_> = bag.keys().cloned().collect();
    assert_eq!(keys, [Key::from("a"), Key::Index(0), Key::from("c")]);
    assert_eq!(bag.get_as::<i64>("a"), Some(10));
    assert_eq!(bag.get_as::<i64>(0), Some(20));
    assert_eq!(bag.get_as::<i64>("c"), Some(30));
}

#[test]
fn test_map_values_on_empty_collection() {
    let mut bag = Collection::new();
    bag.map_values(|value| value);
    assert!(bag.is_empty());
}

#[test]
fn test_map_values_is_chainable() {
    let mut bag = Collection::new();
    bag.push(1);
    bag.map_values(|_| Value::Null).set("done", true);
    assert_eq!(bag.get(0), Some(&Value::Null));
    assert_eq!(bag.get_as::<bool>("done"), Some(true));
}

// ===== TOUCH BROADCASTS =====

#[test]
fn test_touch_each_skips_leaf_values() {
    let mut bag = Collection::new();
    bag.set("a", 1).set("b", "text").set("c", Value::Null);
    let snapshot = bag.clone();

    bag.touch_each().set("after", true);

    assert_eq!(bag.remove("after"), Some(Value::Bool(true)));
    assert_eq!(bag, snapshot);
}

#[test]
fn test_touch_each_cascades_into_nested_collections() {
    let inner = Collection::new().with("leaf", 1);
    let middle = Collection::new().with("inner", inner);
    let mut outer = Collection::new().with("middle", middle).with("flag", true);
    let snapshot = outer.clone();

    outer.touch_each();

    assert_eq!(outer, snapshot);
}

#[test]
fn test_structured_exposes_plain_map() {
    let bag = Collection::new().with("a", 1).with("b", 2);
    let plain = bag.to_plain_map();

    assert_eq!(plain.len(), 2);
    assert_eq!(plain.get(&Key::from("a")), Some(&Value::Int(1)));
}
