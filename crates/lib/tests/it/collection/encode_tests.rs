//! Plain-data conversion and JSON encoding tests, including the encoding
//! failure taxonomy.

use satchel::{Collection, EncodeError, EncodeOptions, Value};
use serde_json::json;

// ===== PLAIN CONVERSION =====

#[test]
fn test_to_plain_matches_flat_mapping() {
    let mut bag = Collection::new();
    bag.set("name", "Alice").set("age", 30).set("active", true);

    assert_eq!(
        bag.to_plain(),
        json!({"name": "Alice", "age": 30, "active": true})
    );
}

#[test]
fn test_to_plain_converts_nested_collections() {
    let address = Collection::new().with("city", "Springfield");
    let mut bag = Collection::new();
    bag.set("name", "Alice").set("address", address);

    assert_eq!(
        bag.to_plain(),
        json!({"name": "Alice", "address": {"city": "Springfield"}})
    );
}

#[test]
fn test_to_plain_passes_leaves_through() {
    let mut bag = Collection::new();
    bag.push(Value::Null).push(1).push(2.5).push("text");

    assert_eq!(bag.to_plain(), json!([null, 1, 2.5, "text"]));
}

// ===== ARRAY VS OBJECT SHAPE =====

#[test]
fn test_sequential_keys_encode_as_array() {
    let mut bag = Collection::new();
    bag.push("a").push("b");

    assert_eq!(bag.to_json().unwrap(), r#"["a","b"]"#);
}

#[test]
fn test_mixed_keys_encode_as_object() {
    let mut bag = Collection::new();
    bag.push("a").set("name", "log");

    assert_eq!(bag.to_json().unwrap(), r#"{"0":"a","name":"log"}"#);
}

#[test]
fn test_gapped_indexes_encode_as_object() {
    let mut bag = Collection::new();
    bag.set(0, "a").set(2, "b");

    assert_eq!(bag.to_json().unwrap(), r#"{"0":"a","2":"b"}"#);
}

#[test]
fn test_empty_collection_encodes_as_array() {
    assert_eq!(Collection::new().to_json().unwrap(), "[]");
}

// ===== JSON TEXT =====

#[test]
fn test_to_json_preserves_insertion_order() {
    let mut bag = Collection::new();
    bag.set("zebra", 1).set("apple", 2).set("mango", 3);

    assert_eq!(bag.to_json().unwrap(), r#"{"zebra":1,"apple":2,"mango":3}"#);
}

#[test]
fn test_to_json_pretty() {
    let mut bag = Collection::new();
    bag.set("name", "Alice");

    let options = EncodeOptions {
        pretty: true,
        ..EncodeOptions::default()
    };
    let text = bag.to_json_with(&options).unwrap();
    assert_eq!(text, "{\n  \"name\": \"Alice\"\n}");
}

#[test]
fn test_serialize_hook_matches_to_plain() {
    let mut bag = Collection::new();
    bag.set("name", "Alice")
        .set("tags", Collection::new().with(0, "a").with(1, "b"));

    assert_eq!(serde_json::to_value(&bag).unwrap(), bag.to_plain());
}

// ===== FAILURE TAXONOMY =====

fn nested_to_depth(levels: usize) -> Collection {
    let mut current = Collection::new();
    current.push(1);
    for _ in 1..levels {
        let mut outer = Collection::new();
        outer.push(current);
        current = outer;
    }
    current
}

#[test]
fn test_depth_exceeded_with_default_limit() {
    let deep = nested_to_depth(600);

    let err = deep.to_json().unwrap_err();
    assert!(err.is_encode_error());
    assert!(matches!(
        err.encode_cause(),
        Some(EncodeError::DepthExceeded { limit: 512 })
    ));
}

#[test]
fn test_depth_exceeded_message_is_distinct() {
    let deep = nested_to_depth(4);
    let options = EncodeOptions {
        max_depth: 2,
        ..EncodeOptions::default()
    };

    let message = deep.to_json_with(&options).unwrap_err().to_string();
    assert!(message.contains("nesting depth"));
    assert!(!message.contains("malformed JSON"));
    assert!(!message.contains("UTF-8"));
}

#[test]
fn test_depth_within_limit_succeeds() {
    let nested = nested_to_depth(3);
    let options = EncodeOptions {
        max_depth: 3,
        ..EncodeOptions::default()
    };

    assert_eq!(nested.to_json_with(&options).unwrap(), "[[[1]]]");
}

#[test]
fn test_encode_error_messages_are_distinct() {
    let messages = [
        EncodeError::DepthExceeded { limit: 512 }.to_string(),
        EncodeError::StateMismatch {
            reason: "x".to_string(),
        }
        .to_string(),
        EncodeError::ControlCharacter.to_string(),
        EncodeError::Syntax {
            reason: "x".to_string(),
        }
        .to_string(),
        EncodeError::InvalidUtf8.to_string(),
        EncodeError::Unknown {
            reason: "x".to_string(),
        }
        .to_string(),
    ];

    for (i, left) in messages.iter().enumerate() {
        for right in &messages[i + 1..] {
            assert_ne!(left, right);
        }
    }
}

// ===== DESERIALIZATION =====

#[test]
fn test_deserialize_round_trip() {
    let text = r#"{"name":"Alice","tags":["a","b"],"age":30,"note":null}"#;

    let bag: Collection = serde_json::from_str(text).unwrap();
    assert_eq!(bag.get_as::<&str>("name"), Some("Alice"));
    assert_eq!(bag.get_as::<i64>("age"), Some(30));
    assert_eq!(bag.get("note"), Some(&Value::Null));

    assert_eq!(bag.to_json().unwrap(), text);
}

#[test]
fn test_deserialize_array_becomes_positional() {
    let bag: Collection = serde_json::from_str("[1,2,3]").unwrap();

    assert_eq!(bag.len(), 3);
    assert_eq!(bag.get_as::<i64>(0), Some(1));
    assert_eq!(bag.get_as::<i64>(2), Some(3));
    assert!(bag.items().keys().all(|key| key.is_index()));
}

#[test]
fn test_deserialize_scalar_fails() {
    assert!(serde_json::from_str::<Collection>("42").is_err());
    assert!(serde_json::from_str::<Collection>("\"text\"").is_err());
}

#[test]
fn test_deserialize_large_integers_fall_back_to_float() {
    let bag: Collection = serde_json::from_str("[18446744073709551615]").unwrap();
    assert!(matches!(bag.get(0), Some(Value::Float(_))));
}

// ===== EDGE VALUES =====

#[test]
fn test_non_finite_floats_encode_as_null() {
    let mut bag = Collection::new();
    bag.push(f64::NAN);

    assert_eq!(bag.to_json().unwrap(), "[null]");
    assert_eq!(bag.to_plain(), json!([null]));
}

#[test]
fn test_control_characters_in_text_are_escaped() {
    let mut bag = Collection::new();
    bag.push("line\nbreak");

    assert_eq!(bag.to_json().unwrap(), r#"["line\nbreak"]"#);
}
