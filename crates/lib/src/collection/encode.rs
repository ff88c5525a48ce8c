//! JSON conversion and encoding for collections.
//!
//! A collection converts to plain nested data with [`Collection::to_plain`]
//! and to JSON text with [`Collection::to_json`]. Collections whose keys
//! form a plain sequence (positional keys counting up from zero, nothing
//! else) become JSON arrays; any other key shape becomes a JSON object with
//! stringified keys. Encoding failures are classified into the
//! [`EncodeError`] taxonomy.

use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::error::Category;
use tracing::debug;

use super::{Collection, Key, Value};
use super::errors::{CollectionError, EncodeError};

/// Maximum nesting depth used when no explicit limit is configured.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Options controlling [`Collection::to_json_with`].
#[derive(Debug, Clone)]
pub struct EncodeOptions {
    /// Pretty-print the output with indentation
    pub pretty: bool,
    /// Maximum allowed nesting depth before encoding fails
    pub max_depth: usize,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            pretty: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Collection {
    /// Returns true when the entries form a plain sequence: positional keys
    /// counting up from zero in iteration order, nothing else. An empty
    /// collection qualifies.
    pub(crate) fn has_sequential_keys(&self) -> bool {
        self.keys()
            .enumerate()
            .all(|(position, key)| key.as_index() == Some(position as i64))
    }

    /// Converts the collection into plain nested data.
    ///
    /// Nested collections are converted recursively; every other value
    /// passes through unchanged. Sequentially indexed collections become
    /// arrays, everything else becomes an object.
    ///
    /// ```
    /// # use satchel::Collection;
    /// # use serde_json::json;
    /// let mut bag = Collection::new();
    /// bag.push("a").push("b");
    /// assert_eq!(bag.to_plain(), json!(["a", "b"]));
    ///
    /// bag.set("name", "log");
    /// assert_eq!(bag.to_plain(), json!({"0": "a", "1": "b", "name": "log"}));
    /// ```
    pub fn to_plain(&self) -> serde_json::Value {
        if self.has_sequential_keys() {
            serde_json::Value::Array(self.values().map(plain_value).collect())
        } else {
            let mut object = serde_json::Map::with_capacity(self.len());
            for (key, value) in self.iter() {
                object.insert(key.to_string(), plain_value(value));
            }
            serde_json::Value::Object(object)
        }
    }

    /// Serializes the collection to JSON text with default options.
    ///
    /// Equivalent to [`to_json_with`](Self::to_json_with) using
    /// [`EncodeOptions::default`].
    pub fn to_json(&self) -> Result<String, CollectionError> {
        self.to_json_with(&EncodeOptions::default())
    }

    /// Serializes the collection to JSON text.
    ///
    /// The output shape matches [`to_plain`](Self::to_plain). Failures are
    /// classified by cause into [`EncodeError`], with the nesting depth
    /// checked against `options.max_depth` before the encoder runs.
    ///
    /// ```
    /// # use satchel::{Collection, EncodeOptions};
    /// let mut bag = Collection::new();
    /// bag.set("name", "Alice");
    ///
    /// let text = bag.to_json_with(&EncodeOptions::default())?;
    /// assert_eq!(text, r#"{"name":"Alice"}"#);
    /// # Ok::<(), satchel::CollectionError>(())
    /// ```
    pub fn to_json_with(&self, options: &EncodeOptions) -> Result<String, CollectionError> {
        match self.encode(options) {
            Ok(text) => Ok(text),
            Err(cause) => {
                debug!(error = %cause, "JSON encoding failed");
                Err(CollectionError::Encode(cause))
            }
        }
    }

    fn encode(&self, options: &EncodeOptions) -> Result<String, EncodeError> {
        ensure_depth(self, options.max_depth)?;
        let bytes = if options.pretty {
            serde_json::to_vec_pretty(self)
        } else {
            serde_json::to_vec(self)
        };
        let bytes = bytes.map_err(classify)?;
        String::from_utf8(bytes).map_err(|_| EncodeError::InvalidUtf8)
    }
}

fn plain_value(value: &Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(flag) => serde_json::Value::Bool(*flag),
        Value::Int(number) => serde_json::Value::from(*number),
        // Non-finite floats have no JSON form and encode as null
        Value::Float(number) => serde_json::Number::from_f64(*number)
            .map_or(serde_json::Value::Null, serde_json::Value::Number),
        Value::Text(text) => serde_json::Value::String(text.clone()),
        Value::Collection(collection) => collection.to_plain(),
    }
}

/// Rejects structures nesting deeper than `limit` levels before they reach
/// the encoder.
fn ensure_depth(collection: &Collection, limit: usize) -> Result<(), EncodeError> {
    fn walk(collection: &Collection, depth: usize, limit: usize) -> Result<(), EncodeError> {
        if depth > limit {
            return Err(EncodeError::DepthExceeded { limit });
        }
        for value in collection.values() {
            if let Value::Collection(inner) = value {
                walk(inner, depth + 1, limit)?;
            }
        }
        Ok(())
    }
    walk(collection, 1, limit)
}

/// Translates an encoder failure into the domain taxonomy.
fn classify(err: serde_json::Error) -> EncodeError {
    let reason = err.to_string();
    match err.classify() {
        Category::Data => EncodeError::StateMismatch { reason },
        Category::Syntax | Category::Eof => {
            if reason.contains("control character") {
                EncodeError::ControlCharacter
            } else {
                EncodeError::Syntax { reason }
            }
        }
        Category::Io => EncodeError::Unknown { reason },
    }
}

impl Serialize for Collection {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if self.has_sequential_keys() {
            let mut seq = serializer.serialize_seq(Some(self.len()))?;
            for value in self.values() {
                seq.serialize_element(value)?;
            }
            seq.end()
        } else {
            let mut map = serializer.serialize_map(Some(self.len()))?;
            for (key, value) in self.iter() {
                map.serialize_entry(&key.to_string(), value)?;
            }
            map.end()
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(flag) => serializer.serialize_bool(*flag),
            Value::Int(number) => serializer.serialize_i64(*number),
            Value::Float(number) => serializer.serialize_f64(*number),
            Value::Text(text) => serializer.serialize_str(text),
            Value::Collection(collection) => collection.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("any JSON-shaped value")
            }

            fn visit_bool<E>(self, flag: bool) -> Result<Value, E>
            where
                E: de::Error,
            {
                Ok(Value::Bool(flag))
            }

            fn visit_i64<E>(self, number: i64) -> Result<Value, E>
            where
                E: de::Error,
            {
                Ok(Value::Int(number))
            }

            fn visit_u64<E>(self, number: u64) -> Result<Value, E>
            where
                E: de::Error,
            {
                Ok(i64::try_from(number).map_or(Value::Float(number as f64), Value::Int))
            }

            fn visit_f64<E>(self, number: f64) -> Result<Value, E>
            where
                E: de::Error,
            {
                Ok(Value::Float(number))
            }

            fn visit_str<E>(self, text: &str) -> Result<Value, E>
            where
                E: de::Error,
            {
                Ok(Value::Text(text.to_string()))
            }

            fn visit_string<E>(self, text: String) -> Result<Value, E>
            where
                E: de::Error,
            {
                Ok(Value::Text(text))
            }

            fn visit_none<E>(self) -> Result<Value, E>
            where
                E: de::Error,
            {
                Ok(Value::Null)
            }

            fn visit_unit<E>(self) -> Result<Value, E>
            where
                E: de::Error,
            {
                Ok(Value::Null)
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut collection = Collection::new();
                while let Some(value) = seq.next_element::<Value>()? {
                    collection.push(value);
                }
                Ok(Value::Collection(collection))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut collection = Collection::new();
                while let Some((key, value)) = map.next_entry::<String, Value>()? {
                    collection.set(Key::Text(key), value);
                }
                Ok(Value::Collection(collection))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

impl<'de> Deserialize<'de> for Collection {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Collection(collection) => Ok(collection),
            other => Err(de::Error::invalid_type(
                de::Unexpected::Other(other.type_name()),
                &"a JSON array or object",
            )),
        }
    }
}
