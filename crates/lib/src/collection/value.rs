//! Value types for collections.
//!
//! This module provides the [`Value`] enum covering everything a collection
//! can store. Values are either leaf values (null, booleans, numbers, text)
//! or a nested [`Collection`], which is the structured form that serializes
//! recursively.

use std::fmt;

use super::{Collection, errors::CollectionError, traits::Touchable};

/// A value stored in a [`Collection`].
///
/// # Direct Comparisons
///
/// `Value` implements `PartialEq` with primitive types for ergonomic
/// comparisons:
///
/// ```
/// # use satchel::Value;
/// let text = Value::Text("hello".to_string());
/// let number = Value::Int(42);
///
/// assert!(text == "hello");
/// assert!(number == 42);
/// assert!(42 == number);
///
/// // Type mismatches return false
/// assert!(!(text == 42));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Null/empty value
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// Text string value
    Text(String),
    /// Nested collection of further values
    Collection(Collection),
}

impl Value {
    /// Returns true if this is a leaf value (anything but a nested collection)
    pub fn is_leaf(&self) -> bool {
        !matches!(self, Value::Collection(_))
    }

    /// Returns true if this is a null value
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::Collection(_) => "collection",
        }
    }

    /// Attempts to convert to a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(flag) => Some(*flag),
            _ => None,
        }
    }

    /// Attempts to convert to an integer
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(number) => Some(*number),
            _ => None,
        }
    }

    /// Attempts to convert to a float; integers widen losslessly enough
    /// for display purposes, so they qualify too
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(number) => Some(*number),
            Value::Int(number) => Some(*number as f64),
            _ => None,
        }
    }

    /// Attempts to convert to a string slice
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Attempts to convert to a nested collection reference
    pub fn as_collection(&self) -> Option<&Collection> {
        match self {
            Value::Collection(collection) => Some(collection),
            _ => None,
        }
    }

    /// Attempts to convert to a mutable nested collection reference
    pub fn as_collection_mut(&mut self) -> Option<&mut Collection> {
        match self {
            Value::Collection(collection) => Some(collection),
            _ => None,
        }
    }

    /// Returns the value as a touchable item, if it implements the
    /// [`Touchable`] capability. Leaf values do not.
    pub fn as_touchable_mut(&mut self) -> Option<&mut dyn Touchable> {
        match self {
            Value::Collection(collection) => Some(collection),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(flag) => write!(f, "{flag}"),
            Value::Int(number) => write!(f, "{number}"),
            Value::Float(number) => write!(f, "{number}"),
            Value::Text(text) => write!(f, "{text}"),
            Value::Collection(collection) => write!(f, "{collection}"),
        }
    }
}

// Convenient From implementations for common types
impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value as i64)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Int(value as i64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(value as f64)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<Collection> for Value {
    fn from(value: Collection) -> Self {
        Value::Collection(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}

// TryFrom implementations for typed accessors
impl TryFrom<&Value> for String {
    type Error = CollectionError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Text(text) => Ok(text.clone()),
            _ => Err(CollectionError::TypeMismatch {
                expected: "String".to_string(),
                actual: format!("{value:?}"),
            }),
        }
    }
}

impl<'a> TryFrom<&'a Value> for &'a str {
    type Error = CollectionError;

    fn try_from(value: &'a Value) -> Result<Self, Self::Error> {
        match value {
            Value::Text(text) => Ok(text),
            _ => Err(CollectionError::TypeMismatch {
                expected: "&str".to_string(),
                actual: format!("{value:?}"),
            }),
        }
    }
}

impl TryFrom<&Value> for i64 {
    type Error = CollectionError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Int(number) => Ok(*number),
            _ => Err(CollectionError::TypeMismatch {
                expected: "i64".to_string(),
                actual: format!("{value:?}"),
            }),
        }
    }
}

impl TryFrom<&Value> for f64 {
    type Error = CollectionError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Float(number) => Ok(*number),
            Value::Int(number) => Ok(*number as f64),
            _ => Err(CollectionError::TypeMismatch {
                expected: "f64".to_string(),
                actual: format!("{value:?}"),
            }),
        }
    }
}

impl TryFrom<&Value> for bool {
    type Error = CollectionError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Bool(flag) => Ok(*flag),
            _ => Err(CollectionError::TypeMismatch {
                expected: "bool".to_string(),
                actual: format!("{value:?}"),
            }),
        }
    }
}

impl TryFrom<&Value> for Collection {
    type Error = CollectionError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Collection(collection) => Ok(collection.clone()),
            _ => Err(CollectionError::TypeMismatch {
                expected: "Collection".to_string(),
                actual: format!("{value:?}"),
            }),
        }
    }
}

// PartialEq implementations for comparing Value with other types
impl PartialEq<str> for Value {
    fn eq(&self, other: &str) -> bool {
        match self {
            Value::Text(text) => text == other,
            _ => false,
        }
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl PartialEq<String> for Value {
    fn eq(&self, other: &String) -> bool {
        match self {
            Value::Text(text) => text == other,
            _ => false,
        }
    }
}

impl PartialEq<i64> for Value {
    fn eq(&self, other: &i64) -> bool {
        match self {
            Value::Int(number) => number == other,
            _ => false,
        }
    }
}

impl PartialEq<i32> for Value {
    fn eq(&self, other: &i32) -> bool {
        match self {
            Value::Int(number) => *number == *other as i64,
            _ => false,
        }
    }
}

impl PartialEq<f64> for Value {
    fn eq(&self, other: &f64) -> bool {
        match self {
            Value::Float(number) => number == other,
            _ => false,
        }
    }
}

impl PartialEq<bool> for Value {
    fn eq(&self, other: &bool) -> bool {
        match self {
            Value::Bool(flag) => flag == other,
            _ => false,
        }
    }
}

// Reverse implementations for symmetry
impl PartialEq<Value> for str {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}

impl PartialEq<Value> for &str {
    fn eq(&self, other: &Value) -> bool {
        other == *self
    }
}

impl PartialEq<Value> for String {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}

impl PartialEq<Value> for i64 {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}

impl PartialEq<Value> for i32 {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}

impl PartialEq<Value> for f64 {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}

impl PartialEq<Value> for bool {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}
