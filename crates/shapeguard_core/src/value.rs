//! Dynamic value model checked by the contract kernel.
//!
//! # Responsibility
//! - Represent host values whose dynamic category drives kind checks.
//! - Share object records by reference so guarded and frozen views observe
//!   one backing store.
//!
//! # Invariants
//! - `Null`, `Array` and `Object` all report `Category::Object`.
//! - Clones of `ObjectRef` / `ArrayRef` / `Function` alias the same storage.
//! - Reference-like values compare by identity, scalars by value.
//!
//! # See also
//! - `kind::satisfies` for the category-to-kind mapping.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt::{Debug, Display, Formatter};
use std::rc::Rc;

/// Dynamic category of a value, as reported by a `typeof` probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Undefined,
    Object,
    Boolean,
    Number,
    String,
    Function,
}

impl Category {
    /// Stable lowercase name used in error messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Object => "object",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Function => "function",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shared, interior-mutable record of named values.
///
/// Cloning an `ObjectRef` does not copy the record; both handles see every
/// later mutation.
#[derive(Clone, Default)]
pub struct ObjectRef {
    inner: Rc<RefCell<BTreeMap<String, Value>>>,
}

impl ObjectRef {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a record from `(key, value)` pairs. Later duplicates win.
    pub fn from_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let map = entries
            .into_iter()
            .map(|(key, value)| (key.into(), value))
            .collect::<BTreeMap<_, _>>();
        Self {
            inner: Rc::new(RefCell::new(map)),
        }
    }

    /// Returns a clone of the stored value, or `None` when the key is absent.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.inner.borrow().get(key).cloned()
    }

    /// Stores `value` under `key`, returning the previous value.
    pub fn insert(&self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.inner.borrow_mut().insert(key.into(), value)
    }

    pub fn remove(&self, key: &str) -> Option<Value> {
        self.inner.borrow_mut().remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.borrow().contains_key(key)
    }

    /// Returns present keys in sorted order.
    pub fn keys(&self) -> Vec<String> {
        self.inner.borrow().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    /// Returns whether both handles alias the same record.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Copies the current entries out of the shared record.
    pub fn snapshot(&self) -> BTreeMap<String, Value> {
        self.inner.borrow().clone()
    }
}

impl Debug for ObjectRef {
    // Keys only: records may reference themselves.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectRef")
            .field("keys", &self.keys())
            .finish()
    }
}

/// Shared, interior-mutable ordered sequence of values.
#[derive(Clone, Default)]
pub struct ArrayRef {
    inner: Rc<RefCell<Vec<Value>>>,
}

impl ArrayRef {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_vec(values: Vec<Value>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(values)),
        }
    }

    pub fn get(&self, index: usize) -> Option<Value> {
        self.inner.borrow().get(index).cloned()
    }

    pub fn push(&self, value: Value) {
        self.inner.borrow_mut().push(value);
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    pub fn to_vec(&self) -> Vec<Value> {
        self.inner.borrow().clone()
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Debug for ArrayRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArrayRef")
            .field("len", &self.len())
            .finish()
    }
}

type NativeBody = dyn Fn(&[Value]) -> Value;

/// Callable value with an explicitly declared arity.
///
/// Arity cannot be recovered from a Rust closure, so callers state it when
/// wrapping. The body receives exactly the arguments it is called with.
#[derive(Clone)]
pub struct Function {
    name: Rc<str>,
    arity: usize,
    body: Rc<NativeBody>,
}

impl Function {
    pub fn new<F>(name: impl Into<String>, arity: usize, body: F) -> Self
    where
        F: Fn(&[Value]) -> Value + 'static,
    {
        Self {
            name: Rc::from(name.into()),
            arity,
            body: Rc::new(body),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared parameter count.
    pub fn arity(&self) -> usize {
        self.arity
    }

    pub fn call(&self, args: &[Value]) -> Value {
        (self.body)(args)
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.body, &other.body)
    }
}

impl Debug for Function {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Function")
            .field("name", &self.name())
            .field("arity", &self.arity)
            .finish()
    }
}

/// Dynamically categorised host value.
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// Absent/unset sentinel; what reading a never-written field yields.
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(ArrayRef),
    Object(ObjectRef),
    Function(Function),
}

impl Value {
    pub fn category(&self) -> Category {
        match self {
            Self::Undefined => Category::Undefined,
            Self::Null | Self::Array(_) | Self::Object(_) => Category::Object,
            Self::Bool(_) => Category::Boolean,
            Self::Number(_) => Category::Number,
            Self::String(_) => Category::String,
            Self::Function(_) => Category::Function,
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Self::Object(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArrayRef> {
        match self {
            Self::Array(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&Function> {
        match self {
            Self::Function(value) => Some(value),
            _ => None,
        }
    }

    /// Converts a JSON document into a fresh value graph.
    pub fn from_json(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(value) => Self::Bool(value),
            serde_json::Value::Number(number) => {
                number.as_f64().map(Self::Number).unwrap_or(Self::Null)
            }
            serde_json::Value::String(value) => Self::String(value),
            serde_json::Value::Array(items) => Self::Array(ArrayRef::from_vec(
                items.into_iter().map(Self::from_json).collect(),
            )),
            serde_json::Value::Object(entries) => Self::Object(ObjectRef::from_entries(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, Self::from_json(value))),
            )),
        }
    }

    /// Converts to JSON. Functions, `Undefined` and non-finite numbers map to
    /// `null`. Cyclic graphs are not supported.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Undefined | Self::Null | Self::Function(_) => serde_json::Value::Null,
            Self::Bool(value) => serde_json::Value::Bool(*value),
            Self::Number(value) => number_to_json(*value),
            Self::String(value) => serde_json::Value::String(value.clone()),
            Self::Array(items) => {
                serde_json::Value::Array(items.to_vec().iter().map(Self::to_json).collect())
            }
            Self::Object(record) => serde_json::Value::Object(
                record
                    .snapshot()
                    .iter()
                    .map(|(key, value)| (key.clone(), value.to_json()))
                    .collect(),
            ),
        }
    }
}

fn number_to_json(value: f64) -> serde_json::Value {
    const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;
    if value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
        return serde_json::Value::from(value as i64);
    }
    serde_json::Number::from_f64(value)
        .map(serde_json::Value::Number)
        .unwrap_or(serde_json::Value::Null)
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Undefined, Self::Undefined) | (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => a.ptr_eq(b),
            (Self::Object(a), Self::Object(b)) => a.ptr_eq(b),
            (Self::Function(a), Self::Function(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Undefined => f.write_str("undefined"),
            Self::Null => f.write_str("null"),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Number(value) if value.is_nan() => f.write_str("NaN"),
            Self::Number(value) if value.is_infinite() => {
                f.write_str(if *value > 0.0 { "Infinity" } else { "-Infinity" })
            }
            Self::Number(value) => write!(f, "{value}"),
            Self::String(value) => f.write_str(value),
            Self::Array(items) => {
                let rendered = items
                    .to_vec()
                    .iter()
                    .map(|item| match item {
                        Self::Undefined | Self::Null => String::new(),
                        other => other.to_string(),
                    })
                    .collect::<Vec<_>>();
                f.write_str(&rendered.join(","))
            }
            Self::Object(_) => f.write_str("[object Object]"),
            Self::Function(function) => write!(f, "function {}", function.name()),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<ObjectRef> for Value {
    fn from(value: ObjectRef) -> Self {
        Self::Object(value)
    }
}

impl From<ArrayRef> for Value {
    fn from(value: ArrayRef) -> Self {
        Self::Array(value)
    }
}

impl From<Function> for Value {
    fn from(value: Function) -> Self {
        Self::Function(value)
    }
}

#[cfg(test)]
mod tests {
    use super::{ArrayRef, Category, Function, ObjectRef, Value};
    use serde_json::json;

    #[test]
    fn null_array_and_object_share_object_category() {
        assert_eq!(Value::Null.category(), Category::Object);
        assert_eq!(Value::from(ArrayRef::new()).category(), Category::Object);
        assert_eq!(Value::from(ObjectRef::new()).category(), Category::Object);
        assert_eq!(Value::Undefined.category(), Category::Undefined);
    }

    #[test]
    fn object_clones_alias_one_record() {
        let record = ObjectRef::new();
        let alias = record.clone();
        alias.insert("x", Value::from(1));

        assert_eq!(record.get("x"), Some(Value::Number(1.0)));
        assert!(record.ptr_eq(&alias));
        assert!(!record.ptr_eq(&ObjectRef::new()));
    }

    #[test]
    fn reference_values_compare_by_identity() {
        let record = ObjectRef::new();
        assert_eq!(Value::from(record.clone()), Value::from(record));
        assert_ne!(Value::from(ObjectRef::new()), Value::from(ObjectRef::new()));

        let noop = Function::new("noop", 0, |_| Value::Undefined);
        assert_eq!(Value::from(noop.clone()), Value::from(noop));
    }

    #[test]
    fn display_uses_host_rendering() {
        assert_eq!(Value::from(5).to_string(), "5");
        assert_eq!(Value::from(2.5).to_string(), "2.5");
        assert_eq!(Value::Number(f64::NAN).to_string(), "NaN");
        assert_eq!(Value::Number(f64::NEG_INFINITY).to_string(), "-Infinity");
        assert_eq!(Value::from(ObjectRef::new()).to_string(), "[object Object]");
        let items = ArrayRef::from_vec(vec![Value::from("a"), Value::Null, Value::from(1)]);
        assert_eq!(Value::from(items).to_string(), "a,,1");
    }

    #[test]
    fn json_bridge_keeps_integers_integral() {
        let source = json!({ "x": 5, "y": 2.5, "tags": ["a", true], "none": null });
        let value = Value::from_json(source.clone());

        let record = value.as_object().expect("json object becomes record");
        assert_eq!(record.get("x"), Some(Value::Number(5.0)));
        assert_eq!(value.to_json(), source);
    }

    #[test]
    fn functions_and_undefined_serialise_as_null() {
        let noop = Function::new("noop", 0, |_| Value::Undefined);
        assert_eq!(Value::from(noop).to_json(), serde_json::Value::Null);
        assert_eq!(Value::Undefined.to_json(), serde_json::Value::Null);
        assert_eq!(Value::Number(f64::INFINITY).to_json(), serde_json::Value::Null);
    }
}
