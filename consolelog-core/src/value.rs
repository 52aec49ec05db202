//! Runtime values handed to the console
//!
//! [`Value`] is what callers log. Scalars, sequences and mappings are plain
//! data; structured objects are shared handles to an [`Inspect`]
//! implementor, so the converter can tell two mentions of the same object
//! apart from two equal objects.
//!
//! ```rust
//! use std::sync::Arc;
//! use consolelog_core::{Field, Inspect, Value};
//!
//! struct Point { x: i64, y: i64 }
//!
//! impl Inspect for Point {
//!     fn type_name(&self) -> &str { "Point" }
//!     fn fields(&self) -> Vec<Field> {
//!         vec![Field::public("x", self.x), Field::private("y", self.y)]
//!     }
//! }
//!
//! let point = Value::from(Arc::new(Point { x: 1, y: 2 }));
//! let args = vec![Value::from("origin:"), point.clone(), point];
//! assert_eq!(args.len(), 3);
//! ```

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::error::Result;

/// Field enumeration for structured objects
///
/// Implementors list their fields in declaration order. Values nested in
/// fields go through the converter again, so objects reachable from several
/// places are expanded once per logging call and referenced afterwards.
pub trait Inspect: Send + Sync {
    /// Type name shown in the `___class_name` entry and in reference tokens
    fn type_name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Fields in declaration order
    fn fields(&self) -> Vec<Field>;
}

/// Identity of a shared object, stable while the object is alive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(usize);

/// Shared handle to a structured object
#[derive(Clone)]
pub struct ObjectRef(Arc<dyn Inspect>);

impl ObjectRef {
    /// Wrap a freshly built object
    pub fn new<T: Inspect + 'static>(object: T) -> Self {
        Self(Arc::new(object))
    }

    /// Wrap an already shared object without changing its identity
    pub fn from_arc(object: Arc<dyn Inspect>) -> Self {
        Self(object)
    }

    /// Identity of the underlying allocation
    pub fn id(&self) -> ObjectId {
        ObjectId(Arc::as_ptr(&self.0) as *const () as usize)
    }

    pub fn type_name(&self) -> &str {
        self.0.type_name()
    }

    pub fn fields(&self) -> Vec<Field> {
        self.0.fields()
    }

    /// Whether both handles point at the same object
    pub fn same_object(&self, other: &ObjectRef) -> bool {
        self.id() == other.id()
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ObjectRef").field(&self.type_name()).finish()
    }
}

/// Declared visibility of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    Public,
    Protected,
    Private,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Protected => "protected",
            Visibility::Private => "private",
        }
    }
}

/// One field of a structured object
#[derive(Debug, Clone)]
pub struct Field {
    /// Declared visibility
    pub visibility: Visibility,
    /// Extra modifiers written after the visibility (e.g. `static`)
    pub modifiers: Vec<String>,
    /// Field name
    pub name: String,
    /// Field value
    pub value: Value,
}

impl Field {
    pub fn new(visibility: Visibility, name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            visibility,
            modifiers: Vec::new(),
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn public(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(Visibility::Public, name, value)
    }

    pub fn protected(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(Visibility::Protected, name, value)
    }

    pub fn private(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(Visibility::Private, name, value)
    }

    /// Add a modifier such as `static` or `readonly`
    pub fn with_modifier(mut self, modifier: impl Into<String>) -> Self {
        self.modifiers.push(modifier.into());
        self
    }

    /// Key used in the converted mapping: modifiers, then the name
    ///
    /// `Field::private("c", 3).label()` is `"private c"`.
    pub fn label(&self) -> String {
        let mut parts = Vec::with_capacity(self.modifiers.len() + 2);
        parts.push(self.visibility.as_str());
        parts.extend(self.modifiers.iter().map(String::as_str));
        parts.push(self.name.as_str());
        parts.join(" ")
    }
}

/// Opaque OS-level handle (file descriptor, socket, stream)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Handle {
    /// Numeric handle id
    pub id: u64,
    /// Handle kind, e.g. `"stream"` or `"socket"`
    pub kind: String,
}

impl Handle {
    pub fn new(id: u64, kind: impl Into<String>) -> Self {
        Self {
            id,
            kind: kind.into(),
        }
    }

    /// Describe a file descriptor owned by `source`
    #[cfg(unix)]
    pub fn from_raw_fd<T: std::os::fd::AsRawFd>(source: &T, kind: impl Into<String>) -> Self {
        Self::new(source.as_raw_fd() as u64, kind)
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "handle #{}", self.id)
    }
}

/// A value passed to a logging call
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    String(String),
    /// Ordered list
    Sequence(Vec<Value>),
    /// Ordered key/value pairs
    Mapping(Vec<(String, Value)>),
    /// Structured object with identity
    Object(ObjectRef),
    /// OS-level handle
    Handle(Handle),
    /// Anything else, already rendered to a human-readable dump
    Opaque(String),
}

impl Value {
    /// Build an ordered mapping
    ///
    /// Keys should be unique; on the wire the first entry for a key wins.
    pub fn mapping<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Value::Mapping(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Build a sequence
    pub fn sequence<V, I>(items: I) -> Self
    where
        V: Into<Value>,
        I: IntoIterator<Item = V>,
    {
        Value::Sequence(items.into_iter().map(Into::into).collect())
    }

    /// Wrap an object in a shared handle
    pub fn object<T: Inspect + 'static>(object: T) -> Self {
        Value::Object(ObjectRef::new(object))
    }

    /// Render an arbitrary value with its pretty `Debug` output
    pub fn opaque<T: fmt::Debug + ?Sized>(value: &T) -> Self {
        Value::Opaque(format!("{:#?}", value))
    }

    /// Capture any serializable value through its serde_json representation
    ///
    /// The result is plain data; objects captured this way carry no identity.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        Ok(serde_json::to_value(value)?.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

macro_rules! impl_from_signed {
    ($($ty:ty),*) => {
        $(impl From<$ty> for Value {
            fn from(value: $ty) -> Self {
                Value::Int(value as i64)
            }
        })*
    };
}

macro_rules! impl_from_unsigned {
    ($($ty:ty),*) => {
        $(impl From<$ty> for Value {
            fn from(value: $ty) -> Self {
                Value::UInt(value as u64)
            }
        })*
    };
}

impl_from_signed!(i8, i16, i32, i64, isize);
impl_from_unsigned!(u8, u16, u32, u64, usize);

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(value as f64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Value::String(value.clone())
    }
}

impl From<char> for Value {
    fn from(value: char) -> Self {
        Value::String(value.to_string())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::sequence(items)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}

impl From<Handle> for Value {
    fn from(handle: Handle) -> Self {
        Value::Handle(handle)
    }
}

impl From<ObjectRef> for Value {
    fn from(object: ObjectRef) -> Self {
        Value::Object(object)
    }
}

impl<T: Inspect + 'static> From<Arc<T>> for Value {
    fn from(object: Arc<T>) -> Self {
        Value::Object(ObjectRef::from_arc(object))
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Value::UInt(u)
                } else {
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Sequence(items.into_iter().map(Into::into).collect())
            }
            serde_json::Value::Object(map) => {
                Value::Mapping(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}
