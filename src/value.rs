use std::{collections::HashMap, fmt::Display, mem};

use crate::error::{AccessError, Error, TypeError};

/// Tag identifying which of the six JSON kinds a [`Value`] holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
}

impl Type {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A JSON document node.
///
/// Containers own their children, so a tree is always acyclic. Numbers are
/// stored as `f64` whatever they were built from.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Boolean(bool),
    Number(f64),
    String(String),
    Array(Vec<Value>),
    Object(HashMap<String, Value>),
}

impl Value {
    pub fn null() -> Self {
        Self::Null
    }

    /// Builds an array from anything convertible into values.
    pub fn array<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::Array(values.into_iter().map(Into::into).collect())
    }

    /// Builds an object from key/value pairs. Later duplicates win.
    pub fn object<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Self::Object(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn kind(&self) -> Type {
        match self {
            Self::Null => Type::Null,
            Self::Boolean(_) => Type::Boolean,
            Self::Number(_) => Type::Number,
            Self::String(_) => Type::String,
            Self::Array(_) => Type::Array,
            Self::Object(_) => Type::Object,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, Self::Boolean(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    fn mismatch(&self, expected: Type) -> TypeError {
        TypeError::new(expected, self.kind())
    }

    pub fn as_boolean(&self) -> Result<bool, TypeError> {
        match self {
            Self::Boolean(b) => Ok(*b),
            _ => Err(self.mismatch(Type::Boolean)),
        }
    }

    pub fn as_boolean_mut(&mut self) -> Result<&mut bool, TypeError> {
        match self {
            Self::Boolean(b) => Ok(b),
            _ => Err(self.mismatch(Type::Boolean)),
        }
    }

    pub fn as_number(&self) -> Result<f64, TypeError> {
        match self {
            Self::Number(num) => Ok(*num),
            _ => Err(self.mismatch(Type::Number)),
        }
    }

    pub fn as_number_mut(&mut self) -> Result<&mut f64, TypeError> {
        match self {
            Self::Number(num) => Ok(num),
            _ => Err(self.mismatch(Type::Number)),
        }
    }

    pub fn as_string(&self) -> Result<&str, TypeError> {
        match self {
            Self::String(str) => Ok(str),
            _ => Err(self.mismatch(Type::String)),
        }
    }

    pub fn as_string_mut(&mut self) -> Result<&mut String, TypeError> {
        match self {
            Self::String(str) => Ok(str),
            _ => Err(self.mismatch(Type::String)),
        }
    }

    pub fn as_array(&self) -> Result<&[Value], TypeError> {
        match self {
            Self::Array(array) => Ok(array),
            _ => Err(self.mismatch(Type::Array)),
        }
    }

    pub fn as_array_mut(&mut self) -> Result<&mut Vec<Value>, TypeError> {
        match self {
            Self::Array(array) => Ok(array),
            _ => Err(self.mismatch(Type::Array)),
        }
    }

    pub fn as_object(&self) -> Result<&HashMap<String, Value>, TypeError> {
        match self {
            Self::Object(obj) => Ok(obj),
            _ => Err(self.mismatch(Type::Object)),
        }
    }

    pub fn as_object_mut(&mut self) -> Result<&mut HashMap<String, Value>, TypeError> {
        match self {
            Self::Object(obj) => Ok(obj),
            _ => Err(self.mismatch(Type::Object)),
        }
    }

    pub fn try_boolean(&self) -> Option<bool> {
        self.as_boolean().ok()
    }

    pub fn try_number(&self) -> Option<f64> {
        self.as_number().ok()
    }

    pub fn try_string(&self) -> Option<&str> {
        self.as_string().ok()
    }

    pub fn try_array(&self) -> Option<&[Value]> {
        self.as_array().ok()
    }

    pub fn try_object(&self) -> Option<&HashMap<String, Value>> {
        self.as_object().ok()
    }

    /// Number of children for arrays and objects, `None` for scalars.
    pub fn len(&self) -> Option<usize> {
        match self {
            Self::Array(array) => Some(array.len()),
            Self::Object(obj) => Some(obj.len()),
            _ => None,
        }
    }

    /// True only for an array or object without children.
    pub fn is_empty(&self) -> bool {
        self.len() == Some(0)
    }

    /// Element at `index`. Fails on anything but an array holding that index.
    pub fn at(&self, index: usize) -> Result<&Value, AccessError> {
        match self {
            Self::Array(array) => array.get(index).ok_or_else(AccessError::out_of_bounds),
            other => Err(AccessError::not_indexable(other.kind())),
        }
    }

    pub fn at_mut(&mut self, index: usize) -> Result<&mut Value, AccessError> {
        match self {
            Self::Array(array) => array.get_mut(index).ok_or_else(AccessError::out_of_bounds),
            other => Err(AccessError::not_indexable(other.kind())),
        }
    }

    /// Read-only key lookup. Never inserts.
    pub fn get(&self, key: &str) -> Result<&Value, Error> {
        self.as_object()?
            .get(key)
            .ok_or_else(|| AccessError::missing_key(key).into())
    }

    /// Mutable key lookup on an existing object. Never inserts.
    pub fn get_mut(&mut self, key: &str) -> Result<&mut Value, Error> {
        self.as_object_mut()?
            .get_mut(key)
            .ok_or_else(|| AccessError::missing_key(key).into())
    }

    /// Mutable key lookup that creates what is missing.
    ///
    /// A `Null` receiver is first turned into an empty object, then an absent
    /// key is inserted as `Null`. Any other non-object receiver is a type error.
    pub fn get_or_insert(&mut self, key: &str) -> Result<&mut Value, TypeError> {
        if self.is_null() {
            *self = Self::Object(HashMap::new());
        }

        Ok(self.as_object_mut()?.entry(key.to_owned()).or_default())
    }

    /// Moves the content out, leaving `Null` behind.
    pub fn take(&mut self) -> Value {
        mem::take(self)
    }

    pub fn replace(&mut self, value: Value) -> Value {
        mem::replace(self, value)
    }

    /// Compact text rendering. Strings are quoted but not escaped.
    pub fn stringify(&self) -> String {
        self.to_string()
    }
}

fn write_number(f: &mut std::fmt::Formatter<'_>, num: f64) -> std::fmt::Result {
    let fixed = format!("{:.10}", num);

    if !fixed.contains('.') {
        return f.write_str(&fixed);
    }

    let trimmed = fixed.trim_end_matches('0');
    f.write_str(trimmed.strip_suffix('.').unwrap_or(trimmed))
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Boolean(bool) => write!(f, "{}", bool),
            Self::Number(num) => write_number(f, *num),
            Self::String(str) => write!(f, "\"{}\"", str),
            Self::Array(array) => {
                f.write_str("[")?;
                for (i, value) in array.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", value)?;
                }
                f.write_str("]")
            }
            Self::Object(obj) => {
                f.write_str("{")?;
                for (i, (key, value)) in obj.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "\"{}\": {}", key, value)?;
                }
                f.write_str("}")
            }
        }
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Self::Null
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

macro_rules! from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Self::Number(value as f64)
                }
            }
        )*
    };
}

from_number!(i8, i16, i32, i64, u8, u16, u32, u64);

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Self::Array(value)
    }
}

impl From<HashMap<String, Value>> for Value {
    fn from(value: HashMap<String, Value>) -> Self {
        Self::Object(value)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<T: IntoIterator<Item = Value>>(iter: T) -> Self {
        Self::Array(iter.into_iter().collect())
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Value {
    fn from_iter<T: IntoIterator<Item = (K, Value)>>(iter: T) -> Self {
        Self::object(iter)
    }
}
