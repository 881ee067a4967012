//! The tagged value type.
//!
//! [`Value`] holds exactly one of the runtime's data kinds. Scalars, text and
//! vectors are stored inline and copied on clone; arrays, maps and objects
//! are shared handles, so cloning a value aliases their payload while
//! [`Value::copy`] with `deep = true` produces an independent graph.

use std::fmt;
use std::hash::Hasher;

use rustc_hash::FxHasher;

use crate::{Array, Map, ObjectRef, Text, Vec2f, Vec2i, Vec3f, Vec3i, VarError, VarResult};

/// The tag of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// `null`
    Null,
    /// `bool`
    Bool,
    /// 64-bit signed integer
    Int,
    /// 64-bit float
    Float,
    /// Text
    String,
    /// Float 2D vector
    Vec2f,
    /// Integer 2D vector
    Vec2i,
    /// Float 3D vector
    Vec3f,
    /// Integer 3D vector
    Vec3i,
    /// Shared sequence
    Array,
    /// Shared associative container
    Map,
    /// Native class instance
    Object,
}

impl ValueType {
    /// The type's display name
    pub fn name(self) -> &'static str {
        match self {
            ValueType::Null => "null",
            ValueType::Bool => "bool",
            ValueType::Int => "int",
            ValueType::Float => "float",
            ValueType::String => "String",
            ValueType::Vec2f => "Vec2f",
            ValueType::Vec2i => "Vec2i",
            ValueType::Vec3f => "Vec3f",
            ValueType::Vec3i => "Vec3i",
            ValueType::Array => "Array",
            ValueType::Map => "Map",
            ValueType::Object => "Object",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A runtime value.
///
/// # Examples
///
/// ```
/// use var_core::{Array, Value, ValueType};
///
/// let list = Value::from(Array::new());
/// let alias = list.clone();
/// alias.as_array().unwrap().push(1);
/// assert_eq!(list.as_array().unwrap().size(), 1);
///
/// assert_eq!(Value::from(3).add(&Value::from(4.5)).unwrap(), Value::from(7.5));
/// assert_ne!(Value::from(5), Value::from("5"));
/// assert_eq!(Value::from("ab").type_of(), ValueType::String);
/// ```
#[derive(Clone, Default)]
pub enum Value {
    /// `null`
    #[default]
    Null,
    /// Boolean
    Bool(bool),
    /// 64-bit signed integer
    Int(i64),
    /// 64-bit float
    Float(f64),
    /// Text
    String(Text),
    /// Float 2D vector
    Vec2f(Vec2f),
    /// Integer 2D vector
    Vec2i(Vec2i),
    /// Float 3D vector
    Vec3f(Vec3f),
    /// Integer 3D vector
    Vec3i(Vec3i),
    /// Shared sequence
    Array(Array),
    /// Shared associative container
    Map(Map),
    /// Native class instance
    Object(ObjectRef),
}

fn hash_number(state: &mut FxHasher, f: f64) {
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        state.write_i64(f as i64);
    } else if f.is_nan() {
        state.write_u64(f64::NAN.to_bits());
    } else {
        state.write_u64(f.to_bits());
    }
}

pub(crate) fn fmt_float(f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    let mut buffer = ryu::Buffer::new();
    f.write_str(buffer.format(value))
}

impl Value {
    /// The active tag
    pub fn type_of(&self) -> ValueType {
        match self {
            Value::Null => ValueType::Null,
            Value::Bool(_) => ValueType::Bool,
            Value::Int(_) => ValueType::Int,
            Value::Float(_) => ValueType::Float,
            Value::String(_) => ValueType::String,
            Value::Vec2f(_) => ValueType::Vec2f,
            Value::Vec2i(_) => ValueType::Vec2i,
            Value::Vec3f(_) => ValueType::Vec3f,
            Value::Vec3i(_) => ValueType::Vec3i,
            Value::Array(_) => ValueType::Array,
            Value::Map(_) => ValueType::Map,
            Value::Object(_) => ValueType::Object,
        }
    }

    /// The tag name, or the class name for objects
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Object(o) => o.class_name(),
            other => other.type_of().name(),
        }
    }

    /// Whether the value is `null`
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Whether the value is a bool, int or float
    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Bool(_) | Value::Int(_) | Value::Float(_))
    }

    fn cast_error(&self, expected: ValueType) -> VarError {
        VarError::type_error(format!(
            "expected type \"{}\", got \"{}\".",
            expected.name(),
            self.type_name()
        ))
    }

    /// Truthiness; never fails
    pub fn truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(i) => *i != 0,
            Value::Float(f) => *f != 0.0,
            Value::String(t) => !t.is_empty(),
            Value::Vec2f(v) => !v.is_zero(),
            Value::Vec2i(v) => !v.is_zero(),
            Value::Vec3f(v) => !v.is_zero(),
            Value::Vec3i(v) => !v.is_zero(),
            Value::Array(a) => !a.is_empty(),
            Value::Map(m) => !m.is_empty(),
            Value::Object(_) => true,
        }
    }

    /// Strict bool cast
    pub fn as_bool(&self) -> VarResult<bool> {
        match self {
            Value::Bool(b) => Ok(*b),
            _ => Err(self.cast_error(ValueType::Bool)),
        }
    }

    /// Int cast; bool widens
    pub fn as_int(&self) -> VarResult<i64> {
        match self {
            Value::Bool(b) => Ok(i64::from(*b)),
            Value::Int(i) => Ok(*i),
            _ => Err(self.cast_error(ValueType::Int)),
        }
    }

    /// Float cast; bool and int widen
    pub fn as_float(&self) -> VarResult<f64> {
        match self {
            Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
            Value::Int(i) => Ok(*i as f64),
            Value::Float(f) => Ok(*f),
            _ => Err(self.cast_error(ValueType::Float)),
        }
    }

    /// Borrow the text payload
    pub fn as_text(&self) -> VarResult<&Text> {
        match self {
            Value::String(t) => Ok(t),
            _ => Err(self.cast_error(ValueType::String)),
        }
    }

    /// Borrow the text payload as `&str`
    pub fn as_str(&self) -> VarResult<&str> {
        self.as_text().map(Text::as_str)
    }

    /// A handle aliasing the array payload
    pub fn as_array(&self) -> VarResult<Array> {
        match self {
            Value::Array(a) => Ok(a.clone()),
            _ => Err(self.cast_error(ValueType::Array)),
        }
    }

    /// A handle aliasing the map payload
    pub fn as_map(&self) -> VarResult<Map> {
        match self {
            Value::Map(m) => Ok(m.clone()),
            _ => Err(self.cast_error(ValueType::Map)),
        }
    }

    /// A handle to the object
    pub fn as_object(&self) -> VarResult<ObjectRef> {
        match self {
            Value::Object(o) => Ok(o.clone()),
            _ => Err(self.cast_error(ValueType::Object)),
        }
    }

    /// Float 2D vector cast; an integer vector widens
    pub fn as_vec2f(&self) -> VarResult<Vec2f> {
        match self {
            Value::Vec2f(v) => Ok(*v),
            Value::Vec2i(v) => v.cast(),
            _ => Err(self.cast_error(ValueType::Vec2f)),
        }
    }

    /// Strict integer 2D vector cast
    pub fn as_vec2i(&self) -> VarResult<Vec2i> {
        match self {
            Value::Vec2i(v) => Ok(*v),
            _ => Err(self.cast_error(ValueType::Vec2i)),
        }
    }

    /// Float 3D vector cast; an integer vector widens
    pub fn as_vec3f(&self) -> VarResult<Vec3f> {
        match self {
            Value::Vec3f(v) => Ok(*v),
            Value::Vec3i(v) => v.cast(),
            _ => Err(self.cast_error(ValueType::Vec3f)),
        }
    }

    /// Strict integer 3D vector cast
    pub fn as_vec3i(&self) -> VarResult<Vec3i> {
        match self {
            Value::Vec3i(v) => Ok(*v),
            _ => Err(self.cast_error(ValueType::Vec3i)),
        }
    }

    /// 64-bit hash for map keys.
    ///
    /// Numerically equal bools, ints and floats hash alike. Arrays and maps
    /// are not hashable.
    pub fn hash(&self) -> VarResult<u64> {
        let mut state = FxHasher::default();
        match self {
            Value::Null => state.write_u8(0),
            Value::Bool(b) => state.write_i64(i64::from(*b)),
            Value::Int(i) => state.write_i64(*i),
            Value::Float(f) => hash_number(&mut state, *f),
            Value::String(t) => return Ok(t.hash_code()),
            Value::Vec2f(v) => {
                hash_number(&mut state, v.x);
                hash_number(&mut state, v.y);
            }
            Value::Vec2i(v) => {
                state.write_i64(v.x);
                state.write_i64(v.y);
            }
            Value::Vec3f(v) => {
                hash_number(&mut state, v.x);
                hash_number(&mut state, v.y);
                hash_number(&mut state, v.z);
            }
            Value::Vec3i(v) => {
                state.write_i64(v.x);
                state.write_i64(v.y);
                state.write_i64(v.z);
            }
            Value::Object(o) => return o.hash(),
            Value::Array(_) | Value::Map(_) => {
                return Err(VarError::type_error(format!(
                    "unhashable type \"{}\".",
                    self.type_name()
                )))
            }
        }
        Ok(state.finish())
    }

    /// Copy the value. A shallow copy aliases arrays, maps and objects; a
    /// deep copy clones them recursively.
    pub fn copy(&self, deep: bool) -> VarResult<Value> {
        if !deep {
            return Ok(self.clone());
        }
        Ok(match self {
            Value::Array(a) => Value::Array(a.copy(true)?),
            Value::Map(m) => Value::Map(m.copy(true)?),
            Value::Object(o) => Value::Object(o.copy(true)?),
            other => other.clone(),
        })
    }

    /// Display as an element of a container: text is quoted.
    pub fn fmt_nested(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(t) => write!(f, "{:?}", t.as_str()),
            other => fmt::Display::fmt(other, f),
        }
    }

    /// The `[]` read operation
    pub fn get_index(&self, key: &Value) -> VarResult<Value> {
        match self {
            Value::String(t) => Ok(Value::from(t.char_at(key.as_int()?)?)),
            Value::Array(a) => a.at(key.as_int()?),
            Value::Map(m) => m.get_or_insert(key),
            Value::Vec2f(v) => Ok(Value::Float(v.get(key.as_int()?)?)),
            Value::Vec2i(v) => Ok(Value::Int(v.get(key.as_int()?)?)),
            Value::Vec3f(v) => Ok(Value::Float(v.get(key.as_int()?)?)),
            Value::Vec3i(v) => Ok(Value::Int(v.get(key.as_int()?)?)),
            Value::Object(o) => o.get_index(key),
            _ => Err(VarError::type_error(format!(
                "type \"{}\" is not subscriptable.",
                self.type_name()
            ))),
        }
    }

    /// The `[]` write operation
    pub fn set_index(&mut self, key: &Value, value: Value) -> VarResult<()> {
        match self {
            Value::String(t) => {
                let replacement = value.as_text()?;
                let mut chars = replacement.as_str().chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => t.set_char(key.as_int()?, c),
                    _ => Err(VarError::value_error(
                        "expected a single character text.",
                    )),
                }
            }
            Value::Array(a) => a.set(key.as_int()?, value),
            Value::Map(m) => m.insert(key.clone(), value).map(|_| ()),
            Value::Vec2f(v) => v.set(key.as_int()?, value.as_float()?),
            Value::Vec2i(v) => v.set(key.as_int()?, value.as_int()?),
            Value::Vec3f(v) => v.set(key.as_int()?, value.as_float()?),
            Value::Vec3i(v) => v.set(key.as_int()?, value.as_int()?),
            Value::Object(o) => o.set_index(key, value),
            _ => Err(VarError::type_error(format!(
                "type \"{}\" does not support item assignment.",
                self.type_name()
            ))),
        }
    }

    fn no_member(&self, name: &str) -> VarError {
        VarError::attribute_error(format!(
            "type {} has no member named \"{}\".",
            self.type_name(),
            name
        ))
    }

    fn component(&self, name: &str) -> Option<i64> {
        let dim = match self {
            Value::Vec2f(_) | Value::Vec2i(_) => 2,
            Value::Vec3f(_) | Value::Vec3i(_) => 3,
            _ => return None,
        };
        let index = match name {
            "x" => 0,
            "y" => 1,
            "z" => 2,
            _ => return None,
        };
        (index < dim).then_some(index)
    }

    /// Member read: vector components, or the object's `get_member`
    pub fn get_member(&self, name: &str) -> VarResult<Value> {
        if let Value::Object(o) = self {
            return o.get_member(name);
        }
        match self.component(name) {
            Some(index) => self.get_index(&Value::Int(index)),
            None => Err(self.no_member(name)),
        }
    }

    /// Member write: vector components, or the object's `set_member`
    pub fn set_member(&mut self, name: &str, value: Value) -> VarResult<()> {
        if let Value::Object(o) = self {
            return o.set_member(name, value);
        }
        match self.component(name) {
            Some(index) => self.set_index(&Value::Int(index), value),
            None => Err(self.no_member(name)),
        }
    }

    /// `self(args)`; only objects are callable
    pub fn call(&self, args: &[Value]) -> VarResult<Value> {
        match self {
            Value::Object(o) => o.call(args),
            _ => Err(VarError::type_error(format!(
                "type \"{}\" is not callable.",
                self.type_name()
            ))),
        }
    }
}

impl PartialEq for Value {
    /// Never fails: values of unrelated families are unequal.
    fn eq(&self, other: &Self) -> bool {
        use Value::*;
        match (self, other) {
            (Null, Null) => true,
            (Bool(_) | Int(_), Bool(_) | Int(_)) => self.as_int().ok() == other.as_int().ok(),
            (Bool(_) | Int(_) | Float(_), Bool(_) | Int(_) | Float(_)) => {
                self.as_float().ok() == other.as_float().ok()
            }
            (String(a), String(b)) => a == b,
            (Vec2i(a), Vec2i(b)) => a == b,
            (Vec2f(_) | Vec2i(_), Vec2f(_) | Vec2i(_)) => {
                self.as_vec2f().ok() == other.as_vec2f().ok()
            }
            (Vec3i(a), Vec3i(b)) => a == b,
            (Vec3f(_) | Vec3i(_), Vec3f(_) | Vec3i(_)) => {
                self.as_vec3f().ok() == other.as_vec3f().ok()
            }
            (Array(a), Array(b)) => a == b,
            (Map(a), Map(b)) => a == b,
            (Object(o), _) => o.equals(other),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => fmt_float(f, *x),
            Value::String(t) => f.write_str(t.as_str()),
            Value::Vec2f(v) => {
                f.write_str("(")?;
                fmt_float(f, v.x)?;
                f.write_str(", ")?;
                fmt_float(f, v.y)?;
                f.write_str(")")
            }
            Value::Vec3f(v) => {
                f.write_str("(")?;
                fmt_float(f, v.x)?;
                f.write_str(", ")?;
                fmt_float(f, v.y)?;
                f.write_str(", ")?;
                fmt_float(f, v.z)?;
                f.write_str(")")
            }
            Value::Vec2i(v) => write!(f, "{}", v),
            Value::Vec3i(v) => write!(f, "{}", v),
            Value::Array(a) => write!(f, "{}", a),
            Value::Map(m) => write!(f, "{}", m),
            Value::Object(o) => f.write_str(&o.to_text()),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Value::Int(i) => f.debug_tuple("Int").field(i).finish(),
            Value::Float(x) => f.debug_tuple("Float").field(x).finish(),
            Value::String(t) => f.debug_tuple("String").field(&t.as_str()).finish(),
            Value::Vec2f(v) => f.debug_tuple("Vec2f").field(v).finish(),
            Value::Vec2i(v) => f.debug_tuple("Vec2i").field(v).finish(),
            Value::Vec3f(v) => f.debug_tuple("Vec3f").field(v).finish(),
            Value::Vec3i(v) => f.debug_tuple("Vec3i").field(v).finish(),
            Value::Array(a) => f.debug_tuple("Array").field(a).finish(),
            Value::Map(m) => f.debug_tuple("Map").field(m).finish(),
            Value::Object(o) => write!(f, "Object({})", o.to_text()),
        }
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<usize> for Value {
    fn from(i: usize) -> Self {
        Value::Int(i as i64)
    }
}

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Value::Float(f64::from(f))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::String(Text::from(c))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(Text::from(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(Text::from(s))
    }
}

impl From<Text> for Value {
    fn from(t: Text) -> Self {
        Value::String(t)
    }
}

impl From<Array> for Value {
    fn from(a: Array) -> Self {
        Value::Array(a)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(Array::from(items))
    }
}

impl From<Map> for Value {
    fn from(m: Map) -> Self {
        Value::Map(m)
    }
}

impl From<ObjectRef> for Value {
    fn from(o: ObjectRef) -> Self {
        Value::Object(o)
    }
}

impl From<Vec2f> for Value {
    fn from(v: Vec2f) -> Self {
        Value::Vec2f(v)
    }
}

impl From<Vec2i> for Value {
    fn from(v: Vec2i) -> Self {
        Value::Vec2i(v)
    }
}

impl From<Vec3f> for Value {
    fn from(v: Vec3f) -> Self {
        Value::Vec3f(v)
    }
}

impl From<Vec3i> for Value {
    fn from(v: Vec3i) -> Self {
        Value::Vec3i(v)
    }
}
