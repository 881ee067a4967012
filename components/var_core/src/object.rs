//! Capability-based base for native class instances.
//!
//! A native class implements [`Object`] and overrides the capabilities it
//! supports. Anything left at its default reports `NotImplemented` naming
//! the capability and the class, so a missing override is always visible
//! to the caller instead of silently producing a value.
//!
//! Instances are shared through [`ObjectRef`]; state that changes after
//! construction lives behind interior mutability in the implementing type.

use std::any::Any;
use std::rc::Rc;

use crate::{Value, VarError, VarResult};

/// Shared handle to a native class instance
pub type ObjectRef = Rc<dyn Object>;

/// Access to the concrete type behind a `dyn Object`.
pub trait AsAny: Any {
    /// `self` as `&dyn Any`
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// The capability set of a native class instance.
///
/// # Examples
///
/// ```
/// use std::rc::Rc;
/// use var_core::{Object, ObjectRef, Value, VarResult};
///
/// struct Meters(f64);
///
/// impl Object for Meters {
///     fn class_name(&self) -> &'static str {
///         "Meters"
///     }
///
///     fn add(&self, other: &Value) -> VarResult<Value> {
///         Ok(Value::from(self.0 + other.as_float()?))
///     }
/// }
///
/// let m: ObjectRef = Rc::new(Meters(1.5));
/// let sum = Value::from(m).add(&Value::from(2)).unwrap();
/// assert_eq!(sum, Value::from(3.5));
/// ```
#[allow(unused_variables)]
pub trait Object: AsAny {
    /// Name of the most-derived class
    fn class_name(&self) -> &'static str;

    /// Name of the parent class, empty for a root class
    fn parent_class_name(&self) -> &'static str {
        ""
    }

    /// The embedded parent-class instance, for classes built by composition
    fn base(&self) -> Option<&dyn Object> {
        None
    }

    /// Display string
    fn to_text(&self) -> String {
        format!("[{}:{:p}]", self.class_name(), self as *const Self as *const ())
    }

    /// Equality; identity unless overridden. Never equal to a non-object.
    fn equals(&self, other: &Value) -> bool {
        match other {
            Value::Object(o) => std::ptr::addr_eq(self as *const Self, Rc::as_ptr(o)),
            _ => false,
        }
    }

    /// `self < other`
    fn less_than(&self, other: &Value) -> VarResult<bool> {
        Err(VarError::not_implemented("__lt()", self.class_name()))
    }

    /// `self > other`
    fn greater_than(&self, other: &Value) -> VarResult<bool> {
        Err(VarError::not_implemented("__gt()", self.class_name()))
    }

    /// `self + other`
    fn add(&self, other: &Value) -> VarResult<Value> {
        Err(VarError::not_implemented("__add()", self.class_name()))
    }

    /// `self - other`
    fn sub(&self, other: &Value) -> VarResult<Value> {
        Err(VarError::not_implemented("__sub()", self.class_name()))
    }

    /// `self * other`
    fn mul(&self, other: &Value) -> VarResult<Value> {
        Err(VarError::not_implemented("__mul()", self.class_name()))
    }

    /// `self / other`
    fn div(&self, other: &Value) -> VarResult<Value> {
        Err(VarError::not_implemented("__div()", self.class_name()))
    }

    /// `self % other`
    fn rem(&self, other: &Value) -> VarResult<Value> {
        Err(VarError::not_implemented("__mod()", self.class_name()))
    }

    /// `self(args)`
    fn call(&self, args: &[Value]) -> VarResult<Value> {
        Err(VarError::not_implemented("__call()", self.class_name()))
    }

    /// The class' own method dispatch, used when no binding matches
    fn call_method(&self, name: &str, args: &[Value]) -> VarResult<Value> {
        Err(VarError::attribute_error(format!(
            "type {} has no method named \"{}\".",
            self.class_name(),
            name
        )))
    }

    /// `self.name`
    fn get_member(&self, name: &str) -> VarResult<Value> {
        Err(VarError::attribute_error(format!(
            "type {} has no member named \"{}\".",
            self.class_name(),
            name
        )))
    }

    /// `self.name = value`
    fn set_member(&self, name: &str, value: Value) -> VarResult<()> {
        Err(VarError::attribute_error(format!(
            "type {} has no writable member named \"{}\".",
            self.class_name(),
            name
        )))
    }

    /// `self[key]`
    fn get_index(&self, key: &Value) -> VarResult<Value> {
        Err(VarError::not_implemented("__get_mapped()", self.class_name()))
    }

    /// `self[key] = value`
    fn set_index(&self, key: &Value, value: Value) -> VarResult<()> {
        Err(VarError::not_implemented("__set_mapped()", self.class_name()))
    }

    /// Start iterating; returns the iterator value
    fn iter_begin(&self) -> VarResult<Value> {
        Err(VarError::not_implemented("__iter_begin()", self.class_name()))
    }

    /// Whether the iterator has another element
    fn iter_has_next(&self) -> VarResult<bool> {
        Err(VarError::not_implemented("__iter_has_next()", self.class_name()))
    }

    /// Advance the iterator
    fn iter_next(&self) -> VarResult<Value> {
        Err(VarError::not_implemented("__iter_next()", self.class_name()))
    }

    /// 64-bit hash, for use as a map key
    fn hash(&self) -> VarResult<u64> {
        Err(VarError::not_implemented("__hash()", self.class_name()))
    }

    /// A copy of the instance
    fn copy(&self, deep: bool) -> VarResult<ObjectRef> {
        Err(VarError::not_implemented("copy()", self.class_name()))
    }
}

impl dyn Object {
    /// The instance as `T`, following [`Object::base`] links.
    pub fn downcast_ref<T: Object>(&self) -> Option<&T> {
        let mut current: &dyn Object = self;
        loop {
            if let Some(found) = current.as_any().downcast_ref::<T>() {
                return Some(found);
            }
            current = current.base()?;
        }
    }

    /// Whether the instance is (or embeds) a `T`
    pub fn is<T: Object>(&self) -> bool {
        self.downcast_ref::<T>().is_some()
    }
}
