//! Member access and calls that consult the class registry.
//!
//! For an object whose class is registered, the binding is looked up on the
//! class and its ancestors first; when no class in the chain binds the name
//! the object's own capability is used. Non-object values keep their
//! built-in semantics.

use std::rc::Rc;

use var_core::{Object, ObjectRef, Value, VarError, VarResult};

use crate::bind::Binding;
use crate::registry::ClassRegistry;

/// A method or static function read as a value; calling it invokes the
/// binding.
pub struct BoundMethod {
    binding: Rc<Binding>,
    instance: Option<ObjectRef>,
}

impl BoundMethod {
    /// `binding` bound to `instance` (required for instance methods)
    pub fn new(binding: Rc<Binding>, instance: Option<ObjectRef>) -> Self {
        BoundMethod { binding, instance }
    }
}

impl Object for BoundMethod {
    fn class_name(&self) -> &'static str {
        "BoundMethod"
    }

    fn to_text(&self) -> String {
        format!(
            "[BoundMethod:{}.{}]",
            self.binding.class_name(),
            self.binding.name()
        )
    }

    fn call(&self, args: &[Value]) -> VarResult<Value> {
        invoke(&self.binding, self.instance.as_ref(), args)
    }
}

fn invoke(binding: &Binding, instance: Option<&ObjectRef>, args: &[Value]) -> VarResult<Value> {
    match (binding, instance) {
        (Binding::Method(method), Some(instance)) => method.call(instance, args),
        (Binding::Method(_), None) => Err(VarError::type_error(format!(
            "method {}.{}() needs an instance.",
            binding.class_name(),
            binding.name()
        ))),
        (Binding::StaticFunc(func), _) => func.call(args),
        (Binding::Member(member), Some(instance)) => member.get(instance)?.call(args),
        _ => match binding.static_value() {
            Some(value) => value.call(args),
            None => Err(VarError::type_error(format!(
                "attribute {}.{} is not callable without an instance.",
                binding.class_name(),
                binding.name()
            ))),
        },
    }
}

fn lookup(registry: &ClassRegistry, object: &ObjectRef, name: &str) -> VarResult<Option<Rc<Binding>>> {
    let class_name = object.class_name();
    if !registry.is_registered(class_name) {
        return Ok(None);
    }
    registry.find(class_name, name)
}

/// `value.name(args)`
pub fn call_method(
    registry: &ClassRegistry,
    value: &Value,
    name: &str,
    args: &[Value],
) -> VarResult<Value> {
    let Value::Object(object) = value else {
        return value.call_method(name, args);
    };
    match lookup(registry, object, name)? {
        Some(binding) => invoke(&binding, Some(object), args),
        None => object.call_method(name, args),
    }
}

/// `value.name`
pub fn get_member(registry: &ClassRegistry, value: &Value, name: &str) -> VarResult<Value> {
    let Value::Object(object) = value else {
        return value.get_member(name);
    };
    let Some(binding) = lookup(registry, object, name)? else {
        return object.get_member(name);
    };
    match binding.as_ref() {
        Binding::Member(member) => member.get(object),
        Binding::Method(_) | Binding::StaticFunc(_) => {
            let bound: ObjectRef = Rc::new(BoundMethod::new(binding.clone(), Some(object.clone())));
            Ok(Value::Object(bound))
        }
        other => other.static_value().ok_or_else(|| {
            VarError::attribute_error(format!(
                "attribute {}.{} can't be read.",
                other.class_name(),
                other.name()
            ))
        }),
    }
}

/// `value.name = new_value`
pub fn set_member(
    registry: &ClassRegistry,
    value: &mut Value,
    name: &str,
    new_value: Value,
) -> VarResult<()> {
    let object = match &*value {
        Value::Object(object) => object.clone(),
        _ => return value.set_member(name, new_value),
    };
    let Some(binding) = lookup(registry, &object, name)? else {
        return object.set_member(name, new_value);
    };
    match binding.as_ref() {
        Binding::Member(member) => member.set(&object, new_value),
        Binding::Method(_) | Binding::StaticFunc(_) => Err(VarError::attribute_error(format!(
            "can't assign to method {}.{}.",
            binding.class_name(),
            binding.name()
        ))),
        other => other.set_static_value(new_value),
    }
}

/// `Class.name(args)`
pub fn call_static(
    registry: &ClassRegistry,
    class_name: &str,
    name: &str,
    args: &[Value],
) -> VarResult<Value> {
    let binding = registry.resolve(class_name, name)?;
    invoke(&binding, None, args)
}

/// `Class.name`
pub fn get_static(registry: &ClassRegistry, class_name: &str, name: &str) -> VarResult<Value> {
    let binding = registry.resolve(class_name, name)?;
    match binding.as_ref() {
        Binding::StaticFunc(_) => {
            let bound: ObjectRef = Rc::new(BoundMethod::new(binding.clone(), None));
            Ok(Value::Object(bound))
        }
        other => other.static_value().ok_or_else(|| {
            VarError::attribute_error(format!(
                "attribute {}.{} needs an instance.",
                other.class_name(),
                other.name()
            ))
        }),
    }
}

/// `Class.name = value`
pub fn set_static(
    registry: &ClassRegistry,
    class_name: &str,
    name: &str,
    value: Value,
) -> VarResult<()> {
    registry.resolve(class_name, name)?.set_static_value(value)
}
