//! Binding entries stored in the class registry.
//!
//! A binding pairs reflection metadata with the native callable or storage
//! behind it. Method-shaped bindings validate their arguments before the
//! native code runs; property-shaped bindings type-check writes and reject
//! them for constants and enum values.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use var_core::{ObjectRef, Value, VarError, VarResult};

use crate::enum_object::EnumObject;
use crate::type_info::{
    EnumInfo, EnumValueInfo, MemberInfo, MemberKind, MethodInfo, PropertyInfo, TypeInfo,
};

/// Native code behind an instance method; receives the instance and the
/// validated arguments.
pub type MethodFn = Rc<dyn Fn(&ObjectRef, &[Value]) -> VarResult<Value>>;
/// Native code behind a static function.
pub type StaticFn = Rc<dyn Fn(&[Value]) -> VarResult<Value>>;
/// Reads a data member of an instance.
pub type GetterFn = Rc<dyn Fn(&ObjectRef) -> VarResult<Value>>;
/// Writes a data member of an instance.
pub type SetterFn = Rc<dyn Fn(&ObjectRef, Value) -> VarResult<()>>;

fn check_write(info: &PropertyInfo, class_name: &str, value: &Value) -> VarResult<()> {
    if info.is_const {
        return Err(VarError::type_error(format!(
            "can't assign to constant {}.{}.",
            class_name, info.name
        )));
    }
    if !info.datatype.accepts(value) {
        return Err(VarError::type_error(format!(
            "expected type \"{}\" for {}.{}, got \"{}\".",
            info.datatype,
            class_name,
            info.name,
            value.type_name()
        )));
    }
    Ok(())
}

/// An instance method.
pub struct MethodBind {
    class_name: String,
    info: Rc<MethodInfo>,
    func: MethodFn,
}

impl MethodBind {
    /// Bind `func` as method `info.name` of `class_name`
    pub fn new(
        class_name: impl Into<String>,
        info: MethodInfo,
        func: impl Fn(&ObjectRef, &[Value]) -> VarResult<Value> + 'static,
    ) -> Self {
        MethodBind {
            class_name: class_name.into(),
            info: Rc::new(MethodInfo {
                is_static: false,
                ..info
            }),
            func: Rc::new(func),
        }
    }

    /// The signature
    pub fn info(&self) -> &MethodInfo {
        &self.info
    }

    /// Validate `args`, fill defaults and invoke on `instance`
    pub fn call(&self, instance: &ObjectRef, args: &[Value]) -> VarResult<Value> {
        let args = self.info.prepare_args(args)?;
        (self.func)(instance, &args)
    }
}

/// A static function. A static function named like its class is the
/// class' initializer.
pub struct StaticFuncBind {
    class_name: String,
    info: Rc<MethodInfo>,
    func: StaticFn,
}

impl StaticFuncBind {
    /// Bind `func` as static function `info.name` of `class_name`
    pub fn new(
        class_name: impl Into<String>,
        info: MethodInfo,
        func: impl Fn(&[Value]) -> VarResult<Value> + 'static,
    ) -> Self {
        StaticFuncBind {
            class_name: class_name.into(),
            info: Rc::new(MethodInfo {
                is_static: true,
                ..info
            }),
            func: Rc::new(func),
        }
    }

    /// The signature
    pub fn info(&self) -> &MethodInfo {
        &self.info
    }

    /// Validate `args`, fill defaults and invoke
    pub fn call(&self, args: &[Value]) -> VarResult<Value> {
        let args = self.info.prepare_args(args)?;
        (self.func)(&args)
    }
}

/// A data member of instances.
pub struct MemberBind {
    class_name: String,
    info: Rc<PropertyInfo>,
    get: GetterFn,
    set: Option<SetterFn>,
}

impl MemberBind {
    /// A member read through `get` and, when `set` is present, writable
    pub fn new(
        class_name: impl Into<String>,
        name: impl Into<String>,
        datatype: TypeInfo,
        get: GetterFn,
        set: Option<SetterFn>,
    ) -> Self {
        MemberBind {
            class_name: class_name.into(),
            info: Rc::new(PropertyInfo {
                name: name.into(),
                datatype,
                value: Value::Null,
                is_const: false,
                is_static: false,
            }),
            get,
            set,
        }
    }

    /// Read the member of `instance`
    pub fn get(&self, instance: &ObjectRef) -> VarResult<Value> {
        (self.get)(instance)
    }

    /// Type-check and write the member of `instance`
    pub fn set(&self, instance: &ObjectRef, value: Value) -> VarResult<()> {
        let setter = self.set.as_ref().ok_or_else(|| {
            VarError::attribute_error(format!(
                "member {}.{} is read-only.",
                self.class_name, self.info.name
            ))
        })?;
        check_write(&self.info, &self.class_name, &value)?;
        setter(instance, value)
    }
}

/// A variable shared by the class and all its instances.
pub struct StaticVarBind {
    class_name: String,
    info: Rc<PropertyInfo>,
    cell: Rc<RefCell<Value>>,
}

impl StaticVarBind {
    /// A static variable starting at `initial`
    pub fn new(
        class_name: impl Into<String>,
        name: impl Into<String>,
        datatype: TypeInfo,
        initial: Value,
    ) -> Self {
        StaticVarBind {
            class_name: class_name.into(),
            info: Rc::new(PropertyInfo {
                name: name.into(),
                datatype,
                value: initial.clone(),
                is_const: false,
                is_static: true,
            }),
            cell: Rc::new(RefCell::new(initial)),
        }
    }

    /// The current value
    pub fn get(&self) -> Value {
        self.cell.borrow().clone()
    }

    /// Type-check and store `value`
    pub fn set(&self, value: Value) -> VarResult<()> {
        check_write(&self.info, &self.class_name, &value)?;
        *self.cell.borrow_mut() = value;
        Ok(())
    }
}

/// A read-only class constant.
pub struct ConstantBind {
    class_name: String,
    info: Rc<PropertyInfo>,
}

impl ConstantBind {
    /// Constant `name` holding `value`
    pub fn new(class_name: impl Into<String>, name: impl Into<String>, value: Value) -> Self {
        ConstantBind {
            class_name: class_name.into(),
            info: Rc::new(PropertyInfo {
                name: name.into(),
                datatype: value.type_of().into(),
                value,
                is_const: true,
                is_static: true,
            }),
        }
    }

    /// The constant
    pub fn get(&self) -> Value {
        self.info.value.clone()
    }
}

/// An enum table; reads return the shared [`EnumObject`].
pub struct EnumBind {
    class_name: String,
    info: Rc<EnumInfo>,
    runtime: ObjectRef,
}

impl EnumBind {
    /// Enum `name` with `values` in declaration order
    pub fn new<S: Into<String>>(
        class_name: impl Into<String>,
        name: impl Into<String>,
        values: impl IntoIterator<Item = (S, i64)>,
    ) -> Self {
        let name = name.into();
        let values: IndexMap<String, i64> = values
            .into_iter()
            .map(|(key, value)| (key.into(), value))
            .collect();
        let runtime: ObjectRef = Rc::new(EnumObject::new(name.clone(), values.clone()));
        EnumBind {
            class_name: class_name.into(),
            info: Rc::new(EnumInfo { name, values }),
            runtime,
        }
    }

    /// The runtime enum object
    pub fn get(&self) -> Value {
        Value::Object(self.runtime.clone())
    }
}

/// A single named integer on a class.
pub struct EnumValueBind {
    class_name: String,
    info: Rc<EnumValueInfo>,
}

impl EnumValueBind {
    /// Enum value `name` = `value`
    pub fn new(class_name: impl Into<String>, name: impl Into<String>, value: i64) -> Self {
        EnumValueBind {
            class_name: class_name.into(),
            info: Rc::new(EnumValueInfo {
                name: name.into(),
                value,
            }),
        }
    }

    /// The integer
    pub fn get(&self) -> Value {
        Value::Int(self.info.value)
    }
}

/// Any binding entry.
pub enum Binding {
    /// Instance method
    Method(MethodBind),
    /// Static function or initializer
    StaticFunc(StaticFuncBind),
    /// Instance data member
    Member(MemberBind),
    /// Static variable
    StaticVar(StaticVarBind),
    /// Constant
    Constant(ConstantBind),
    /// Enum table
    Enum(EnumBind),
    /// Enum value
    EnumValue(EnumValueBind),
}

impl Binding {
    /// Attribute name
    pub fn name(&self) -> &str {
        match self {
            Binding::Method(b) => &b.info.name,
            Binding::StaticFunc(b) => &b.info.name,
            Binding::Member(b) => &b.info.name,
            Binding::StaticVar(b) => &b.info.name,
            Binding::Constant(b) => &b.info.name,
            Binding::Enum(b) => &b.info.name,
            Binding::EnumValue(b) => &b.info.name,
        }
    }

    /// Class the binding belongs to
    pub fn class_name(&self) -> &str {
        match self {
            Binding::Method(b) => &b.class_name,
            Binding::StaticFunc(b) => &b.class_name,
            Binding::Member(b) => &b.class_name,
            Binding::StaticVar(b) => &b.class_name,
            Binding::Constant(b) => &b.class_name,
            Binding::Enum(b) => &b.class_name,
            Binding::EnumValue(b) => &b.class_name,
        }
    }

    /// Reflection metadata
    pub fn member_info(&self) -> MemberInfo {
        match self {
            Binding::Method(b) => MemberInfo::Method(b.info.clone()),
            Binding::StaticFunc(b) => MemberInfo::Method(b.info.clone()),
            Binding::Member(b) => MemberInfo::Property(b.info.clone()),
            Binding::StaticVar(b) => MemberInfo::Property(b.info.clone()),
            Binding::Constant(b) => MemberInfo::Property(b.info.clone()),
            Binding::Enum(b) => MemberInfo::Enum(b.info.clone()),
            Binding::EnumValue(b) => MemberInfo::EnumValue(b.info.clone()),
        }
    }

    /// Kind of member
    pub fn kind(&self) -> MemberKind {
        match self {
            Binding::Method(_) => MemberKind::Method,
            Binding::StaticFunc(_) => MemberKind::StaticFunction,
            Binding::Member(_) => MemberKind::Property,
            Binding::StaticVar(_) => MemberKind::StaticProperty,
            Binding::Constant(_) => MemberKind::Constant,
            Binding::Enum(_) => MemberKind::Enum,
            Binding::EnumValue(_) => MemberKind::EnumValue,
        }
    }

    /// Signature of method-shaped bindings
    pub fn method_info(&self) -> Option<&MethodInfo> {
        match self {
            Binding::Method(b) => Some(b.info()),
            Binding::StaticFunc(b) => Some(b.info()),
            _ => None,
        }
    }

    /// Value of a class-level property-shaped binding; `None` for methods
    /// and instance members.
    pub fn static_value(&self) -> Option<Value> {
        match self {
            Binding::StaticVar(b) => Some(b.get()),
            Binding::Constant(b) => Some(b.get()),
            Binding::Enum(b) => Some(b.get()),
            Binding::EnumValue(b) => Some(b.get()),
            _ => None,
        }
    }

    /// Write a class-level property. Constants, enums and enum values
    /// reject writes with TypeError.
    pub fn set_static_value(&self, value: Value) -> VarResult<()> {
        match self {
            Binding::StaticVar(b) => b.set(value),
            Binding::Constant(_) | Binding::Enum(_) | Binding::EnumValue(_) => {
                Err(VarError::type_error(format!(
                    "can't assign to {}.{}.",
                    self.class_name(),
                    self.name()
                )))
            }
            _ => Err(VarError::attribute_error(format!(
                "attribute {}.{} is not a static variable.",
                self.class_name(),
                self.name()
            ))),
        }
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("class_name", &self.class_name())
            .field("name", &self.name())
            .field("kind", &self.kind())
            .finish()
    }
}

impl From<MethodBind> for Binding {
    fn from(b: MethodBind) -> Self {
        Binding::Method(b)
    }
}

impl From<StaticFuncBind> for Binding {
    fn from(b: StaticFuncBind) -> Self {
        Binding::StaticFunc(b)
    }
}

impl From<MemberBind> for Binding {
    fn from(b: MemberBind) -> Self {
        Binding::Member(b)
    }
}

impl From<StaticVarBind> for Binding {
    fn from(b: StaticVarBind) -> Self {
        Binding::StaticVar(b)
    }
}

impl From<ConstantBind> for Binding {
    fn from(b: ConstantBind) -> Self {
        Binding::Constant(b)
    }
}

impl From<EnumBind> for Binding {
    fn from(b: EnumBind) -> Self {
        Binding::Enum(b)
    }
}

impl From<EnumValueBind> for Binding {
    fn from(b: EnumValueBind) -> Self {
        Binding::EnumValue(b)
    }
}
