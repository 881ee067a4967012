//! Typed registration of native classes.
//!
//! A host type implements [`NativeClass`] and declares its members in
//! [`NativeClass::bind`] through a [`ClassBuilder`]. The builder wraps the
//! typed closures into bindings that downcast the instance (following
//! composed parents) before calling them.

use std::marker::PhantomData;
use std::rc::Rc;

use var_core::{Object, ObjectRef, Value, ValueType, VarError, VarResult};

use crate::bind::{
    ConstantBind, EnumBind, EnumValueBind, GetterFn, MemberBind, MethodBind, SetterFn,
    StaticFuncBind, StaticVarBind,
};
use crate::registry::ClassRegistry;
use crate::type_info::{MethodInfo, TypeInfo};

/// A Rust type exposed as a runtime class.
///
/// # Examples
///
/// ```
/// use std::cell::Cell;
/// use native_classes::{dispatch, ClassBuilder, ClassRegistry, NativeClass, Signature};
/// use var_core::{Object, Value, ValueType, VarResult};
///
/// #[derive(Default)]
/// struct Counter {
///     count: Cell<i64>,
/// }
///
/// impl Object for Counter {
///     fn class_name(&self) -> &'static str {
///         "Counter"
///     }
/// }
///
/// impl NativeClass for Counter {
///     const NAME: &'static str = "Counter";
///
///     fn new_instance() -> Self {
///         Counter::default()
///     }
///
///     fn bind(class: &mut ClassBuilder<'_, Self>) -> VarResult<()> {
///         class.method("bump", Signature::new(&[]), |this, _| {
///             this.count.set(this.count.get() + 1);
///             Ok(Value::from(this.count.get()))
///         })?;
///         class.readonly_property("count", ValueType::Int, |this| Value::from(this.count.get()))
///     }
/// }
///
/// let registry = ClassRegistry::new();
/// registry.register::<Counter>().unwrap();
/// let counter = Value::Object(registry.construct("Counter", &[]).unwrap());
/// dispatch::call_method(&registry, &counter, "bump", &[]).unwrap();
/// assert_eq!(dispatch::get_member(&registry, &counter, "count").unwrap(), Value::from(1));
/// ```
pub trait NativeClass: Object + Sized {
    /// Registered class name
    const NAME: &'static str;
    /// Parent class name, empty for a root class
    const PARENT: &'static str = "";

    /// A fresh, uninitialized instance
    fn new_instance() -> Self;

    /// Declare the class members
    fn bind(class: &mut ClassBuilder<'_, Self>) -> VarResult<()>;
}

/// Parameter list of a bound method.
#[derive(Debug, Clone)]
pub struct Signature {
    names: Vec<String>,
    types: Vec<TypeInfo>,
    defaults: Vec<Value>,
    returns: TypeInfo,
    variadic: bool,
}

impl Signature {
    /// Parameters `names`, all unconstrained
    pub fn new(names: &[&str]) -> Self {
        Signature {
            names: names.iter().map(|name| name.to_string()).collect(),
            types: vec![TypeInfo::Any; names.len()],
            defaults: Vec::new(),
            returns: TypeInfo::Any,
            variadic: false,
        }
    }

    /// Any number of arguments, passed through unchecked
    pub fn variadic() -> Self {
        Signature {
            variadic: true,
            ..Signature::new(&[])
        }
    }

    /// Parameter constraints, one per name
    pub fn arg_types(mut self, types: Vec<TypeInfo>) -> Self {
        self.types = types;
        self
    }

    /// Values for the trailing parameters
    pub fn defaults(mut self, defaults: Vec<Value>) -> Self {
        self.defaults = defaults;
        self
    }

    /// Declared return type
    pub fn returns(mut self, returns: impl Into<TypeInfo>) -> Self {
        self.returns = returns.into();
        self
    }

    fn into_info(self, name: &str, is_static: bool) -> VarResult<MethodInfo> {
        if self.variadic {
            return Ok(MethodInfo::variadic(name, is_static, self.returns));
        }
        MethodInfo::new(
            name,
            is_static,
            self.names,
            self.types,
            self.returns,
            self.defaults,
        )
    }
}

fn downcast<T: NativeClass>(instance: &ObjectRef) -> VarResult<&T> {
    let object: &dyn Object = &**instance;
    object.downcast_ref::<T>().ok_or_else(|| {
        VarError::type_error(format!(
            "expected an instance of {}, got {}.",
            T::NAME,
            instance.class_name()
        ))
    })
}

/// Declares the members of `T` on a registry.
pub struct ClassBuilder<'r, T> {
    registry: &'r ClassRegistry,
    class: PhantomData<fn() -> T>,
}

impl<T: NativeClass> ClassBuilder<'_, T> {
    /// The registry being populated
    pub fn registry(&self) -> &ClassRegistry {
        self.registry
    }

    /// Declare the initializer, run by `construct` after the factory.
    ///
    /// The instance parameter is added in front of `signature`; the return
    /// type is always void.
    pub fn init(
        &mut self,
        signature: Signature,
        f: impl Fn(&T, &[Value]) -> VarResult<()> + 'static,
    ) -> VarResult<()> {
        let mut names = vec!["self".to_string()];
        names.extend(signature.names);
        let mut types = vec![TypeInfo::Of(ValueType::Object)];
        types.extend(signature.types);
        let info = MethodInfo::new(
            T::NAME,
            true,
            names,
            types,
            TypeInfo::Void,
            signature.defaults,
        )?;
        self.registry.bind(StaticFuncBind::new(T::NAME, info, move |args| {
            let instance = args[0].as_object()?;
            f(downcast::<T>(&instance)?, &args[1..])?;
            Ok(Value::Null)
        }))
    }

    /// Declare an instance method
    pub fn method(
        &mut self,
        name: &str,
        signature: Signature,
        f: impl Fn(&T, &[Value]) -> VarResult<Value> + 'static,
    ) -> VarResult<()> {
        let info = signature.into_info(name, false)?;
        self.registry.bind(MethodBind::new(T::NAME, info, move |instance, args| {
            f(downcast::<T>(instance)?, args)
        }))
    }

    /// Declare a static function
    pub fn static_func(
        &mut self,
        name: &str,
        signature: Signature,
        f: impl Fn(&[Value]) -> VarResult<Value> + 'static,
    ) -> VarResult<()> {
        let info = signature.into_info(name, true)?;
        self.registry.bind(StaticFuncBind::new(T::NAME, info, f))
    }

    /// Declare a readable and writable data member
    pub fn property(
        &mut self,
        name: &str,
        datatype: impl Into<TypeInfo>,
        get: impl Fn(&T) -> Value + 'static,
        set: impl Fn(&T, Value) -> VarResult<()> + 'static,
    ) -> VarResult<()> {
        let getter: GetterFn = Rc::new(move |instance: &ObjectRef| -> VarResult<Value> {
            Ok(get(downcast::<T>(instance)?))
        });
        let setter: SetterFn = Rc::new(move |instance: &ObjectRef, value: Value| {
            set(downcast::<T>(instance)?, value)
        });
        self.registry.bind(MemberBind::new(
            T::NAME,
            name,
            datatype.into(),
            getter,
            Some(setter),
        ))
    }

    /// Declare a read-only data member
    pub fn readonly_property(
        &mut self,
        name: &str,
        datatype: impl Into<TypeInfo>,
        get: impl Fn(&T) -> Value + 'static,
    ) -> VarResult<()> {
        let getter: GetterFn = Rc::new(move |instance: &ObjectRef| -> VarResult<Value> {
            Ok(get(downcast::<T>(instance)?))
        });
        self.registry
            .bind(MemberBind::new(T::NAME, name, datatype.into(), getter, None))
    }

    /// Declare a static variable
    pub fn static_var(
        &mut self,
        name: &str,
        datatype: impl Into<TypeInfo>,
        initial: impl Into<Value>,
    ) -> VarResult<()> {
        self.registry.bind(StaticVarBind::new(
            T::NAME,
            name,
            datatype.into(),
            initial.into(),
        ))
    }

    /// Declare a constant
    pub fn constant(&mut self, name: &str, value: impl Into<Value>) -> VarResult<()> {
        self.registry
            .bind(ConstantBind::new(T::NAME, name, value.into()))
    }

    /// Declare an enum table
    pub fn enumeration(&mut self, name: &str, values: &[(&str, i64)]) -> VarResult<()> {
        self.registry
            .bind(EnumBind::new(T::NAME, name, values.iter().copied()))
    }

    /// Declare a single enum value
    pub fn enum_value(&mut self, name: &str, value: i64) -> VarResult<()> {
        self.registry
            .bind(EnumValueBind::new(T::NAME, name, value))
    }
}

impl ClassRegistry {
    /// Register `T` and declare its members.
    pub fn register<T: NativeClass>(&self) -> VarResult<()> {
        self.register_class(T::NAME, T::PARENT, || -> ObjectRef {
            Rc::new(T::new_instance())
        })?;
        let mut builder = ClassBuilder {
            registry: self,
            class: PhantomData,
        };
        T::bind(&mut builder)
    }
}
