//! Unit tests for the native class registry

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use native_classes::{
    dispatch, ClassBuilder, ClassRegistry, ConstantBind, EnumValueBind, MemberKind, MethodInfo,
    NativeClass, Signature, StaticFuncBind, TypeInfo,
};
use var_core::{ErrorKind, Object, ObjectRef, Value, ValueType, VarResult};

// ============================================================================
// Fixtures
// ============================================================================

struct Shape {
    name: RefCell<String>,
}

impl Object for Shape {
    fn class_name(&self) -> &'static str {
        "Shape"
    }
}

impl NativeClass for Shape {
    const NAME: &'static str = "Shape";

    fn new_instance() -> Self {
        Shape {
            name: RefCell::new(String::new()),
        }
    }

    fn bind(class: &mut ClassBuilder<'_, Self>) -> VarResult<()> {
        class.init(
            Signature::new(&["name"]).arg_types(vec![ValueType::String.into()]),
            |this, args| {
                *this.name.borrow_mut() = args[0].as_str()?.to_string();
                Ok(())
            },
        )?;
        class.property(
            "name",
            ValueType::String,
            |this| Value::from(this.name.borrow().as_str()),
            |this, value| {
                *this.name.borrow_mut() = value.as_str()?.to_string();
                Ok(())
            },
        )?;
        class.method(
            "describe",
            Signature::new(&["prefix"])
                .arg_types(vec![ValueType::String.into()])
                .defaults(vec![Value::from("shape")])
                .returns(ValueType::String),
            |this, args| {
                Ok(Value::from(format!(
                    "{} {}",
                    args[0].as_str()?,
                    this.name.borrow()
                )))
            },
        )?;
        class.enumeration("Kind", &[("ROUND", 0), ("ANGULAR", 1)])?;
        class.constant("MAX_SIDES", 12)?;
        class.static_var("created", ValueType::Int, 0)
    }
}

struct Circle {
    base: Shape,
    radius: Cell<f64>,
}

impl Object for Circle {
    fn class_name(&self) -> &'static str {
        "Circle"
    }

    fn parent_class_name(&self) -> &'static str {
        "Shape"
    }

    fn base(&self) -> Option<&dyn Object> {
        Some(&self.base)
    }
}

impl NativeClass for Circle {
    const NAME: &'static str = "Circle";
    const PARENT: &'static str = "Shape";

    fn new_instance() -> Self {
        Circle {
            base: Shape::new_instance(),
            radius: Cell::new(0.0),
        }
    }

    fn bind(class: &mut ClassBuilder<'_, Self>) -> VarResult<()> {
        class.init(Signature::new(&["radius"]), |this, args| {
            this.radius.set(args[0].as_float()?);
            *this.base.name.borrow_mut() = "circle".to_string();
            Ok(())
        })?;
        class.readonly_property("radius", ValueType::Float, |this| {
            Value::from(this.radius.get())
        })?;
        class.method(
            "resize",
            Signature::new(&["w", "h", "factor"]).defaults(vec![Value::from(1)]),
            |this, args| {
                let scale = args[0].as_float()? * args[1].as_float()? * args[2].as_float()?;
                this.radius.set(this.radius.get() * scale);
                Ok(Value::from(this.radius.get()))
            },
        )?;
        class.enum_value("SIDES", 0)
    }
}

fn shapes() -> ClassRegistry {
    let registry = ClassRegistry::new();
    registry.register::<Shape>().unwrap();
    registry.register::<Circle>().unwrap();
    registry
}

fn circle(registry: &ClassRegistry, radius: f64) -> Value {
    Value::Object(registry.construct("Circle", &[Value::from(radius)]).unwrap())
}

struct Plain;

impl Object for Plain {
    fn class_name(&self) -> &'static str {
        "Plain"
    }
}

fn plain() -> ObjectRef {
    Rc::new(Plain)
}

// ============================================================================
// Registration Tests
// ============================================================================

#[test]
fn test_duplicate_class_is_attribute_error() {
    let registry = shapes();
    let err = registry.register::<Shape>().unwrap_err();
    assert_eq!(err.kind, ErrorKind::AttributeError);
    assert!(err.message.contains("Shape"));
}

#[test]
fn test_duplicate_attribute_is_attribute_error() {
    let registry = shapes();
    let err = registry
        .bind(ConstantBind::new("Shape", "MAX_SIDES", Value::from(3)))
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::AttributeError);
    assert_eq!(
        err.message,
        "entry \"MAX_SIDES\" already exists on class \"Shape\"."
    );
}

#[test]
fn test_child_may_shadow_parent_attribute() {
    let registry = shapes();
    registry
        .bind(ConstantBind::new("Circle", "MAX_SIDES", Value::from(0)))
        .unwrap();
    assert_eq!(
        dispatch::get_static(&registry, "Circle", "MAX_SIDES").unwrap(),
        Value::from(0)
    );
    assert_eq!(
        dispatch::get_static(&registry, "Shape", "MAX_SIDES").unwrap(),
        Value::from(12)
    );
}

#[test]
fn test_class_metadata() {
    let registry = shapes();
    assert!(registry.is_registered("Circle"));
    assert!(!registry.is_registered("Square"));
    assert_eq!(registry.parent_of("Circle").unwrap(), "Shape");
    assert_eq!(registry.parent_of("Shape").unwrap(), "");
    assert!(registry.is_subclass("Circle", "Shape").unwrap());
    assert!(!registry.is_subclass("Shape", "Circle").unwrap());
    assert_eq!(registry.class_names(), vec!["Circle".to_string(), "Shape".to_string()]);
    assert_eq!(
        registry.parent_of("Square").unwrap_err().kind,
        ErrorKind::AttributeError
    );
}

// ============================================================================
// Resolution Tests
// ============================================================================

#[test]
fn test_resolve_walks_to_parent() {
    let registry = shapes();
    let binding = registry.resolve("Circle", "describe").unwrap();
    assert_eq!(binding.class_name(), "Shape");
    assert_eq!(binding.kind(), MemberKind::Method);
    assert!(registry.get_binding("Circle", "describe").unwrap().is_none());
}

#[test]
fn test_resolve_miss_names_most_derived_class() {
    let registry = shapes();
    let err = registry.resolve("Circle", "perimeter").unwrap_err();
    assert_eq!(err.kind, ErrorKind::AttributeError);
    assert!(err.message.contains("Circle"));
    assert!(registry.find("Circle", "perimeter").unwrap().is_none());
}

#[test]
fn test_member_infos_in_declaration_order() {
    let registry = shapes();
    let names: Vec<String> = registry
        .member_infos("Shape")
        .unwrap()
        .iter()
        .map(|info| info.name().to_string())
        .collect();
    assert_eq!(
        names,
        vec!["Shape", "name", "describe", "Kind", "MAX_SIDES", "created"]
    );
    let info = registry.member_info("Circle", "created").unwrap();
    assert_eq!(info.kind(), MemberKind::StaticProperty);
    let info = registry.member_info("Shape", "Shape").unwrap();
    assert_eq!(info.kind(), MemberKind::StaticFunction);
}

// ============================================================================
// Argument Validation Tests
// ============================================================================

#[test]
fn test_two_required_one_default() {
    let registry = shapes();
    let c = circle(&registry, 1.0);

    let err = dispatch::call_method(&registry, &c, "resize", &[Value::from(2)]).unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidArgCount);
    assert!(err.message.contains("at least 2"));

    let two = dispatch::call_method(&registry, &c, "resize", &[Value::from(2), Value::from(3)]);
    assert_eq!(two.unwrap(), Value::from(6.0));

    let three = dispatch::call_method(
        &registry,
        &c,
        "resize",
        &[Value::from(1), Value::from(1), Value::from(0.5)],
    );
    assert_eq!(three.unwrap(), Value::from(3.0));

    let four = vec![Value::from(1); 4];
    let err = dispatch::call_method(&registry, &c, "resize", &four).unwrap_err();
    assert!(err.message.contains("between 2 and 3"));
}

#[test]
fn test_argument_type_mismatch() {
    let registry = shapes();
    let c = circle(&registry, 1.0);
    let err = dispatch::call_method(&registry, &c, "describe", &[Value::from(5)]).unwrap_err();
    assert_eq!(err.kind, ErrorKind::TypeError);
    assert!(err.message.contains("String"));
    assert!(err.message.contains("argument 0"));
}

// ============================================================================
// Initializer & Construction Tests
// ============================================================================

#[test]
fn test_construct_runs_initializer() {
    let registry = shapes();
    let shape = Value::Object(
        registry
            .construct("Shape", &[Value::from("triangle")])
            .unwrap(),
    );
    assert_eq!(
        dispatch::get_member(&registry, &shape, "name").unwrap(),
        Value::from("triangle")
    );
}

#[test]
fn test_construct_validates_initializer_args() {
    let registry = shapes();
    let err = registry.construct("Shape", &[]).err().unwrap();
    assert_eq!(err.kind, ErrorKind::InvalidArgCount);
    let err = registry.construct("Shape", &[Value::from(1)]).err().unwrap();
    assert_eq!(err.kind, ErrorKind::TypeError);
}

#[test]
fn test_construct_without_initializer() {
    let registry = ClassRegistry::new();
    registry.register_class("Plain", "", plain).unwrap();
    let instance = registry.construct("Plain", &[Value::from(1)]).unwrap();
    assert_eq!(instance.class_name(), "Plain");
    let err = registry.construct("Missing", &[]).err().unwrap();
    assert_eq!(err.kind, ErrorKind::AttributeError);
}

#[test]
fn test_initializer_must_be_static_function() {
    let registry = ClassRegistry::new();
    registry.register_class("Plain", "", plain).unwrap();
    let err = registry
        .bind(EnumValueBind::new("Plain", "Plain", 1))
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::AttributeError);
    assert_eq!(
        err.message,
        "attribute \"Plain\" can't be the same as type name."
    );
}

#[test]
fn test_initializer_must_take_instance() {
    let registry = ClassRegistry::new();
    registry.register_class("Plain", "", plain).unwrap();
    let info = MethodInfo::new(
        "Plain",
        true,
        vec!["x".into()],
        vec![ValueType::Int.into()],
        TypeInfo::Void,
        vec![],
    )
    .unwrap();
    let err = registry
        .bind(StaticFuncBind::new("Plain", info, |_| Ok(Value::Null)))
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::TypeError);
    assert!(err.message.contains("first argument"));
}

// ============================================================================
// Dispatch Tests
// ============================================================================

#[test]
fn test_inherited_member_on_child_instance() {
    let registry = shapes();
    let mut c = circle(&registry, 2.0);
    assert_eq!(
        dispatch::get_member(&registry, &c, "name").unwrap(),
        Value::from("circle")
    );
    dispatch::set_member(&registry, &mut c, "name", Value::from("disc")).unwrap();
    let described = dispatch::call_method(&registry, &c, "describe", &[]).unwrap();
    assert_eq!(described, Value::from("shape disc"));
}

#[test]
fn test_member_writes_are_type_checked() {
    let registry = shapes();
    let mut c = circle(&registry, 2.0);
    let err = dispatch::set_member(&registry, &mut c, "name", Value::from(3)).unwrap_err();
    assert_eq!(err.kind, ErrorKind::TypeError);
    let err = dispatch::set_member(&registry, &mut c, "radius", Value::from(1.0)).unwrap_err();
    assert_eq!(err.kind, ErrorKind::AttributeError);
}

#[test]
fn test_method_read_as_member_is_callable() {
    let registry = shapes();
    let c = circle(&registry, 1.0);
    let resize = dispatch::get_member(&registry, &c, "resize").unwrap();
    assert_eq!(
        resize.call(&[Value::from(2), Value::from(2)]).unwrap(),
        Value::from(4.0)
    );
    assert_eq!(
        dispatch::get_member(&registry, &c, "radius").unwrap(),
        Value::from(4.0)
    );
}

#[test]
fn test_unregistered_object_uses_own_capabilities() {
    let registry = shapes();
    let value = Value::Object(plain());
    let err = dispatch::call_method(&registry, &value, "describe", &[]).unwrap_err();
    assert_eq!(err.kind, ErrorKind::AttributeError);
}

// ============================================================================
// Static, Constant & Enum Tests
// ============================================================================

#[test]
fn test_static_var_shared_through_children() {
    let registry = shapes();
    dispatch::set_static(&registry, "Circle", "created", Value::from(2)).unwrap();
    assert_eq!(
        dispatch::get_static(&registry, "Shape", "created").unwrap(),
        Value::from(2)
    );
    let err = dispatch::set_static(&registry, "Shape", "created", Value::from("x")).unwrap_err();
    assert_eq!(err.kind, ErrorKind::TypeError);
}

#[test]
fn test_constant_and_enum_reject_writes() {
    let registry = shapes();
    for name in ["MAX_SIDES", "Kind", "SIDES"] {
        let err = dispatch::set_static(&registry, "Circle", name, Value::from(1)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::TypeError, "{}", name);
    }
    let mut c = circle(&registry, 1.0);
    let err = dispatch::set_member(&registry, &mut c, "MAX_SIDES", Value::from(1)).unwrap_err();
    assert_eq!(err.kind, ErrorKind::TypeError);
}

#[test]
fn test_enum_values_readable() {
    let registry = shapes();
    let kind = dispatch::get_static(&registry, "Circle", "Kind").unwrap();
    assert_eq!(kind.get_member("ANGULAR").unwrap(), Value::from(1));
    assert_eq!(kind.to_string(), "[Enum:Kind]");
    let mut kind = kind;
    let err = kind.set_member("ROUND", Value::from(9)).unwrap_err();
    assert_eq!(err.kind, ErrorKind::TypeError);
    assert_eq!(
        dispatch::get_static(&registry, "Circle", "SIDES").unwrap(),
        Value::from(0)
    );
}

#[test]
fn test_instance_member_needs_instance() {
    let registry = shapes();
    let err = dispatch::get_static(&registry, "Shape", "name").unwrap_err();
    assert_eq!(err.kind, ErrorKind::AttributeError);
    let err = dispatch::call_static(&registry, "Shape", "describe", &[]).unwrap_err();
    assert_eq!(err.kind, ErrorKind::TypeError);
}

// ============================================================================
// Global Registry Tests
// ============================================================================

#[test]
fn test_install_then_global() {
    std::thread::spawn(|| {
        let mine = Rc::new(ClassRegistry::new());
        mine.register_class("Plain", "", plain).unwrap();
        assert!(ClassRegistry::install(mine.clone()));
        assert!(Rc::ptr_eq(&ClassRegistry::global(), &mine));
        assert!(!ClassRegistry::install(Rc::new(ClassRegistry::new())));
        assert!(ClassRegistry::global().is_registered("Plain"));
    })
    .join()
    .unwrap();
}

#[test]
fn test_global_created_lazily_refuses_install() {
    std::thread::spawn(|| {
        let first = ClassRegistry::global();
        assert!(Rc::ptr_eq(&first, &ClassRegistry::global()));
        assert!(!ClassRegistry::install(Rc::new(ClassRegistry::new())));
    })
    .join()
    .unwrap();
}
