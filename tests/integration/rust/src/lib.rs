//! Integration test suite for the value runtime
//!
//! This crate provides integration tests that verify values and the native
//! class layer work together across component boundaries.

use std::cell::Cell;

use native_classes::{ClassBuilder, NativeClass, Signature, TypeInfo};
use var_core::{Object, ObjectRef, Value, ValueType, VarError, VarResult};

/// Re-export components for test convenience
pub mod components {
    pub use native_classes;
    pub use var_core;
}

/// A 2D point registered as a native class, shared by the integration
/// tests.
#[derive(Default)]
pub struct Point {
    x: Cell<f64>,
    y: Cell<f64>,
}

impl Point {
    /// A point at `(x, y)`
    pub fn new(x: f64, y: f64) -> Self {
        Point {
            x: Cell::new(x),
            y: Cell::new(y),
        }
    }

    fn coords(other: &Value) -> Option<(f64, f64)> {
        let Value::Object(o) = other else {
            return None;
        };
        let object: &dyn Object = &**o;
        object
            .downcast_ref::<Point>()
            .map(|p| (p.x.get(), p.y.get()))
    }
}

impl Object for Point {
    fn class_name(&self) -> &'static str {
        "Point"
    }

    fn to_text(&self) -> String {
        format!("Point({}, {})", Value::from(self.x.get()), Value::from(self.y.get()))
    }

    fn equals(&self, other: &Value) -> bool {
        Point::coords(other) == Some((self.x.get(), self.y.get()))
    }

    fn add(&self, other: &Value) -> VarResult<Value> {
        let (x, y) = Point::coords(other).ok_or_else(|| {
            VarError::operator_not_supported("+", "Point", other.type_name())
        })?;
        let sum: ObjectRef = std::rc::Rc::new(Point::new(self.x.get() + x, self.y.get() + y));
        Ok(Value::Object(sum))
    }

    fn hash(&self) -> VarResult<u64> {
        let x = Value::from(self.x.get()).hash()?;
        let y = Value::from(self.y.get()).hash()?;
        Ok(x ^ y.rotate_left(17))
    }

    fn copy(&self, _deep: bool) -> VarResult<ObjectRef> {
        Ok(std::rc::Rc::new(Point::new(self.x.get(), self.y.get())))
    }
}

impl NativeClass for Point {
    const NAME: &'static str = "Point";

    fn new_instance() -> Self {
        Point::default()
    }

    fn bind(class: &mut ClassBuilder<'_, Self>) -> VarResult<()> {
        class.init(
            Signature::new(&["x", "y"]).defaults(vec![Value::from(0.0), Value::from(0.0)]),
            |this, args| {
                this.x.set(args[0].as_float()?);
                this.y.set(args[1].as_float()?);
                Ok(())
            },
        )?;
        class.property(
            "x",
            ValueType::Float,
            |this| Value::from(this.x.get()),
            |this, value| {
                this.x.set(value.as_float()?);
                Ok(())
            },
        )?;
        class.property(
            "y",
            ValueType::Float,
            |this| Value::from(this.y.get()),
            |this, value| {
                this.y.set(value.as_float()?);
                Ok(())
            },
        )?;
        class.method(
            "length",
            Signature::new(&[]).returns(ValueType::Float),
            |this, _| Ok(Value::from(this.x.get().hypot(this.y.get()))),
        )?;
        class.static_func(
            "distance",
            Signature::new(&["a", "b"])
                .arg_types(vec![TypeInfo::class("Point"); 2])
                .returns(ValueType::Float),
            |args| match (Point::coords(&args[0]), Point::coords(&args[1])) {
                (Some((ax, ay)), Some((bx, by))) => Ok(Value::from((bx - ax).hypot(by - ay))),
                _ => Err(VarError::type_error("distance() expects two points.")),
            },
        )?;
        class.constant("DIMENSIONS", 2)
    }
}
