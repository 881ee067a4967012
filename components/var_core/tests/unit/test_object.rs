//! Unit tests for native objects held in values

use std::cell::Cell;
use std::rc::Rc;

use var_core::{ErrorKind, Map, Object, ObjectRef, Value, VarError, VarResult};

struct Counter {
    count: Cell<i64>,
}

impl Object for Counter {
    fn class_name(&self) -> &'static str {
        "Counter"
    }

    fn equals(&self, other: &Value) -> bool {
        match other {
            Value::Object(o) => o
                .downcast_ref::<Counter>()
                .is_some_and(|c| c.count.get() == self.count.get()),
            _ => false,
        }
    }

    fn add(&self, other: &Value) -> VarResult<Value> {
        let counter: ObjectRef = Rc::new(Counter {
            count: Cell::new(self.count.get() + other.as_int()?),
        });
        Ok(Value::Object(counter))
    }

    fn call(&self, _args: &[Value]) -> VarResult<Value> {
        self.count.set(self.count.get() + 1);
        Ok(Value::from(self.count.get()))
    }

    fn get_member(&self, name: &str) -> VarResult<Value> {
        match name {
            "count" => Ok(Value::from(self.count.get())),
            _ => Err(VarError::attribute_error(format!("no member {}", name))),
        }
    }

    fn hash(&self) -> VarResult<u64> {
        Ok(self.count.get() as u64)
    }
}

fn counter(start: i64) -> Value {
    let obj: ObjectRef = Rc::new(Counter {
        count: Cell::new(start),
    });
    Value::Object(obj)
}

#[cfg(test)]
mod object_value_tests {
    use super::*;

    #[test]
    fn test_type_name_is_class_name() {
        assert_eq!(counter(0).type_name(), "Counter");
    }

    #[test]
    fn test_left_object_operand_delegates() {
        let sum = counter(2).add(&Value::from(3)).unwrap();
        assert_eq!(sum.get_member("count").unwrap(), Value::from(5));
    }

    #[test]
    fn test_right_object_operand_is_rejected() {
        let err = Value::from(3).add(&counter(2)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::OperatorNotSupported);
        assert_ne!(Value::from(3), counter(3));
    }

    #[test]
    fn test_missing_capability_is_not_implemented() {
        let err = counter(1).sub(&Value::from(1)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotImplemented);
        let err = counter(1).lt(&Value::from(1)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotImplemented);
        let err = counter(1).iter_begin().unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotImplemented);
    }

    #[test]
    fn test_call_mutates_through_shared_handle() {
        let a = counter(0);
        let b = a.clone();
        a.call(&[]).unwrap();
        assert_eq!(b.get_member("count").unwrap(), Value::from(1));
    }

    #[test]
    fn test_unknown_method_is_attribute_error() {
        let err = counter(0).call_method("reset", &[]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::AttributeError);
    }

    #[test]
    fn test_hashable_object_as_map_key() {
        let map = Map::new();
        map.insert(counter(4), "four").unwrap();
        assert!(map.has(&counter(4)).unwrap());
        assert!(!map.has(&counter(5)).unwrap());
    }

    #[test]
    fn test_deep_copy_requires_capability() {
        let err = counter(0).copy(true).unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotImplemented);
        assert!(counter(0).copy(false).is_ok());
    }
}
