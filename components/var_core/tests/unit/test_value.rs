//! Unit tests for Value semantics

use var_core::{Array, ErrorKind, Map, Value, ValueType, Vec2f, Vec3i};

#[cfg(test)]
mod copy_tests {
    use super::*;

    #[test]
    fn test_scalar_copies_are_equal_and_independent() {
        let original = Value::from("text");
        let mut copy = original.clone();
        assert_eq!(copy, original);
        copy.set_index(&Value::from(0), Value::from("n")).unwrap();
        assert_eq!(original, Value::from("text"));
        assert_eq!(copy, Value::from("next"));
    }

    #[test]
    fn test_array_clone_aliases_deep_copy_does_not() {
        let original = Value::from(Array::new());
        let alias = original.clone();
        let deep = original.copy(true).unwrap();
        alias.as_array().unwrap().push(1);
        assert_eq!(original.as_array().unwrap().size(), 1);
        assert_eq!(deep.as_array().unwrap().size(), 0);
    }
}

#[cfg(test)]
mod equality_tests {
    use super::*;

    #[test]
    fn test_mismatched_types_are_unequal() {
        assert_ne!(Value::from(5), Value::from("5"));
        assert_ne!(Value::from(Array::new()), Value::from(Map::new()));
        assert_ne!(Value::Null, Value::from(false));
    }

    #[test]
    fn test_vectors_compare_numerically() {
        assert_eq!(
            Value::from(Vec2f::new(1.0, 2.0)),
            Value::from(var_core::Vec2i::new(1, 2))
        );
        assert_ne!(Value::from(Vec3i::new(1, 2, 3)), Value::from(Vec3i::new(1, 2, 4)));
    }
}

#[cfg(test)]
mod arithmetic_tests {
    use super::*;

    #[test]
    fn test_int_plus_float() {
        let sum = Value::from(3).add(&Value::from(4.5)).unwrap();
        assert_eq!(sum.type_of(), ValueType::Float);
        assert_eq!(sum, Value::from(7.5));
    }

    #[test]
    fn test_integer_division_by_zero() {
        let err = Value::from(1).div(&Value::from(0)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::ZeroDivision);
    }

    #[test]
    fn test_text_repetition_both_sides() {
        assert_eq!(Value::from("ab").mul(&Value::from(3)).unwrap(), Value::from("ababab"));
        assert_eq!(Value::from(3).mul(&Value::from("ab")).unwrap(), Value::from("ababab"));
    }

    #[test]
    fn test_unsupported_pairs() {
        let err = Value::from(Map::new()).add(&Value::from(1)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::OperatorNotSupported);
        let err = Value::Null.mul(&Value::Null).unwrap_err();
        assert_eq!(err.kind, ErrorKind::OperatorNotSupported);
    }
}

#[cfg(test)]
mod map_tests {
    use super::*;

    #[test]
    fn test_insert_has_no_duplicates() {
        let map = Map::new();
        map.insert("k", 1).unwrap();
        map.insert("k", 2).unwrap();
        assert!(map.has(&Value::from("k")).unwrap());
        assert_eq!(map.size(), 1);
        assert_eq!(map.get(&Value::from("k")).unwrap(), Some(Value::from(2)));
    }

    #[test]
    fn test_array_key_rejected() {
        let map = Map::new();
        let err = map.insert(Array::new(), 1).unwrap_err();
        assert_eq!(err.kind, ErrorKind::TypeError);
    }

    #[test]
    fn test_iteration_order_is_insertion_order() {
        let map = Map::new();
        for key in ["c", "a", "b"] {
            map.insert(key, key.len()).unwrap();
        }
        let keys: Vec<Value> = Value::from(map)
            .iter()
            .unwrap()
            .map(|entry| entry.unwrap().get_member("key").unwrap())
            .collect();
        assert_eq!(keys, vec![Value::from("c"), Value::from("a"), Value::from("b")]);
    }
}

#[cfg(test)]
mod display_tests {
    use super::*;

    #[test]
    fn test_nested_display() {
        let map = Map::new();
        map.insert("list", vec![Value::from(1), Value::from("two")]).unwrap();
        assert_eq!(Value::from(map).to_string(), "{\"list\": [1, \"two\"]}");
    }

    #[test]
    fn test_float_keeps_fraction() {
        assert_eq!(Value::from(1.0).to_string(), "1.0");
        assert_eq!(Value::from(0.1).to_string(), "0.1");
    }
}
