//! Contract compliance tests for var_core
//!
//! These tests pin the public surface other components rely on.

use var_core::{Array, ErrorKind, Map, Text, Value, ValueType, VarError, VarResult};

#[cfg(test)]
mod value_contract_tests {
    use super::*;

    #[test]
    fn test_value_type_names() {
        let names: Vec<&str> = [
            ValueType::Null,
            ValueType::Bool,
            ValueType::Int,
            ValueType::Float,
            ValueType::String,
            ValueType::Vec2f,
            ValueType::Vec2i,
            ValueType::Vec3f,
            ValueType::Vec3i,
            ValueType::Array,
            ValueType::Map,
            ValueType::Object,
        ]
        .iter()
        .map(|t| t.name())
        .collect();
        assert_eq!(
            names,
            vec![
                "null", "bool", "int", "float", "String", "Vec2f", "Vec2i", "Vec3f", "Vec3i",
                "Array", "Map", "Object"
            ]
        );
    }

    #[test]
    fn test_default_value_is_null() {
        assert!(Value::default().is_null());
        assert_eq!(Value::from(()), Value::Null);
    }

    #[test]
    fn test_strict_casts_report_type_error() {
        let err = Value::from("x").as_int().unwrap_err();
        assert_eq!(err.kind, ErrorKind::TypeError);
        assert!(Value::from(1).as_text().is_err());
        assert!(Value::Null.as_array().is_err());
        assert!(Value::Null.as_object().is_err());
    }

    #[test]
    fn test_equality_never_fails() {
        let values = vec![
            Value::Null,
            Value::from(1),
            Value::from("1"),
            Value::from(Array::new()),
            Value::from(Map::new()),
        ];
        for a in &values {
            for b in &values {
                let _ = a == b;
            }
        }
    }
}

#[cfg(test)]
mod error_contract_tests {
    use super::*;

    #[test]
    fn test_result_alias() {
        fn fails() -> VarResult<()> {
            Err(VarError::value_error("bad"))
        }
        assert_eq!(fails().unwrap_err().to_string(), "ValueError: bad");
    }

    #[test]
    fn test_text_format() {
        let text = Text::format("%s:%d", &[Value::from("line"), Value::from(3)]).unwrap();
        assert_eq!(text.as_str(), "line:3");
    }
}
