//! Runtime object backing an enum binding.

use indexmap::IndexMap;
use var_core::{Map, Object, Value, VarError, VarResult};

/// An enum as seen from values: each name is a read-only integer member.
pub struct EnumObject {
    name: String,
    values: IndexMap<String, i64>,
}

impl EnumObject {
    /// Enum `name` with `values` in declaration order
    pub fn new(name: impl Into<String>, values: IndexMap<String, i64>) -> Self {
        EnumObject {
            name: name.into(),
            values,
        }
    }

    /// The enum's name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The value named `key`
    pub fn get(&self, key: &str) -> Option<i64> {
        self.values.get(key).copied()
    }
}

impl Object for EnumObject {
    fn class_name(&self) -> &'static str {
        "Enum"
    }

    fn to_text(&self) -> String {
        format!("[Enum:{}]", self.name)
    }

    fn get_member(&self, name: &str) -> VarResult<Value> {
        self.get(name).map(Value::Int).ok_or_else(|| {
            VarError::attribute_error(format!(
                "enum {} has no value named \"{}\".",
                self.name, name
            ))
        })
    }

    fn set_member(&self, name: &str, _value: Value) -> VarResult<()> {
        Err(VarError::type_error(format!(
            "can't assign to enum value {}.{}.",
            self.name, name
        )))
    }

    fn iter_begin(&self) -> VarResult<Value> {
        let table = Map::new();
        for (key, value) in &self.values {
            table.insert(key.as_str(), *value)?;
        }
        Value::from(table).iter_begin()
    }
}
