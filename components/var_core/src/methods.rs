//! Built-in methods of text, arrays and maps.
//!
//! `Value::call_method` dispatches by tag. Objects route to their own
//! `call_method`; registry bindings are resolved one layer up, by the
//! native class dispatch.

use crate::{Array, Map, Text, Value, VarError, VarResult};

fn arg_count(type_name: &str, method: &str, args: &[Value], min: usize, max: usize) -> VarResult<()> {
    let n = args.len();
    if n >= min && n <= max {
        return Ok(());
    }
    let expected = if min == max {
        format!("exactly {}", min)
    } else {
        format!("between {} and {}", min, max)
    };
    Err(VarError::invalid_arg_count(format!(
        "method {}.{}() expected {} argument(s), got {}.",
        type_name, method, expected, n
    )))
}

fn no_method(value: &Value, name: &str) -> VarError {
    VarError::attribute_error(format!(
        "type {} has no method named \"{}\".",
        value.type_name(),
        name
    ))
}

fn index_arg(arg: &Value) -> VarResult<usize> {
    let i = arg.as_int()?;
    usize::try_from(i).map_err(|_| VarError::invalid_index(format!("negative position {}.", i)))
}

fn text_method(value: &Value, text: &Text, name: &str, args: &[Value]) -> VarResult<Value> {
    let check = |min, max| arg_count("String", name, args, min, max);
    match name {
        "size" | "length" => {
            check(0, 0)?;
            Ok(Value::from(text.size()))
        }
        "empty" => {
            check(0, 0)?;
            Ok(Value::from(text.is_empty()))
        }
        "to_upper" => {
            check(0, 0)?;
            Ok(Value::from(text.to_upper()))
        }
        "to_lower" => {
            check(0, 0)?;
            Ok(Value::from(text.to_lower()))
        }
        "strip" => {
            check(0, 0)?;
            Ok(Value::from(text.strip()))
        }
        "substr" => {
            check(1, 2)?;
            let start = index_arg(&args[0])?;
            let end = match args.get(1) {
                Some(end) => index_arg(end)?,
                None => text.size(),
            };
            Ok(Value::from(text.substr(start, end)?))
        }
        "starts_with" => {
            check(1, 1)?;
            Ok(Value::from(text.starts_with(args[0].as_str()?)))
        }
        "ends_with" => {
            check(1, 1)?;
            Ok(Value::from(text.ends_with(args[0].as_str()?)))
        }
        "find" => {
            check(1, 1)?;
            Ok(match text.find(args[0].as_str()?) {
                Some(pos) => Value::from(pos),
                None => Value::Int(-1),
            })
        }
        "contains" => {
            check(1, 1)?;
            Ok(Value::from(text.contains(args[0].as_str()?)))
        }
        "split" => {
            check(1, 1)?;
            let parts = text.split(args[0].as_str()?)?;
            Ok(Value::from(parts.into_iter().map(Value::from).collect::<Array>()))
        }
        "join" => {
            check(1, 1)?;
            let parts = args[0]
                .as_array()?
                .to_vec()
                .iter()
                .map(|part| part.as_text().cloned())
                .collect::<VarResult<Vec<Text>>>()?;
            Ok(Value::from(text.join(&parts)))
        }
        "to_int" => {
            check(0, 0)?;
            Ok(Value::from(text.to_int()?))
        }
        "to_float" => {
            check(0, 0)?;
            Ok(Value::from(text.to_float()?))
        }
        "get_line" => {
            check(1, 1)?;
            Ok(Value::from(text.get_line(index_arg(&args[0])?)?))
        }
        "hash" => {
            check(0, 0)?;
            Ok(Value::Int(text.hash_code() as i64))
        }
        _ => Err(no_method(value, name)),
    }
}

fn array_method(value: &Value, array: &Array, name: &str, args: &[Value]) -> VarResult<Value> {
    let check = |min, max| arg_count("Array", name, args, min, max);
    match name {
        "size" => {
            check(0, 0)?;
            Ok(Value::from(array.size()))
        }
        "empty" => {
            check(0, 0)?;
            Ok(Value::from(array.is_empty()))
        }
        "push" | "push_back" => {
            check(1, 1)?;
            array.push(args[0].clone());
            Ok(Value::Null)
        }
        "pop" | "pop_back" => {
            check(0, 0)?;
            array.pop()
        }
        "insert" => {
            check(2, 2)?;
            array.insert(args[0].as_int()?, args[1].clone())?;
            Ok(Value::Null)
        }
        "remove" => {
            check(1, 1)?;
            array.remove(args[0].as_int()?)
        }
        "clear" => {
            check(0, 0)?;
            array.clear();
            Ok(Value::Null)
        }
        "contains" => {
            check(1, 1)?;
            Ok(Value::from(array.contains(&args[0])))
        }
        "append" => {
            check(1, 1)?;
            array.append(&args[0].as_array()?);
            Ok(Value::Null)
        }
        "reverse" => {
            check(0, 0)?;
            array.reverse();
            Ok(Value::Null)
        }
        "copy" => {
            check(0, 1)?;
            let deep = match args.first() {
                Some(deep) => deep.as_bool()?,
                None => true,
            };
            Ok(Value::from(array.copy(deep)?))
        }
        _ => Err(no_method(value, name)),
    }
}

fn map_method(value: &Value, map: &Map, name: &str, args: &[Value]) -> VarResult<Value> {
    let check = |min, max| arg_count("Map", name, args, min, max);
    match name {
        "size" => {
            check(0, 0)?;
            Ok(Value::from(map.size()))
        }
        "empty" => {
            check(0, 0)?;
            Ok(Value::from(map.is_empty()))
        }
        "has" => {
            check(1, 1)?;
            Ok(Value::from(map.has(&args[0])?))
        }
        "get" => {
            check(1, 2)?;
            let fallback = args.get(1).cloned().unwrap_or_default();
            Ok(map.get(&args[0])?.unwrap_or(fallback))
        }
        "keys" => {
            check(0, 0)?;
            Ok(Value::from(map.keys()))
        }
        "values" => {
            check(0, 0)?;
            Ok(Value::from(map.values()))
        }
        "remove" => {
            check(1, 1)?;
            Ok(map.remove(&args[0])?.unwrap_or_default())
        }
        "clear" => {
            check(0, 0)?;
            map.clear();
            Ok(Value::Null)
        }
        "copy" => {
            check(0, 1)?;
            let deep = match args.first() {
                Some(deep) => deep.as_bool()?,
                None => true,
            };
            Ok(Value::from(map.copy(deep)?))
        }
        _ => Err(no_method(value, name)),
    }
}

impl Value {
    /// Call a method by name.
    ///
    /// # Examples
    ///
    /// ```
    /// use var_core::{Array, Value};
    ///
    /// let list = Value::from(Array::new());
    /// list.call_method("push", &[Value::from(7)]).unwrap();
    /// assert_eq!(list.call_method("size", &[]).unwrap(), Value::from(1));
    /// ```
    pub fn call_method(&self, name: &str, args: &[Value]) -> VarResult<Value> {
        match self {
            Value::String(t) => text_method(self, t, name, args),
            Value::Array(a) => array_method(self, a, name, args),
            Value::Map(m) => map_method(self, m, name, args),
            Value::Object(o) => o.call_method(name, args),
            _ => Err(no_method(self, name)),
        }
    }
}
