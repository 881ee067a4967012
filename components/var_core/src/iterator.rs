//! One-shot iterator objects over text, arrays and maps.
//!
//! `Value::iter_begin` hands out an object implementing the iterator
//! capabilities (`iter_has_next`, `iter_next`). Array and map iterators are
//! cursors into the shared container, so elements appended while iterating
//! are visited too.

use std::cell::Cell;
use std::rc::Rc;

use crate::{Array, Map, Object, Value, VarError, VarResult};

fn exhausted(class_name: &str) -> VarError {
    VarError::invalid_index(format!("{} has no more elements.", class_name))
}

/// Iterates the characters of a text, one single-character text per step.
pub struct TextIterator {
    chars: Vec<char>,
    pos: Cell<usize>,
}

impl TextIterator {
    /// Iterator over `text`
    pub fn new(text: &str) -> Self {
        TextIterator {
            chars: text.chars().collect(),
            pos: Cell::new(0),
        }
    }
}

impl Object for TextIterator {
    fn class_name(&self) -> &'static str {
        "TextIterator"
    }

    fn iter_has_next(&self) -> VarResult<bool> {
        Ok(self.pos.get() < self.chars.len())
    }

    fn iter_next(&self) -> VarResult<Value> {
        let pos = self.pos.get();
        let c = *self
            .chars
            .get(pos)
            .ok_or_else(|| exhausted(self.class_name()))?;
        self.pos.set(pos + 1);
        Ok(Value::from(c))
    }
}

/// Position cursor into a shared array.
pub struct ArrayIterator {
    array: Array,
    pos: Cell<usize>,
}

impl ArrayIterator {
    /// Iterator over `array`
    pub fn new(array: Array) -> Self {
        ArrayIterator {
            array,
            pos: Cell::new(0),
        }
    }
}

impl Object for ArrayIterator {
    fn class_name(&self) -> &'static str {
        "ArrayIterator"
    }

    fn iter_has_next(&self) -> VarResult<bool> {
        Ok(self.pos.get() < self.array.size())
    }

    fn iter_next(&self) -> VarResult<Value> {
        let pos = self.pos.get();
        if pos >= self.array.size() {
            return Err(exhausted(self.class_name()));
        }
        self.pos.set(pos + 1);
        self.array.at(pos as i64)
    }
}

/// Position cursor into a shared map, yielding [`MapEntry`] objects in
/// insertion order.
pub struct MapIterator {
    map: Map,
    pos: Cell<usize>,
}

impl MapIterator {
    /// Iterator over `map`
    pub fn new(map: Map) -> Self {
        MapIterator {
            map,
            pos: Cell::new(0),
        }
    }
}

impl Object for MapIterator {
    fn class_name(&self) -> &'static str {
        "MapIterator"
    }

    fn iter_has_next(&self) -> VarResult<bool> {
        Ok(self.pos.get() < self.map.size())
    }

    fn iter_next(&self) -> VarResult<Value> {
        let pos = self.pos.get();
        let (key, _) = self
            .map
            .entry_at(pos)
            .ok_or_else(|| exhausted(self.class_name()))?;
        self.pos.set(pos + 1);
        let entry: Rc<dyn Object> = Rc::new(MapEntry {
            map: self.map.clone(),
            key,
        });
        Ok(Value::Object(entry))
    }
}

/// A key of a map together with the map it lives in.
///
/// `value` reads and writes through to the map; `key` is read-only.
pub struct MapEntry {
    map: Map,
    key: Value,
}

impl MapEntry {
    /// The entry's key
    pub fn key(&self) -> &Value {
        &self.key
    }

    /// The current value stored under the key
    pub fn value(&self) -> VarResult<Value> {
        Ok(self.map.get(&self.key)?.unwrap_or_default())
    }
}

impl Object for MapEntry {
    fn class_name(&self) -> &'static str {
        "MapEntry"
    }

    fn to_text(&self) -> String {
        let value = self.value().unwrap_or_default();
        format!("({}, {})", self.key, value)
    }

    fn get_member(&self, name: &str) -> VarResult<Value> {
        match name {
            "key" => Ok(self.key.clone()),
            "value" => self.value(),
            _ => Err(VarError::attribute_error(format!(
                "type {} has no member named \"{}\".",
                self.class_name(),
                name
            ))),
        }
    }

    fn set_member(&self, name: &str, value: Value) -> VarResult<()> {
        match name {
            "value" => self.map.insert(self.key.clone(), value).map(|_| ()),
            "key" => Err(VarError::attribute_error("map entry key is read-only.")),
            _ => Err(VarError::attribute_error(format!(
                "type {} has no writable member named \"{}\".",
                self.class_name(),
                name
            ))),
        }
    }
}

/// Adapts a runtime iterator object to a Rust [`Iterator`].
///
/// Stops after the first error.
pub struct ValueIter {
    iterator: Value,
    done: bool,
}

impl Iterator for ValueIter {
    type Item = VarResult<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let Value::Object(o) = &self.iterator else {
            self.done = true;
            return None;
        };
        let step = match o.iter_has_next() {
            Ok(true) => o.iter_next(),
            Ok(false) => {
                self.done = true;
                return None;
            }
            Err(e) => Err(e),
        };
        if step.is_err() {
            self.done = true;
        }
        Some(step)
    }
}

impl Value {
    /// Begin an iteration: an iterator object for text, arrays and maps,
    /// or whatever the object's own `iter_begin` returns.
    pub fn iter_begin(&self) -> VarResult<Value> {
        let iterator: Rc<dyn Object> = match self {
            Value::String(t) => Rc::new(TextIterator::new(t.as_str())),
            Value::Array(a) => Rc::new(ArrayIterator::new(a.clone())),
            Value::Map(m) => Rc::new(MapIterator::new(m.clone())),
            Value::Object(o) => return o.iter_begin(),
            _ => {
                return Err(VarError::type_error(format!(
                    "type \"{}\" is not iterable.",
                    self.type_name()
                )))
            }
        };
        Ok(Value::Object(iterator))
    }

    /// Iterate as a Rust iterator.
    ///
    /// # Examples
    ///
    /// ```
    /// use var_core::Value;
    ///
    /// let chars = Value::from("ab")
    ///     .iter()
    ///     .unwrap()
    ///     .collect::<Result<Vec<_>, _>>()
    ///     .unwrap();
    /// assert_eq!(chars, vec![Value::from("a"), Value::from("b")]);
    /// ```
    pub fn iter(&self) -> VarResult<ValueIter> {
        let iterator = self.iter_begin()?;
        if !matches!(iterator, Value::Object(_)) {
            return Err(VarError::type_error(format!(
                "iter_begin() of \"{}\" did not return an iterator object.",
                self.type_name()
            )));
        }
        Ok(ValueIter {
            iterator,
            done: false,
        })
    }
}
