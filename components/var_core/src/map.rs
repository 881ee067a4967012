//! Shared associative container keyed by hashable values.
//!
//! Keys are bucketed by [`Value::hash`] and compared with value equality, so
//! two distinct keys that happen to share a hash occupy separate slots. A NaN
//! key component matches any other NaN. Entries keep their insertion order.

use std::cell::{Ref, RefCell};
use std::fmt;
use std::hash::{BuildHasherDefault, Hash, Hasher};
use std::rc::Rc;

use indexmap::IndexMap;
use rustc_hash::FxHasher;

use crate::{Value, VarResult};

/// A hashable value together with its precomputed hash.
#[derive(Clone)]
pub struct MapKey {
    hash: u64,
    value: Value,
}

impl MapKey {
    /// Fails with TypeError when `value` is not hashable
    pub fn new(value: Value) -> VarResult<Self> {
        let hash = value.hash()?;
        Ok(MapKey { hash, value })
    }

    /// The original key value
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// The precomputed hash
    pub fn hash_code(&self) -> u64 {
        self.hash
    }
}

fn same_number(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

fn same_key(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Float(x), Value::Float(y)) => same_number(*x, *y),
        (Value::Vec2f(x), Value::Vec2f(y)) => same_number(x.x, y.x) && same_number(x.y, y.y),
        (Value::Vec3f(x), Value::Vec3f(y)) => {
            same_number(x.x, y.x) && same_number(x.y, y.y) && same_number(x.z, y.z)
        }
        _ => a == b,
    }
}

impl PartialEq for MapKey {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash && same_key(&self.value, &other.value)
    }
}

impl Eq for MapKey {}

impl Hash for MapKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

impl fmt::Debug for MapKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.value, f)
    }
}

type Entries = IndexMap<MapKey, Value, BuildHasherDefault<FxHasher>>;

/// Shared map of values
#[derive(Clone, Default)]
pub struct Map {
    data: Rc<RefCell<Entries>>,
}

impl Map {
    /// Create an empty map
    pub fn new() -> Self {
        Map::default()
    }

    /// Borrow the entries
    pub fn borrow(&self) -> Ref<'_, Entries> {
        self.data.borrow()
    }

    /// Whether both handles share the same backing table
    pub fn ptr_eq(&self, other: &Map) -> bool {
        Rc::ptr_eq(&self.data, &other.data)
    }

    /// Number of entries
    pub fn size(&self) -> usize {
        self.data.borrow().len()
    }

    /// Whether the map is empty
    pub fn is_empty(&self) -> bool {
        self.data.borrow().is_empty()
    }

    /// Whether `key` is present
    pub fn has(&self, key: &Value) -> VarResult<bool> {
        let key = MapKey::new(key.clone())?;
        Ok(self.data.borrow().contains_key(&key))
    }

    /// The value stored under `key`, if any
    pub fn get(&self, key: &Value) -> VarResult<Option<Value>> {
        let key = MapKey::new(key.clone())?;
        Ok(self.data.borrow().get(&key).cloned())
    }

    /// The `[]` operation: the value under `key`, inserting `null` first
    /// when the key is absent.
    pub fn get_or_insert(&self, key: &Value) -> VarResult<Value> {
        let key = MapKey::new(key.clone())?;
        Ok(self
            .data
            .borrow_mut()
            .entry(key)
            .or_insert(Value::Null)
            .clone())
    }

    /// Insert or replace; returns the previous value
    pub fn insert(&self, key: impl Into<Value>, value: impl Into<Value>) -> VarResult<Option<Value>> {
        let key = MapKey::new(key.into())?;
        Ok(self.data.borrow_mut().insert(key, value.into()))
    }

    /// Remove `key`, keeping the order of the remaining entries
    pub fn remove(&self, key: &Value) -> VarResult<Option<Value>> {
        let key = MapKey::new(key.clone())?;
        Ok(self.data.borrow_mut().shift_remove(&key))
    }

    /// Remove every entry
    pub fn clear(&self) {
        self.data.borrow_mut().clear();
    }

    /// Keys in insertion order
    pub fn keys(&self) -> Vec<Value> {
        self.data.borrow().keys().map(|k| k.value.clone()).collect()
    }

    /// Values in insertion order
    pub fn values(&self) -> Vec<Value> {
        self.data.borrow().values().cloned().collect()
    }

    /// `(key, value)` pairs in insertion order
    pub fn entries(&self) -> Vec<(Value, Value)> {
        self.data
            .borrow()
            .iter()
            .map(|(k, v)| (k.value.clone(), v.clone()))
            .collect()
    }

    /// The entry at insertion position `index`
    pub fn entry_at(&self, index: usize) -> Option<(Value, Value)> {
        self.data
            .borrow()
            .get_index(index)
            .map(|(k, v)| (k.value.clone(), v.clone()))
    }

    /// A new map; `deep` also copies keys and values recursively
    pub fn copy(&self, deep: bool) -> VarResult<Map> {
        if !deep {
            return Ok(Map {
                data: Rc::new(RefCell::new(self.data.borrow().clone())),
            });
        }
        let copy = Map::new();
        for (key, value) in self.entries() {
            copy.insert(key.copy(true)?, value.copy(true)?)?;
        }
        Ok(copy)
    }
}

impl PartialEq for Map {
    fn eq(&self, other: &Self) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        let a = self.data.borrow();
        let b = other.data.borrow();
        a.len() == b.len()
            && a.iter()
                .all(|(k, v)| b.get(k).is_some_and(|other_v| v == other_v))
    }
}

impl fmt::Debug for Map {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.data.borrow().iter()).finish()
    }
}

impl fmt::Display for Map {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (key, value)) in self.data.borrow().iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            key.value.fmt_nested(f)?;
            write!(f, ": ")?;
            value.fmt_nested(f)?;
        }
        write!(f, "}}")
    }
}
