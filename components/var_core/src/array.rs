//! Shared, growable sequence of values.
//!
//! Cloning an [`Array`] aliases the backing list: a push through one handle
//! is visible through every other. [`Array::copy`] produces an independent
//! list.

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

use crate::{Value, VarError, VarResult};

/// Shared list of values
#[derive(Clone, Default)]
pub struct Array {
    data: Rc<RefCell<Vec<Value>>>,
}

impl Array {
    /// Create an empty array
    pub fn new() -> Self {
        Array::default()
    }

    /// Borrow the elements
    pub fn borrow(&self) -> Ref<'_, Vec<Value>> {
        self.data.borrow()
    }

    /// Mutably borrow the elements
    pub fn borrow_mut(&self) -> RefMut<'_, Vec<Value>> {
        self.data.borrow_mut()
    }

    /// Whether both handles share the same backing list
    pub fn ptr_eq(&self, other: &Array) -> bool {
        Rc::ptr_eq(&self.data, &other.data)
    }

    /// Number of elements
    pub fn size(&self) -> usize {
        self.data.borrow().len()
    }

    /// Whether the array is empty
    pub fn is_empty(&self) -> bool {
        self.data.borrow().is_empty()
    }

    /// Append a value
    pub fn push(&self, value: impl Into<Value>) {
        self.data.borrow_mut().push(value.into());
    }

    /// Remove and return the last value
    pub fn pop(&self) -> VarResult<Value> {
        self.data
            .borrow_mut()
            .pop()
            .ok_or_else(|| VarError::invalid_index("pop from an empty array."))
    }

    fn resolve(&self, index: i64, len: usize) -> VarResult<usize> {
        let resolved = if index < 0 { index + len as i64 } else { index };
        if resolved < 0 || resolved as usize >= len {
            return Err(VarError::index_out_of_range(index, len));
        }
        Ok(resolved as usize)
    }

    /// The value at `index`; negative indices count from the end
    pub fn at(&self, index: i64) -> VarResult<Value> {
        let data = self.data.borrow();
        let pos = self.resolve(index, data.len())?;
        Ok(data[pos].clone())
    }

    /// Replace the value at `index`
    pub fn set(&self, index: i64, value: impl Into<Value>) -> VarResult<()> {
        let mut data = self.data.borrow_mut();
        let len = data.len();
        let pos = self.resolve(index, len)?;
        data[pos] = value.into();
        Ok(())
    }

    /// Insert before `index`; `index == size` appends
    pub fn insert(&self, index: i64, value: impl Into<Value>) -> VarResult<()> {
        let mut data = self.data.borrow_mut();
        let len = data.len();
        let pos = if index == len as i64 { len } else { self.resolve(index, len)? };
        data.insert(pos, value.into());
        Ok(())
    }

    /// Remove and return the value at `index`
    pub fn remove(&self, index: i64) -> VarResult<Value> {
        let mut data = self.data.borrow_mut();
        let len = data.len();
        let pos = self.resolve(index, len)?;
        Ok(data.remove(pos))
    }

    /// Remove every element
    pub fn clear(&self) {
        self.data.borrow_mut().clear();
    }

    /// Whether an element equal to `value` exists
    pub fn contains(&self, value: &Value) -> bool {
        self.data.borrow().iter().any(|v| v == value)
    }

    /// Append all elements of `other`
    pub fn append(&self, other: &Array) {
        let items = other.to_vec();
        self.data.borrow_mut().extend(items);
    }

    /// Reverse in place
    pub fn reverse(&self) {
        self.data.borrow_mut().reverse();
    }

    /// Snapshot of the elements
    pub fn to_vec(&self) -> Vec<Value> {
        self.data.borrow().clone()
    }

    /// A new array; `deep` also copies every element recursively
    pub fn copy(&self, deep: bool) -> VarResult<Array> {
        let items = if deep {
            self.data
                .borrow()
                .iter()
                .map(|v| v.copy(true))
                .collect::<VarResult<Vec<_>>>()?
        } else {
            self.to_vec()
        };
        Ok(Array::from(items))
    }

    /// A new array holding the elements of `self` followed by `other`
    pub fn concat(&self, other: &Array) -> Array {
        let mut items = self.to_vec();
        items.extend(other.to_vec());
        Array::from(items)
    }

    /// A new array holding the elements `count` times.
    ///
    /// Fails with a ValueError when the result can't be allocated.
    pub fn repeat(&self, count: i64) -> VarResult<Array> {
        let items = self.data.borrow();
        if count <= 0 || items.is_empty() {
            return Ok(Array::new());
        }
        let too_large = || VarError::value_error("repeated array is too large.");
        let count = usize::try_from(count).map_err(|_| too_large())?;
        let len = items.len().checked_mul(count).ok_or_else(too_large)?;
        let mut out = Vec::new();
        out.try_reserve_exact(len).map_err(|_| too_large())?;
        for _ in 0..count {
            out.extend(items.iter().cloned());
        }
        Ok(Array::from(out))
    }
}

impl From<Vec<Value>> for Array {
    fn from(items: Vec<Value>) -> Self {
        Array {
            data: Rc::new(RefCell::new(items)),
        }
    }
}

impl FromIterator<Value> for Array {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Array::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl PartialEq for Array {
    fn eq(&self, other: &Self) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        let a = self.data.borrow();
        let b = other.data.borrow();
        a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x == y)
    }
}

impl fmt::Debug for Array {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.data.borrow().iter()).finish()
    }
}

impl fmt::Display for Array {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, value) in self.data.borrow().iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            value.fmt_nested(f)?;
        }
        write!(f, "]")
    }
}
