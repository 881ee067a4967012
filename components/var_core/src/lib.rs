//! Core value representation for an embeddable dynamic-language runtime.
//!
//! This crate provides the tagged [`Value`] type, the shared containers it
//! carries, the capability-based [`Object`] trait for native class
//! instances, and the error record every fallible operation returns.
//!
//! # Overview
//!
//! - [`Value`] - Tagged value: null, bool, int, float, text, vectors,
//!   arrays, maps and objects
//! - [`Text`], [`Array`], [`Map`] - Text and the shared containers
//! - [`Object`] / [`ObjectRef`] - Native class instances
//! - [`VarError`] / [`ErrorKind`] - Errors with optional [`SourceInfo`]
//!
//! # Examples
//!
//! ```
//! use var_core::{ErrorKind, Map, Value};
//!
//! let map = Map::new();
//! map.insert("answer", 42).unwrap();
//! assert!(map.has(&Value::from("answer")).unwrap());
//!
//! let err = Value::from(1).div(&Value::from(0)).unwrap_err();
//! assert_eq!(err.kind, ErrorKind::ZeroDivision);
//!
//! let text = Value::from("ab").mul(&Value::from(3)).unwrap();
//! assert_eq!(text.to_string(), "ababab");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod array;
mod error;
mod iterator;
mod map;
mod methods;
mod object;
mod ops;
mod source;
pub mod sprintf;
mod text;
mod value;
mod vector;

pub use array::Array;
pub use error::{ErrorKind, VarError, VarResult};
pub use iterator::{ArrayIterator, MapEntry, MapIterator, TextIterator, ValueIter};
pub use map::{Map, MapKey};
pub use object::{AsAny, Object, ObjectRef};
pub use source::SourceInfo;
pub use text::Text;
pub use value::{Value, ValueType};
pub use vector::{Component, Vec2, Vec2f, Vec2i, Vec3, Vec3f, Vec3i};
