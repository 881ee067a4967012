//! Native class registry and binding layer for the dynamic value runtime
//!
//! This crate lets Rust types participate as runtime classes:
//! - A class registry keyed by class name, with single inheritance
//! - Bindings for methods, static functions, members, static variables,
//!   constants and enums, each carrying reflection metadata
//! - Argument count and type validation with trailing default values
//! - Registry-aware member access and calls on [`var_core::Value`]
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//! use native_classes::{dispatch, ClassRegistry, ConstantBind};
//! use var_core::{Object, ObjectRef, Value};
//!
//! struct Config;
//!
//! impl Object for Config {
//!     fn class_name(&self) -> &'static str {
//!         "Config"
//!     }
//! }
//!
//! let registry = ClassRegistry::new();
//! registry
//!     .register_class("Config", "", || -> ObjectRef { Rc::new(Config) })
//!     .unwrap();
//! registry.bind(ConstantBind::new("Config", "VERSION", Value::from(3))).unwrap();
//!
//! let version = dispatch::get_static(&registry, "Config", "VERSION").unwrap();
//! assert_eq!(version, Value::from(3));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod bind;
pub mod builder;
pub mod dispatch;
pub mod enum_object;
pub mod registry;
pub mod type_info;

// Re-export main types at crate root
pub use bind::{
    Binding, ConstantBind, EnumBind, EnumValueBind, GetterFn, MemberBind, MethodBind, MethodFn,
    SetterFn, StaticFn, StaticFuncBind, StaticVarBind,
};
pub use builder::{ClassBuilder, NativeClass, Signature};
pub use dispatch::BoundMethod;
pub use enum_object::EnumObject;
pub use registry::{ClassRegistry, Factory};
pub use type_info::{
    Arity, ClassInfo, EnumInfo, EnumValueInfo, MemberInfo, MemberKind, MethodInfo, PropertyInfo,
    TypeInfo,
};
