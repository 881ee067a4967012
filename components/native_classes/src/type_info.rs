//! Reflection metadata describing the members a native class exposes.

use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use var_core::{Value, ValueType, VarError, VarResult};

/// A declared type constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TypeInfo {
    /// Unconstrained
    #[default]
    Any,
    /// No value; used for return types
    Void,
    /// A value tag
    Of(ValueType),
    /// An object whose most-derived class has this name
    Class(String),
}

impl TypeInfo {
    /// Object constraint for the class `name`
    pub fn class(name: impl Into<String>) -> Self {
        TypeInfo::Class(name.into())
    }

    /// Display name of the constraint
    pub fn name(&self) -> &str {
        match self {
            TypeInfo::Any => "var",
            TypeInfo::Void => "void",
            TypeInfo::Of(t) => t.name(),
            TypeInfo::Class(name) => name,
        }
    }

    /// Whether the constraint accepts values of class objects
    pub fn is_object(&self) -> bool {
        matches!(self, TypeInfo::Of(ValueType::Object) | TypeInfo::Class(_))
    }

    /// Whether `value` satisfies the constraint exactly
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            TypeInfo::Any => true,
            TypeInfo::Void => value.is_null(),
            TypeInfo::Of(t) => value.type_of() == *t,
            TypeInfo::Class(name) => match value {
                Value::Object(o) => o.class_name() == name,
                _ => false,
            },
        }
    }
}

impl From<ValueType> for TypeInfo {
    fn from(t: ValueType) -> Self {
        TypeInfo::Of(t)
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Declared parameter count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly this many slots, some of which may have defaults
    Fixed(usize),
    /// Any number of arguments; count validation is skipped
    Variadic,
}

/// Signature of a method or static function.
#[derive(Debug, Clone)]
pub struct MethodInfo {
    /// Method name
    pub name: String,
    /// Whether the method is a static function
    pub is_static: bool,
    /// Declared parameter names
    pub arg_names: Vec<String>,
    /// Parameter constraints, one per name
    pub arg_types: Vec<TypeInfo>,
    /// Declared return type
    pub return_type: TypeInfo,
    /// Values for the trailing parameters
    pub default_args: Vec<Value>,
    /// Declared parameter count
    pub arity: Arity,
}

impl MethodInfo {
    /// A fixed-arity signature.
    ///
    /// Fails with ValueError when the parameter names, types and defaults do
    /// not line up.
    pub fn new(
        name: impl Into<String>,
        is_static: bool,
        arg_names: Vec<String>,
        arg_types: Vec<TypeInfo>,
        return_type: TypeInfo,
        default_args: Vec<Value>,
    ) -> VarResult<Self> {
        let name = name.into();
        if arg_types.len() != arg_names.len() {
            return Err(VarError::value_error(format!(
                "method \"{}\" declares {} parameter(s) but {} type(s).",
                name,
                arg_names.len(),
                arg_types.len()
            )));
        }
        if default_args.len() > arg_names.len() {
            return Err(VarError::value_error(format!(
                "method \"{}\" has more default values than parameters.",
                name
            )));
        }
        let arity = Arity::Fixed(arg_names.len());
        Ok(MethodInfo {
            name,
            is_static,
            arg_names,
            arg_types,
            return_type,
            default_args,
            arity,
        })
    }

    /// A variadic signature
    pub fn variadic(name: impl Into<String>, is_static: bool, return_type: TypeInfo) -> Self {
        MethodInfo {
            name: name.into(),
            is_static,
            arg_names: Vec::new(),
            arg_types: Vec::new(),
            return_type,
            default_args: Vec::new(),
            arity: Arity::Variadic,
        }
    }

    /// Number of declared parameters, `None` when variadic
    pub fn arg_count(&self) -> Option<usize> {
        match self.arity {
            Arity::Fixed(n) => Some(n),
            Arity::Variadic => None,
        }
    }

    /// Number of trailing parameters with default values
    pub fn default_arg_count(&self) -> usize {
        self.default_args.len()
    }

    /// Check the supplied arguments against the signature.
    ///
    /// # Examples
    ///
    /// ```
    /// use native_classes::{MethodInfo, TypeInfo};
    /// use var_core::{ErrorKind, Value};
    ///
    /// let info = MethodInfo::new(
    ///     "area",
    ///     false,
    ///     vec!["w".into(), "h".into(), "scale".into()],
    ///     vec![TypeInfo::Any; 3],
    ///     TypeInfo::Any,
    ///     vec![Value::from(1)],
    /// )
    /// .unwrap();
    /// let err = info.check_args(&[Value::from(2)]).unwrap_err();
    /// assert_eq!(err.kind, ErrorKind::InvalidArgCount);
    /// assert!(info.check_args(&[Value::from(2), Value::from(3)]).is_ok());
    /// ```
    pub fn check_args(&self, args: &[Value]) -> VarResult<()> {
        let declared = match self.arity {
            Arity::Variadic => return Ok(()),
            Arity::Fixed(n) => n,
        };
        let given = args.len();
        let min = declared.saturating_sub(self.default_args.len());
        if given < min || given > declared {
            let expected = if min == declared {
                format!("exactly {}", declared)
            } else if given < min {
                format!("at least {}", min)
            } else {
                format!("between {} and {}", min, declared)
            };
            return Err(VarError::invalid_arg_count(format!(
                "method \"{}\" expected {} argument(s), got {}.",
                self.name, expected, given
            )));
        }
        for (pos, (arg, ty)) in args.iter().zip(&self.arg_types).enumerate() {
            if !ty.accepts(arg) {
                return Err(VarError::type_error(format!(
                    "expected type \"{}\" at argument {} of \"{}\", got \"{}\".",
                    ty,
                    pos,
                    self.name,
                    arg.type_name()
                )));
            }
        }
        Ok(())
    }

    /// Validate `args` and fill the missing trailing parameters from the
    /// defaults.
    pub fn prepare_args(&self, args: &[Value]) -> VarResult<Vec<Value>> {
        self.check_args(args)?;
        let mut full = args.to_vec();
        if let Arity::Fixed(declared) = self.arity {
            let missing = declared - args.len();
            let first_default = self.default_args.len() - missing;
            full.extend(self.default_args[first_default..].iter().cloned());
        }
        Ok(full)
    }
}

/// A data member, static variable or constant.
#[derive(Debug, Clone)]
pub struct PropertyInfo {
    /// Property name
    pub name: String,
    /// Declared type of the stored value
    pub datatype: TypeInfo,
    /// Constant value, or the initial value of a static variable
    pub value: Value,
    /// Whether writes are rejected
    pub is_const: bool,
    /// Whether the property belongs to the class rather than instances
    pub is_static: bool,
}

/// A named table of integer values.
#[derive(Debug, Clone)]
pub struct EnumInfo {
    /// Enum name
    pub name: String,
    /// Value names in declaration order
    pub values: IndexMap<String, i64>,
}

/// A single named integer bound directly on a class.
#[derive(Debug, Clone)]
pub struct EnumValueInfo {
    /// Value name
    pub name: String,
    /// The integer
    pub value: i64,
}

/// A registered class.
#[derive(Debug, Clone)]
pub struct ClassInfo {
    /// Class name
    pub name: String,
    /// Parent class name, empty for a root class
    pub parent: String,
}

/// Coarse classification of a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    /// A class
    Class,
    /// An instance method
    Method,
    /// A static function
    StaticFunction,
    /// A data member
    Property,
    /// A static variable
    StaticProperty,
    /// A constant
    Constant,
    /// An enum table
    Enum,
    /// A single enum value
    EnumValue,
}

/// Metadata of any member kind.
#[derive(Debug, Clone)]
pub enum MemberInfo {
    /// Class metadata
    Class(Rc<ClassInfo>),
    /// Method or static function
    Method(Rc<MethodInfo>),
    /// Member, static variable or constant
    Property(Rc<PropertyInfo>),
    /// Enum table
    Enum(Rc<EnumInfo>),
    /// Enum value
    EnumValue(Rc<EnumValueInfo>),
}

impl MemberInfo {
    /// The member's name
    pub fn name(&self) -> &str {
        match self {
            MemberInfo::Class(c) => &c.name,
            MemberInfo::Method(m) => &m.name,
            MemberInfo::Property(p) => &p.name,
            MemberInfo::Enum(e) => &e.name,
            MemberInfo::EnumValue(v) => &v.name,
        }
    }

    /// The member's kind
    pub fn kind(&self) -> MemberKind {
        match self {
            MemberInfo::Class(_) => MemberKind::Class,
            MemberInfo::Method(m) if m.is_static => MemberKind::StaticFunction,
            MemberInfo::Method(_) => MemberKind::Method,
            MemberInfo::Property(p) if p.is_const => MemberKind::Constant,
            MemberInfo::Property(p) if p.is_static => MemberKind::StaticProperty,
            MemberInfo::Property(_) => MemberKind::Property,
            MemberInfo::Enum(_) => MemberKind::Enum,
            MemberInfo::EnumValue(_) => MemberKind::EnumValue,
        }
    }
}
