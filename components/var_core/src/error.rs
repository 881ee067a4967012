//! Error kinds and the error record raised by every fallible operation.
//!
//! Every failure in this crate (and in the native class layer built on top
//! of it) is reported as a [`VarError`] carrying exactly one [`ErrorKind`],
//! a human readable message and, optionally, the source context captured
//! at the failure site.

use std::fmt;

use thiserror::Error;

use crate::SourceInfo;

/// The closed set of error kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Internal invariant broken
    Bug,
    /// A required reference was missing
    NullPointer,
    /// The operator is not defined for the operand types
    OperatorNotSupported,
    /// An object capability was not overridden by its class
    NotImplemented,
    /// Integer or float division (or remainder) by zero
    ZeroDivision,
    /// A value had the wrong type
    TypeError,
    /// A value had the right type but an unusable content
    ValueError,
    /// Unknown, duplicate or read-only attribute
    AttributeError,
    /// Wrong number of arguments for a call
    InvalidArgCount,
    /// Index or position out of range
    InvalidIndex,
    /// Input/output failure
    IoError,
    /// Malformed source text
    SyntaxError,
    /// A runtime assertion failed
    Assertion,
    /// Source ended too early
    UnexpectedEof,
    /// Unknown identifier
    NameError,
    /// A variable hides another one
    VariableShadowing,
    /// A switch over an enum misses a case
    MissedEnumCase,
    /// A loop can never terminate
    NonTerminatingLoop,
    /// Code after an unconditional exit
    UnreachableCode,
    /// An expression statement without effect
    StandAloneExpression,
    /// An error re-raised from a handler
    Rethrow,
    /// Call depth exceeded
    StackOverflow,
}

impl ErrorKind {
    /// All kinds, in declaration order.
    pub const ALL: [ErrorKind; 22] = [
        ErrorKind::Bug,
        ErrorKind::NullPointer,
        ErrorKind::OperatorNotSupported,
        ErrorKind::NotImplemented,
        ErrorKind::ZeroDivision,
        ErrorKind::TypeError,
        ErrorKind::ValueError,
        ErrorKind::AttributeError,
        ErrorKind::InvalidArgCount,
        ErrorKind::InvalidIndex,
        ErrorKind::IoError,
        ErrorKind::SyntaxError,
        ErrorKind::Assertion,
        ErrorKind::UnexpectedEof,
        ErrorKind::NameError,
        ErrorKind::VariableShadowing,
        ErrorKind::MissedEnumCase,
        ErrorKind::NonTerminatingLoop,
        ErrorKind::UnreachableCode,
        ErrorKind::StandAloneExpression,
        ErrorKind::Rethrow,
        ErrorKind::StackOverflow,
    ];

    /// The name used when rendering the error.
    pub fn name(self) -> &'static str {
        match self {
            ErrorKind::Bug => "Bug",
            ErrorKind::NullPointer => "NullPointer",
            ErrorKind::OperatorNotSupported => "OperatorNotSupported",
            ErrorKind::NotImplemented => "NotImplemented",
            ErrorKind::ZeroDivision => "ZeroDivision",
            ErrorKind::TypeError => "TypeError",
            ErrorKind::ValueError => "ValueError",
            ErrorKind::AttributeError => "AttributeError",
            ErrorKind::InvalidArgCount => "InvalidArgCount",
            ErrorKind::InvalidIndex => "InvalidIndex",
            ErrorKind::IoError => "IoError",
            ErrorKind::SyntaxError => "SyntaxError",
            ErrorKind::Assertion => "Assertion",
            ErrorKind::UnexpectedEof => "UnexpectedEof",
            ErrorKind::NameError => "NameError",
            ErrorKind::VariableShadowing => "VariableShadowing",
            ErrorKind::MissedEnumCase => "MissedEnumCase",
            ErrorKind::NonTerminatingLoop => "NonTerminatingLoop",
            ErrorKind::UnreachableCode => "UnreachableCode",
            ErrorKind::StandAloneExpression => "StandAloneExpression",
            ErrorKind::Rethrow => "Rethrow",
            ErrorKind::StackOverflow => "StackOverflow",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An error with its kind, message and optional source context.
///
/// # Examples
///
/// ```
/// use var_core::{ErrorKind, VarError};
///
/// let error = VarError::type_error("expected an int");
/// assert_eq!(error.kind, ErrorKind::TypeError);
/// assert_eq!(error.to_string(), "TypeError: expected an int");
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind}: {message}")]
pub struct VarError {
    /// The kind of failure
    pub kind: ErrorKind,
    /// Human-readable message
    pub message: String,
    /// Source context captured at the failure site, if any
    pub source_info: Option<Box<SourceInfo>>,
}

/// Result type for every fallible operation on values.
pub type VarResult<T> = Result<T, VarError>;

impl VarError {
    /// Create an error without source context
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        VarError {
            kind,
            message: message.into(),
            source_info: None,
        }
    }

    /// Attach (or replace) the source context
    pub fn with_source_info(mut self, info: SourceInfo) -> Self {
        self.source_info = Some(Box::new(info));
        self
    }

    /// Create a TypeError
    pub fn type_error(message: impl Into<String>) -> Self {
        VarError::new(ErrorKind::TypeError, message)
    }

    /// Create a ValueError
    pub fn value_error(message: impl Into<String>) -> Self {
        VarError::new(ErrorKind::ValueError, message)
    }

    /// Create an AttributeError
    pub fn attribute_error(message: impl Into<String>) -> Self {
        VarError::new(ErrorKind::AttributeError, message)
    }

    /// Create an InvalidIndex error
    pub fn invalid_index(message: impl Into<String>) -> Self {
        VarError::new(ErrorKind::InvalidIndex, message)
    }

    /// Create an InvalidArgCount error
    pub fn invalid_arg_count(message: impl Into<String>) -> Self {
        VarError::new(ErrorKind::InvalidArgCount, message)
    }

    /// Create a ZeroDivision error
    pub fn zero_division() -> Self {
        VarError::new(ErrorKind::ZeroDivision, "division by zero.")
    }

    /// Create a NotImplemented error for `capability` on `class_name`
    pub fn not_implemented(capability: &str, class_name: &str) -> Self {
        VarError::new(
            ErrorKind::NotImplemented,
            format!("operator {} not implemented on type \"{}\".", capability, class_name),
        )
    }

    /// Create an OperatorNotSupported error for a binary operator
    pub fn operator_not_supported(op: &str, lhs: &str, rhs: &str) -> Self {
        VarError::new(
            ErrorKind::OperatorNotSupported,
            format!("operator \"{}\" not supported on operands \"{}\" and \"{}\".", op, lhs, rhs),
        )
    }

    /// Create an InvalidIndex error for an index outside `0..size`
    pub fn index_out_of_range(index: i64, size: usize) -> Self {
        VarError::invalid_index(format!(
            "index {} out of range for size {}.",
            index, size
        ))
    }

    /// Render the error followed by the source snippet, when present.
    pub fn report(&self) -> String {
        match &self.source_info {
            Some(info) => format!("{}\n{}", self, info.render()),
            None => self.to_string(),
        }
    }
}
