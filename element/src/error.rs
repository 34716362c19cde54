use std::error::Error;
use std::fmt;

use crate::capability::Operator;

/// The ways an operation on an `Element` or a list of them can be refused
#[derive(Clone, Debug, PartialEq)]
pub enum ErrorKind {
    /// The operation needs an occupied Element but the Element is empty
    AccessError,
    /// The occupant is not of the requested concrete type
    CastError {
        expected: &'static str,
        found: &'static str,
    },
    /// Two occupants of different concrete types were compared
    TypeCompareError {
        lhs: &'static str,
        op: Operator,
        rhs: &'static str,
    },
    /// Same-typed operands whose type does not support the operator
    MissingCapability {
        type_tag: &'static str,
        op: Operator,
    },
    /// Checked positional access outside the container
    BoundsError { index: usize, length: usize },
}

/// An Element runtime error type
#[derive(Clone, Debug, PartialEq)]
pub struct RuntimeError {
    kind: ErrorKind,
}

impl RuntimeError {
    pub fn new(kind: ErrorKind) -> RuntimeError {
        RuntimeError { kind }
    }

    pub fn error_kind(&self) -> &ErrorKind {
        &self.kind
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind {
            ErrorKind::AccessError => write!(f, "bad element access"),
            ErrorKind::CastError { expected, found } => {
                write!(f, "element cast fail: expected {}, found {}", expected, found)
            }
            ErrorKind::TypeCompareError { lhs, op, rhs } => {
                write!(f, "compare error: {} {} {}", lhs, op, rhs)
            }
            ErrorKind::MissingCapability { type_tag, op } => {
                write!(f, "type {} does not support {}", type_tag, op)
            }
            ErrorKind::BoundsError { index, length } => write!(
                f,
                "Indexing bounds error: index {} but length is {}",
                index, length
            ),
        }
    }
}

impl Error for RuntimeError {}

/// Convenience shorthand function for building an empty-access error
pub fn err_access() -> RuntimeError {
    RuntimeError::new(ErrorKind::AccessError)
}

/// Convenience shorthand function for building a cast error
pub fn err_cast(expected: &'static str, found: &'static str) -> RuntimeError {
    RuntimeError::new(ErrorKind::CastError { expected, found })
}

/// Convenience shorthand function for building a cross-type comparison error
pub fn err_type_compare(lhs: &'static str, op: Operator, rhs: &'static str) -> RuntimeError {
    RuntimeError::new(ErrorKind::TypeCompareError { lhs, op, rhs })
}

/// Convenience shorthand function for building a missing-capability error
pub fn err_missing_capability(type_tag: &'static str, op: Operator) -> RuntimeError {
    RuntimeError::new(ErrorKind::MissingCapability { type_tag, op })
}

/// Convenience shorthand function for building a bounds error
pub fn err_bounds(index: usize, length: usize) -> RuntimeError {
    RuntimeError::new(ErrorKind::BoundsError { index, length })
}
