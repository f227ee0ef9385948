//! Contract violation taxonomy shared by registries, guards and views.
//!
//! # Invariants
//! - Every error is raised before any mutation; a failed operation leaves
//!   stored state untouched.
//! - Display text mirrors the messages host code already matches on.

use crate::kind::KindDef;
use crate::value::Category;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ContractResult<T> = Result<T, ContractError>;

/// Direction of a field access, used to word `UnknownField` messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldAccess {
    Read,
    Write,
}

/// Contract kernel errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractError {
    /// An extension or lookup names an interface that was never registered.
    UnknownShape(String),
    /// A lookup names a type that was never registered.
    UnknownKind(String),
    UnknownField {
        shape: String,
        field: String,
        access: FieldAccess,
    },
    /// `field` is `None` for single-slot type instances.
    TypeMismatch {
        field: Option<String>,
        expected: KindDef,
        actual: Category,
    },
    InvalidAccess {
        kind: String,
        field: String,
    },
    ImmutableWrite {
        key: String,
    },
    ImmutableDelete {
        key: String,
    },
    InvalidName(String),
    AlreadyRegistered(String),
}

impl Display for ContractError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownShape(name) => write!(f, "Interface {name} does not exist"),
            Self::UnknownKind(name) => write!(f, "Type {name} does not exist"),
            Self::UnknownField {
                shape,
                field,
                access: FieldAccess::Write,
            } => write!(f, "Property '{field}' is not allowed on interface {shape}"),
            Self::UnknownField {
                shape,
                field,
                access: FieldAccess::Read,
            } => write!(f, "Property '{field}' does not exist on interface {shape}"),
            Self::TypeMismatch {
                field: Some(field),
                expected,
                actual,
            } => write!(f, "Property '{field}' should be '{expected}', got '{actual}'"),
            Self::TypeMismatch {
                field: None,
                expected,
                actual,
            } => write!(f, "Value should be '{expected}', got '{actual}'"),
            Self::InvalidAccess { kind, .. } => {
                write!(f, "Only 'value' property allowed for type {kind}")
            }
            Self::ImmutableWrite { .. } => write!(f, "Cannot modify top-level properties"),
            Self::ImmutableDelete { .. } => write!(f, "Cannot delete top-level properties"),
            Self::InvalidName(name) => {
                write!(f, "registration name is not a valid identifier: {name}")
            }
            Self::AlreadyRegistered(name) => write!(f, "name already registered: {name}"),
        }
    }
}

impl Error for ContractError {}

impl ContractError {
    /// Short stable code used in diagnostic log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownShape(_) => "unknown_shape",
            Self::UnknownKind(_) => "unknown_kind",
            Self::UnknownField { .. } => "unknown_field",
            Self::TypeMismatch { .. } => "type_mismatch",
            Self::InvalidAccess { .. } => "invalid_access",
            Self::ImmutableWrite { .. } => "immutable_write",
            Self::ImmutableDelete { .. } => "immutable_delete",
            Self::InvalidName(_) => "invalid_name",
            Self::AlreadyRegistered(_) => "already_registered",
        }
    }
}
