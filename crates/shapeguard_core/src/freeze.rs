//! Read-only views over shared records.
//!
//! A frozen view blocks top-level writes and deletes made through it. It is
//! not a copy: mutations through another handle to the same record remain
//! visible, and nested records are not frozen.

use crate::error::{ContractError, ContractResult};
use crate::value::{ObjectRef, Value};
use log::debug;

/// Read-only facade over an `ObjectRef`.
#[derive(Debug, Clone)]
pub struct FrozenObject {
    target: ObjectRef,
}

/// Wraps `target` in a read-only view.
pub fn freeze(target: ObjectRef) -> FrozenObject {
    FrozenObject { target }
}

/// Alias of [`freeze`] under its host name.
pub fn immutable(target: ObjectRef) -> FrozenObject {
    freeze(target)
}

impl FrozenObject {
    /// Reads the live value for `key`; absent keys read as `Undefined`.
    pub fn get(&self, key: &str) -> Value {
        self.target.get(key).unwrap_or_default()
    }

    /// Always fails with `ImmutableWrite`.
    pub fn set(&self, key: &str, _value: impl Into<Value>) -> ContractResult<()> {
        debug!("event=frozen_reject module=freeze status=error op=write key={key}");
        Err(ContractError::ImmutableWrite {
            key: key.to_string(),
        })
    }

    /// Always fails with `ImmutableDelete`.
    pub fn delete(&self, key: &str) -> ContractResult<()> {
        debug!("event=frozen_reject module=freeze status=error op=delete key={key}");
        Err(ContractError::ImmutableDelete {
            key: key.to_string(),
        })
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.target.contains_key(key)
    }

    pub fn keys(&self) -> Vec<String> {
        self.target.keys()
    }

    pub fn len(&self) -> usize {
        self.target.len()
    }

    pub fn is_empty(&self) -> bool {
        self.target.is_empty()
    }
}
