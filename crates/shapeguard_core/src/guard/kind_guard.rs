//! Type constructors and single-slot guarded values.

use crate::config::SeedPolicy;
use crate::error::{ContractError, ContractResult};
use crate::guard::InstanceId;
use crate::kind::{satisfies, KindDef};
use crate::value::Value;
use log::debug;
use std::rc::Rc;
use uuid::Uuid;

/// The only field name a guarded type instance answers to.
pub const VALUE_ACCESSOR: &str = "value";

/// Constructor handle returned by type registration.
#[derive(Debug, Clone)]
pub struct KindConstructor {
    name: Rc<str>,
    kind: Rc<KindDef>,
    seed_policy: SeedPolicy,
}

impl KindConstructor {
    pub(crate) fn new(name: &str, kind: Rc<KindDef>, seed_policy: SeedPolicy) -> Self {
        Self {
            name: Rc::from(name),
            kind,
            seed_policy,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn definition(&self) -> &KindDef {
        &self.kind
    }

    /// Boxes `initial` behind the type's kind check.
    ///
    /// # Errors
    /// - `TypeMismatch` when `initial` fails the kind and seeds are validated.
    pub fn construct(&self, initial: impl Into<Value>) -> ContractResult<GuardedKind> {
        let initial = initial.into();
        if self.seed_policy == SeedPolicy::Validate {
            check_value(&self.kind, &initial)?;
        }
        Ok(GuardedKind {
            id: Uuid::new_v4(),
            name: Rc::clone(&self.name),
            kind: Rc::clone(&self.kind),
            slot: initial,
        })
    }
}

/// A single value bound to one type, reachable only through `value`.
#[derive(Debug)]
pub struct GuardedKind {
    id: InstanceId,
    name: Rc<str>,
    kind: Rc<KindDef>,
    slot: Value,
}

impl GuardedKind {
    pub fn id(&self) -> InstanceId {
        self.id
    }

    pub fn type_name(&self) -> &str {
        &self.name
    }

    pub fn definition(&self) -> &KindDef {
        &self.kind
    }

    /// Reads through a named accessor.
    ///
    /// # Errors
    /// - `InvalidAccess` for any field other than `value`.
    pub fn get(&self, field: &str) -> ContractResult<Value> {
        self.require_accessor(field)?;
        Ok(self.slot.clone())
    }

    /// Writes through a named accessor.
    ///
    /// # Errors
    /// - `InvalidAccess` for any field other than `value`.
    /// - `TypeMismatch` when `value` fails the type's kind.
    pub fn set(&mut self, field: &str, value: impl Into<Value>) -> ContractResult<()> {
        self.require_accessor(field)?;
        self.set_value(value)
    }

    pub fn value(&self) -> &Value {
        &self.slot
    }

    /// Replaces the held value after the kind check.
    pub fn set_value(&mut self, value: impl Into<Value>) -> ContractResult<()> {
        let value = value.into();
        if let Err(err) = check_value(&self.kind, &value) {
            self.log_rejection(VALUE_ACCESSOR, &err);
            return Err(err);
        }
        self.slot = value;
        Ok(())
    }

    pub fn into_value(self) -> Value {
        self.slot
    }

    fn require_accessor(&self, field: &str) -> ContractResult<()> {
        if field == VALUE_ACCESSOR {
            return Ok(());
        }
        let err = ContractError::InvalidAccess {
            kind: self.name.to_string(),
            field: field.to_string(),
        };
        self.log_rejection(field, &err);
        Err(err)
    }

    fn log_rejection(&self, field: &str, err: &ContractError) {
        debug!(
            "event=guard_reject module=guard status=error instance={} type={} field={} reason={}",
            self.id,
            self.name,
            field,
            err.code()
        );
    }
}

fn check_value(kind: &KindDef, value: &Value) -> ContractResult<()> {
    if satisfies(value, kind) {
        return Ok(());
    }
    Err(ContractError::TypeMismatch {
        field: None,
        expected: kind.clone(),
        actual: value.category(),
    })
}
