//! Interface constructors and guarded interface instances.

use crate::config::SeedPolicy;
use crate::error::{ContractError, ContractResult, FieldAccess};
use crate::guard::InstanceId;
use crate::kind::satisfies;
use crate::shape::ShapeDefinition;
use crate::value::{ObjectRef, Value};
use log::debug;
use std::collections::BTreeMap;
use std::rc::Rc;
use uuid::Uuid;

/// Constructor handle returned by interface registration.
///
/// Holds the definition snapshot current at registration; replacing the
/// registry entry later does not change what this handle enforces.
#[derive(Debug, Clone)]
pub struct ShapeConstructor {
    name: Rc<str>,
    shape: Rc<ShapeDefinition>,
    seed_policy: SeedPolicy,
}

impl ShapeConstructor {
    pub(crate) fn new(name: &str, shape: Rc<ShapeDefinition>, seed_policy: SeedPolicy) -> Self {
        Self {
            name: Rc::from(name),
            shape,
            seed_policy,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn definition(&self) -> &ShapeDefinition {
        &self.shape
    }

    /// Constructs an instance over a fresh empty record.
    pub fn construct(&self) -> GuardedShape {
        GuardedShape::new(Rc::clone(&self.name), Rc::clone(&self.shape), ObjectRef::new())
    }

    /// Constructs an instance from `seed`.
    ///
    /// With `SeedPolicy::Validate`, every present key must be declared and
    /// every value must satisfy its kind; the instance then owns a shallow
    /// copy of `seed`, so later writes through `seed` do not reach it. With
    /// `SeedPolicy::Trust`, the instance shares `seed` unchecked and writes
    /// through either handle are visible to the other.
    ///
    /// # Errors
    /// - `UnknownField` for an undeclared seed key (validated seeds only).
    /// - `TypeMismatch` for a seed value failing its kind (validated seeds only).
    pub fn construct_with(&self, seed: ObjectRef) -> ContractResult<GuardedShape> {
        let record = match self.seed_policy {
            SeedPolicy::Validate => {
                let entries = seed.snapshot();
                for (field, value) in &entries {
                    check_write(&self.name, &self.shape, field, value)?;
                }
                ObjectRef::from_entries(entries)
            }
            SeedPolicy::Trust => seed,
        };
        Ok(GuardedShape::new(
            Rc::clone(&self.name),
            Rc::clone(&self.shape),
            record,
        ))
    }
}

/// A record bound to one interface definition.
///
/// Unless built from a trusted seed, the backing record is private to the
/// instance: every key on it is declared and every stored value satisfies its
/// field kind for the whole instance lifetime.
#[derive(Debug)]
pub struct GuardedShape {
    id: InstanceId,
    name: Rc<str>,
    shape: Rc<ShapeDefinition>,
    record: ObjectRef,
}

impl GuardedShape {
    fn new(name: Rc<str>, shape: Rc<ShapeDefinition>, record: ObjectRef) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            shape,
            record,
        }
    }

    pub fn id(&self) -> InstanceId {
        self.id
    }

    pub fn interface_name(&self) -> &str {
        &self.name
    }

    pub fn definition(&self) -> &ShapeDefinition {
        &self.shape
    }

    /// Reads `field`, yielding `Value::Undefined` when it was never written.
    ///
    /// # Errors
    /// - `UnknownField` when `field` is not declared on the interface.
    pub fn get(&self, field: &str) -> ContractResult<Value> {
        if !self.shape.declares(field) {
            let err = ContractError::UnknownField {
                shape: self.name.to_string(),
                field: field.to_string(),
                access: FieldAccess::Read,
            };
            self.log_rejection(field, &err);
            return Err(err);
        }
        Ok(self.record.get(field).unwrap_or_default())
    }

    /// Writes `value` to `field` after checking declaration and kind.
    ///
    /// # Errors
    /// - `UnknownField` when `field` is not declared on the interface.
    /// - `TypeMismatch` when `value` fails the field's kind.
    pub fn set(&mut self, field: &str, value: impl Into<Value>) -> ContractResult<()> {
        let value = value.into();
        if let Err(err) = check_write(&self.name, &self.shape, field, &value) {
            self.log_rejection(field, &err);
            return Err(err);
        }
        self.record.insert(field, value);
        Ok(())
    }

    /// Returns keys currently present on the backing record.
    pub fn keys(&self) -> Vec<String> {
        self.record.keys()
    }

    /// Copies the current field values out of the backing record.
    pub fn snapshot(&self) -> BTreeMap<String, Value> {
        self.record.snapshot()
    }

    pub fn to_json(&self) -> serde_json::Value {
        Value::Object(self.record.clone()).to_json()
    }

    fn log_rejection(&self, field: &str, err: &ContractError) {
        debug!(
            "event=guard_reject module=guard status=error instance={} interface={} field={} reason={}",
            self.id,
            self.name,
            field,
            err.code()
        );
    }
}

fn check_write(
    name: &str,
    shape: &ShapeDefinition,
    field: &str,
    value: &Value,
) -> ContractResult<()> {
    if !shape.declares(field) {
        return Err(ContractError::UnknownField {
            shape: name.to_string(),
            field: field.to_string(),
            access: FieldAccess::Write,
        });
    }
    if let Some(kind) = shape.kind_of(field) {
        if !satisfies(value, kind) {
            return Err(ContractError::TypeMismatch {
                field: Some(field.to_string()),
                expected: kind.clone(),
                actual: value.category(),
            });
        }
    }
    Ok(())
}
