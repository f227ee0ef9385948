//! Name-keyed stores for interface and type definitions.
//!
//! # Responsibility
//! - Hold the definition snapshot current for each registered name.
//! - Apply naming rules and the configured re-registration policy.
//!
//! # Invariants
//! - Entries are added or replaced; removal happens only when the kernel
//!   hands a name over to the other registry.
//! - A stored snapshot is never mutated; replacement swaps the `Rc`.
//! - Names are identifiers (`[A-Za-z_$][A-Za-z0-9_$]*`).

use crate::config::RegistrationPolicy;
use crate::error::{ContractError, ContractResult};
use crate::kind::KindDef;
use crate::shape::ShapeDefinition;
use log::info;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::rc::Rc;

static IDENTIFIER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("valid identifier regex"));

/// Returns whether `name` can be used to register an interface or type.
pub fn is_valid_contract_name(name: &str) -> bool {
    IDENTIFIER_RE.is_match(name)
}

fn check_name<T>(
    name: &str,
    entries: &BTreeMap<String, T>,
    policy: RegistrationPolicy,
) -> ContractResult<()> {
    if !is_valid_contract_name(name) {
        return Err(ContractError::InvalidName(name.to_string()));
    }
    if policy == RegistrationPolicy::Reject && entries.contains_key(name) {
        return Err(ContractError::AlreadyRegistered(name.to_string()));
    }
    Ok(())
}

/// Interface definitions keyed by name.
#[derive(Debug, Default)]
pub struct ShapeRegistry {
    entries: BTreeMap<String, Rc<ShapeDefinition>>,
}

impl ShapeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `fields` under `name`, merged over `base` when given.
    ///
    /// # Errors
    /// - `InvalidName` when `name` is not an identifier.
    /// - `AlreadyRegistered` when `name` exists and `policy` is `Reject`.
    /// - `UnknownShape` when `base` is not registered.
    pub fn register(
        &mut self,
        name: &str,
        fields: ShapeDefinition,
        base: Option<&str>,
        policy: RegistrationPolicy,
    ) -> ContractResult<Rc<ShapeDefinition>> {
        check_name(name, &self.entries, policy)?;

        let definition = match base {
            Some(base_name) => {
                let base_shape = self
                    .entries
                    .get(base_name)
                    .ok_or_else(|| ContractError::UnknownShape(base_name.to_string()))?;
                ShapeDefinition::extending(base_shape, fields)
            }
            None => fields,
        };

        let definition = Rc::new(definition);
        let replaced = self
            .entries
            .insert(name.to_string(), Rc::clone(&definition))
            .is_some();
        info!(
            "event=interface_register module=registry status=ok name={} fields={} base={} replaced={}",
            name,
            definition.len(),
            base.unwrap_or("-"),
            replaced
        );
        Ok(definition)
    }

    pub fn get(&self, name: &str) -> Option<Rc<ShapeDefinition>> {
        self.entries.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Drops `name`, returning whether it was present.
    pub(crate) fn evict(&mut self, name: &str) -> bool {
        let evicted = self.entries.remove(name).is_some();
        if evicted {
            info!("event=interface_evict module=registry status=ok name={name}");
        }
        evicted
    }

    /// Returns sorted interface names.
    pub fn names(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Type (named kind) definitions keyed by name.
#[derive(Debug, Default)]
pub struct KindRegistry {
    entries: BTreeMap<String, Rc<KindDef>>,
}

impl KindRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `kind` under `name`.
    ///
    /// # Errors
    /// - `InvalidName` when `name` is not an identifier.
    /// - `AlreadyRegistered` when `name` exists and `policy` is `Reject`.
    pub fn register(
        &mut self,
        name: &str,
        kind: KindDef,
        policy: RegistrationPolicy,
    ) -> ContractResult<Rc<KindDef>> {
        check_name(name, &self.entries, policy)?;

        let kind = Rc::new(kind);
        let replaced = self
            .entries
            .insert(name.to_string(), Rc::clone(&kind))
            .is_some();
        info!(
            "event=type_register module=registry status=ok name={} kind={} replaced={}",
            name, kind, replaced
        );
        Ok(kind)
    }

    pub fn get(&self, name: &str) -> Option<Rc<KindDef>> {
        self.entries.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Drops `name`, returning whether it was present.
    pub(crate) fn evict(&mut self, name: &str) -> bool {
        let evicted = self.entries.remove(name).is_some();
        if evicted {
            info!("event=type_evict module=registry status=ok name={name}");
        }
        evicted
    }

    /// Returns sorted type names.
    pub fn names(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
