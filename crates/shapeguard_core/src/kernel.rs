//! Contract kernel entry points.
//!
//! # Responsibility
//! - Own the interface and type registries for one program.
//! - Hand out constructor handles instead of installing global names.
//!
//! # Invariants
//! - The kernel is single-threaded (`Rc`-based) and caller-owned.
//! - A constructor enforces the definition current at its registration.
//! - Interfaces and types share one namespace: a name is bound to at most
//!   one of them at a time.
//!
//! # See also
//! - `config::KernelConfig` for seed and re-registration policies.

use crate::config::{KernelConfig, RegistrationPolicy};
use crate::document::{ContractDocument, LoadSummary};
use crate::error::{ContractError, ContractResult};
use crate::guard::kind_guard::KindConstructor;
use crate::guard::shape_guard::ShapeConstructor;
use crate::kind::KindDef;
use crate::registry::{KindRegistry, ShapeRegistry};
use crate::shape::ShapeDefinition;
use log::info;

/// Registry state plus configuration; replaces the host's global namespace.
#[derive(Debug, Default)]
pub struct ContractKernel {
    config: KernelConfig,
    shapes: ShapeRegistry,
    kinds: KindRegistry,
}

impl ContractKernel {
    pub fn new(config: KernelConfig) -> Self {
        Self {
            config,
            shapes: ShapeRegistry::new(),
            kinds: KindRegistry::new(),
        }
    }

    pub fn config(&self) -> &KernelConfig {
        &self.config
    }

    /// Registers an interface and returns its constructor.
    ///
    /// With `extends`, the base's fields are copied in first and `fields`
    /// override them.
    ///
    /// # Errors
    /// - `UnknownShape` when `extends` names an unregistered interface.
    /// - `InvalidName` / `AlreadyRegistered` per registry rules.
    /// - `AlreadyRegistered` when a type holds `name` and the policy is
    ///   `Reject`. Under `Replace` the type is evicted instead.
    pub fn define_interface(
        &mut self,
        name: &str,
        fields: ShapeDefinition,
        extends: Option<&str>,
    ) -> ContractResult<ShapeConstructor> {
        self.ensure_unclaimed(name, self.kinds.contains(name))?;
        let shape = self
            .shapes
            .register(name, fields, extends, self.config.registration_policy)?;
        self.kinds.evict(name);
        Ok(ShapeConstructor::new(name, shape, self.config.seed_policy))
    }

    /// Registers a type and returns its constructor.
    ///
    /// # Errors
    /// - `InvalidName` / `AlreadyRegistered` per registry rules.
    /// - `AlreadyRegistered` when an interface holds `name` and the policy is
    ///   `Reject`. Under `Replace` the interface is evicted instead.
    pub fn define_type(
        &mut self,
        name: &str,
        kind: impl Into<KindDef>,
    ) -> ContractResult<KindConstructor> {
        self.ensure_unclaimed(name, self.shapes.contains(name))?;
        let kind = self
            .kinds
            .register(name, kind.into(), self.config.registration_policy)?;
        self.shapes.evict(name);
        Ok(KindConstructor::new(name, kind, self.config.seed_policy))
    }

    fn ensure_unclaimed(&self, name: &str, held_elsewhere: bool) -> ContractResult<()> {
        if held_elsewhere && self.config.registration_policy == RegistrationPolicy::Reject {
            return Err(ContractError::AlreadyRegistered(name.to_string()));
        }
        Ok(())
    }

    /// Looks up the constructor currently registered for an interface.
    pub fn interface(&self, name: &str) -> ContractResult<ShapeConstructor> {
        self.shapes
            .get(name)
            .map(|shape| ShapeConstructor::new(name, shape, self.config.seed_policy))
            .ok_or_else(|| ContractError::UnknownShape(name.to_string()))
    }

    /// Looks up the constructor currently registered for a type.
    pub fn kind(&self, name: &str) -> ContractResult<KindConstructor> {
        self.kinds
            .get(name)
            .map(|kind| KindConstructor::new(name, kind, self.config.seed_policy))
            .ok_or_else(|| ContractError::UnknownKind(name.to_string()))
    }

    pub fn shape_definition(&self, name: &str) -> Option<ShapeDefinition> {
        self.shapes.get(name).map(|shape| (*shape).clone())
    }

    pub fn kind_definition(&self, name: &str) -> Option<KindDef> {
        self.kinds.get(name).map(|kind| (*kind).clone())
    }

    pub fn interface_names(&self) -> Vec<String> {
        self.shapes.names()
    }

    pub fn type_names(&self) -> Vec<String> {
        self.kinds.names()
    }

    /// Registers every type, then every interface in list order.
    ///
    /// Stops at the first failure; definitions registered before it stay.
    pub fn load_document(&mut self, document: &ContractDocument) -> ContractResult<LoadSummary> {
        let mut summary = LoadSummary::default();
        for (name, kind) in &document.kinds {
            self.define_type(name, kind.clone())?;
            summary.kinds += 1;
        }
        for declaration in &document.interfaces {
            self.define_interface(
                &declaration.name,
                declaration.fields.clone(),
                declaration.extends.as_deref(),
            )?;
            summary.interfaces += 1;
        }
        info!(
            "event=document_load module=kernel status=ok kinds={} interfaces={}",
            summary.kinds, summary.interfaces
        );
        Ok(summary)
    }
}
