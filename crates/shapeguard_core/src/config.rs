//! Kernel behaviour switches.
//!
//! Both switches default to the safer reading of an ambiguous contract:
//! seeds are validated, re-registration replaces.

use serde::{Deserialize, Serialize};

/// How construction-time seed values are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedPolicy {
    /// Seeds go through the same checks as writes.
    #[default]
    Validate,
    /// Seeds are stored unchecked; only later writes are checked.
    Trust,
}

/// What happens when a name is registered twice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationPolicy {
    /// The new definition silently replaces the registry entry.
    #[default]
    Replace,
    /// Re-registration fails with `AlreadyRegistered`.
    Reject,
}

/// Configuration for one `ContractKernel`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KernelConfig {
    pub seed_policy: SeedPolicy,
    pub registration_policy: RegistrationPolicy,
}

impl KernelConfig {
    /// Host-compatible settings: unchecked seeds, silent replacement.
    pub fn permissive() -> Self {
        Self {
            seed_policy: SeedPolicy::Trust,
            registration_policy: RegistrationPolicy::Replace,
        }
    }

    pub fn with_seed_policy(mut self, policy: SeedPolicy) -> Self {
        self.seed_policy = policy;
        self
    }

    pub fn with_registration_policy(mut self, policy: RegistrationPolicy) -> Self {
        self.registration_policy = policy;
        self
    }
}
