//! Runtime contract kernel.
//!
//! Named interfaces and types are registered on a caller-owned
//! `ContractKernel`; the constructors it returns produce guarded values that
//! check every read and write. `curry` and `freeze` are independent adapters
//! that work on any function or record.

pub mod config;
pub mod curry;
pub mod document;
pub mod error;
pub mod freeze;
pub mod guard;
pub mod kernel;
pub mod kind;
pub mod logging;
pub mod registry;
pub mod shape;
pub mod value;

pub use config::{KernelConfig, RegistrationPolicy, SeedPolicy};
pub use curry::{curry, func, Applied, Curried};
pub use document::{ContractDocument, DocumentError, InterfaceDeclaration, LoadSummary};
pub use error::{ContractError, ContractResult, FieldAccess};
pub use freeze::{freeze, immutable, FrozenObject};
pub use guard::kind_guard::{GuardedKind, KindConstructor, VALUE_ACCESSOR};
pub use guard::shape_guard::{GuardedShape, ShapeConstructor};
pub use guard::InstanceId;
pub use kernel::ContractKernel;
pub use kind::{satisfies, KindDef, KindTag};
pub use logging::{default_log_level, init_logging, logging_status};
pub use shape::ShapeDefinition;
pub use value::{ArrayRef, Category, Function, ObjectRef, Value};

/// Host-name alias of [`satisfies`].
pub fn check_type(value: &Value, kind: &KindDef) -> bool {
    satisfies(value, kind)
}

/// Minimal health-check API for embedding hosts.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{check_type, core_version, ping, KindDef, Value};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn core_version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn check_type_delegates_to_checker() {
        assert!(check_type(&Value::from(1), &KindDef::number()));
        assert!(!check_type(&Value::Null, &KindDef::object()));
    }
}
