//! Guarded value wrappers.
//!
//! # Responsibility
//! - Enforce a registered interface on every field read and write.
//! - Enforce a registered type on a single-slot box.
//!
//! # Invariants
//! - Rejected writes leave the stored value untouched.
//! - Guards take explicit `get`/`set` calls; there is no transparent
//!   property interception.

pub mod kind_guard;
pub mod shape_guard;

use uuid::Uuid;

/// Identity of one guarded instance, used to correlate diagnostic logs.
pub type InstanceId = Uuid;
