//! Run-scoped mapping from unit name to deployed identifier.

use std::collections::BTreeMap;

use alloy_core::primitives::Address;
use derive_more::Deref;
use serde::{Deserialize, Serialize};

use crate::error::StepError;

/// The units deployed so far in a run, keyed by name.
///
/// Populated strictly in step order. An entry, once present, never changes
/// within a run; the registry is discarded (or persisted by the caller) at
/// run end.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Deref)]
pub struct DeploymentRegistry(BTreeMap<String, Address>);

impl DeploymentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The identifier of a deployed unit, if any step deployed it.
    pub fn address_of(&self, unit: &str) -> Option<Address> {
        self.0.get(unit).copied()
    }

    /// Like [`Self::address_of`], but an absent unit is an
    /// [`StepError::UnresolvedDependency`].
    pub fn resolve(&self, unit: &str) -> Result<Address, StepError> {
        self.address_of(unit)
            .ok_or_else(|| StepError::UnresolvedDependency {
                unit: unit.to_string(),
            })
    }

    /// Record a deployed unit.
    ///
    /// Recording the same identifier twice is a no-op (the idempotent deploy
    /// path); recording a different identifier for a known unit violates the
    /// run invariant and fails.
    pub(crate) fn record(&mut self, unit: &str, identifier: Address) -> Result<(), StepError> {
        match self.0.get(unit) {
            None => {
                self.0.insert(unit.to_string(), identifier);
                Ok(())
            }
            Some(existing) if *existing == identifier => Ok(()),
            Some(_) => Err(StepError::IdentifierConflict {
                unit: unit.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_then_resolve() {
        let mut registry = DeploymentRegistry::new();
        let id = Address::with_last_byte(1);
        registry.record("NodeContract", id).unwrap();

        assert_eq!(registry.address_of("NodeContract"), Some(id));
        assert_eq!(registry.resolve("NodeContract").unwrap(), id);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn resolve_missing_unit_is_unresolved_dependency() {
        let registry = DeploymentRegistry::new();

        assert_eq!(
            registry.resolve("UserContract"),
            Err(StepError::UnresolvedDependency {
                unit: "UserContract".to_string()
            })
        );
    }

    #[test]
    fn recording_same_identifier_twice_is_a_noop() {
        let mut registry = DeploymentRegistry::new();
        let id = Address::with_last_byte(7);
        registry.record("NodeContract", id).unwrap();
        registry.record("NodeContract", id).unwrap();

        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn recording_a_different_identifier_is_a_conflict() {
        let mut registry = DeploymentRegistry::new();
        registry
            .record("NodeContract", Address::with_last_byte(1))
            .unwrap();

        let result = registry.record("NodeContract", Address::with_last_byte(2));
        assert_eq!(
            result,
            Err(StepError::IdentifierConflict {
                unit: "NodeContract".to_string()
            })
        );
        // First insert wins.
        assert_eq!(
            registry.address_of("NodeContract"),
            Some(Address::with_last_byte(1))
        );
    }
}
