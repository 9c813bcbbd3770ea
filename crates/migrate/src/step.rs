//! Declarative step model for a migration plan.
//!
//! A plan is an ordered list of [`Step`]s built by the caller; ordering is a
//! first-class, inspectable property of the list rather than something
//! inferred from file naming or load order. Steps are read-only inputs and
//! are never mutated by a run.

use alloy_core::primitives::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};

use crate::error::StepError;
use crate::registry::DeploymentRegistry;

/// A concrete constructor or call argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_more::From)]
pub enum ArgValue {
    Address(Address),
    Uint(U256),
    Bool(bool),
    String(String),
    Bytes(Bytes),
}

impl From<&str> for ArgValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

/// A declarative argument, resolved against the registry at execution time.
///
/// Resolution is a pure function of the argument and the current registry,
/// so runs are deterministic and replayable given the same environment
/// responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Arg {
    /// A literal value, known when the plan is built.
    Value(ArgValue),
    /// The identifier of a unit deployed by an earlier step.
    AddressOf(String),
}

impl Arg {
    pub fn value(value: impl Into<ArgValue>) -> Self {
        Self::Value(value.into())
    }

    pub fn address_of(unit: impl Into<String>) -> Self {
        Self::AddressOf(unit.into())
    }

    pub(crate) fn resolve(&self, registry: &DeploymentRegistry) -> Result<ArgValue, StepError> {
        match self {
            Self::Value(value) => Ok(value.clone()),
            Self::AddressOf(unit) => registry.resolve(unit).map(ArgValue::Address),
        }
    }
}

/// Resolve a full argument list against the registry.
///
/// Fails on the first unresolved reference, before any primitive is invoked.
pub(crate) fn resolve_args(
    args: &[Arg],
    registry: &DeploymentRegistry,
) -> Result<Vec<ArgValue>, StepError> {
    args.iter().map(|arg| arg.resolve(registry)).collect()
}

/// Selects a caller identity from the environment's account list.
///
/// Resolved at call time, never stored as a concrete address in the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallerSelector {
    /// The first identity in the account list.
    First,
    /// The identity at a fixed position in the account list.
    Index(usize),
}

impl CallerSelector {
    pub(crate) fn resolve(&self, accounts: &[Address]) -> Result<Address, StepError> {
        let index = match self {
            Self::First => 0,
            Self::Index(index) => *index,
        };
        accounts
            .get(index)
            .copied()
            .ok_or(StepError::CallerUnavailable {
                index,
                available: accounts.len(),
            })
    }
}

/// The action a step performs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepAction {
    /// Deploy a unit with the given constructor arguments.
    Deploy { unit: String, args: Vec<Arg> },
    /// Invoke a method on an already-deployed unit.
    Call {
        unit: String,
        method: String,
        args: Vec<Arg>,
        caller: CallerSelector,
    },
}

/// One ordered action in a migration plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub action: StepAction,
    /// Network labels this step runs on. `None` runs everywhere.
    pub networks: Option<Vec<String>>,
}

impl Step {
    /// A step deploying `unit` with the given constructor arguments.
    pub fn deploy(unit: impl Into<String>, args: impl IntoIterator<Item = Arg>) -> Self {
        Self {
            action: StepAction::Deploy {
                unit: unit.into(),
                args: args.into_iter().collect(),
            },
            networks: None,
        }
    }

    /// A step calling `method` on the already-deployed `unit`.
    pub fn call(
        unit: impl Into<String>,
        method: impl Into<String>,
        args: impl IntoIterator<Item = Arg>,
        caller: CallerSelector,
    ) -> Self {
        Self {
            action: StepAction::Call {
                unit: unit.into(),
                method: method.into(),
                args: args.into_iter().collect(),
                caller,
            },
            networks: None,
        }
    }

    /// Restrict this step to the given network labels.
    pub fn only_on<I, S>(mut self, networks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.networks = Some(networks.into_iter().map(Into::into).collect());
        self
    }

    /// The unit this step deploys or calls.
    pub fn unit(&self) -> &str {
        match &self.action {
            StepAction::Deploy { unit, .. } | StepAction::Call { unit, .. } => unit,
        }
    }

    pub(crate) fn runs_on(&self, network: &str) -> bool {
        match &self.networks {
            None => true,
            Some(networks) => networks.iter().any(|label| label == network),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_args_resolve_without_a_registry_entry() {
        let registry = DeploymentRegistry::new();
        let args = vec![Arg::value(true), Arg::value("issuer"), Arg::value(U256::from(42u64))];

        let resolved = resolve_args(&args, &registry).unwrap();
        assert_eq!(
            resolved,
            vec![
                ArgValue::Bool(true),
                ArgValue::String("issuer".to_string()),
                ArgValue::Uint(U256::from(42u64)),
            ]
        );
    }

    #[test]
    fn address_of_resolves_from_the_registry() {
        let mut registry = DeploymentRegistry::new();
        let id = Address::with_last_byte(9);
        registry.record("NodeContract", id).unwrap();

        let resolved = Arg::address_of("NodeContract").resolve(&registry).unwrap();
        assert_eq!(resolved, ArgValue::Address(id));
    }

    #[test]
    fn address_of_an_undeployed_unit_fails() {
        let registry = DeploymentRegistry::new();

        let result = Arg::address_of("NodeContract").resolve(&registry);
        assert_eq!(
            result,
            Err(StepError::UnresolvedDependency {
                unit: "NodeContract".to_string()
            })
        );
    }

    #[test]
    fn caller_selector_resolves_against_the_account_list() {
        let accounts = vec![Address::with_last_byte(1), Address::with_last_byte(2)];

        assert_eq!(
            CallerSelector::First.resolve(&accounts).unwrap(),
            accounts[0]
        );
        assert_eq!(
            CallerSelector::Index(1).resolve(&accounts).unwrap(),
            accounts[1]
        );
        assert_eq!(
            CallerSelector::Index(2).resolve(&accounts),
            Err(StepError::CallerUnavailable {
                index: 2,
                available: 2
            })
        );
    }

    #[test]
    fn network_filter_matches_labels() {
        let step = Step::deploy("Migrations", []).only_on(["development", "staging"]);

        assert!(step.runs_on("development"));
        assert!(step.runs_on("staging"));
        assert!(!step.runs_on("live"));

        let unfiltered = Step::deploy("Migrations", []);
        assert!(unfiltered.runs_on("live"));
    }
}
