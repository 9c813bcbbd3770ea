//! Error types surfaced by a migration run.

use thiserror::Error;

use crate::registry::DeploymentRegistry;

/// Rejection reported by a deploy primitive.
///
/// Carries the environment's reason verbatim (bad constructor arguments,
/// creation rejected, resource exhaustion, network unreachable).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct DeployError {
    pub reason: String,
}

impl DeployError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Rejection reported by a call primitive.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct CallError {
    pub reason: String,
}

impl CallError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Failure of a single migration step.
///
/// `UnresolvedDependency` and `CallerUnavailable` indicate a malformed step
/// sequence and are raised before the corresponding primitive is invoked.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StepError {
    /// The deploy primitive rejected the unit.
    #[error("deploy of `{unit}` failed: {source}")]
    Deploy {
        unit: String,
        source: DeployError,
    },

    /// The call primitive rejected the invocation.
    #[error("call of `{method}` on `{unit}` failed: {source}")]
    Call {
        unit: String,
        method: String,
        source: CallError,
    },

    /// A step referenced a unit that no earlier step deployed.
    #[error("step references `{unit}` before any step deployed it")]
    UnresolvedDependency { unit: String },

    /// A caller selector indexed past the environment's identity list.
    #[error("caller index {index} is out of range ({available} identities available)")]
    CallerUnavailable { index: usize, available: usize },

    /// The environment returned a different identifier for a unit already
    /// recorded in this run.
    #[error("`{unit}` resolved to a different identifier within the same run")]
    IdentifierConflict { unit: String },
}

/// A halted migration run.
///
/// The registry holds every unit recorded before the failing step, so a
/// caller can diagnose partial progress or resume manually by re-running the
/// sequence against an idempotent deploy primitive.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("migration halted at step {step}: {error}")]
pub struct RunFailure {
    /// Zero-based index of the failing step in the plan.
    pub step: usize,
    #[source]
    pub error: StepError,
    /// Units recorded before the failure.
    pub registry: DeploymentRegistry,
}
