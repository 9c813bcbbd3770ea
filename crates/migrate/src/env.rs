//! Environment context supplied to a migration run.
//!
//! The environment is threaded explicitly into [`MigrationRunner::run`]
//! rather than living as process-wide state, so runs stay composable and
//! testable against mock primitives.
//!
//! [`MigrationRunner::run`]: crate::MigrationRunner::run

use std::future::Future;
use std::sync::Arc;

use alloy_core::primitives::{Address, Bytes};

use crate::error::{CallError, DeployError};
use crate::step::ArgValue;

/// Deploys a unit onto the target environment.
///
/// Implementations must be idempotent per unit per run context: a repeated
/// deploy with unchanged parameters returns the existing identifier without
/// a duplicate side effect. This lookup is the sole mechanism behind
/// skip-on-rerun; the runner keeps no parallel deployed-state ledger.
pub trait DeployPrimitive: Send + Sync {
    /// Deploy `unit` with the given constructor arguments, returning its
    /// identifier.
    fn deploy(
        &self,
        unit: &str,
        args: &[ArgValue],
    ) -> impl Future<Output = Result<Address, DeployError>> + Send;
}

/// Invokes a method on an already-deployed unit.
pub trait CallPrimitive: Send + Sync {
    /// Call `method` on the unit at `target` as `caller`.
    ///
    /// The returned bytes are whatever the unit produced; the runner never
    /// inspects them beyond propagating errors.
    fn call(
        &self,
        target: Address,
        method: &str,
        args: &[ArgValue],
        caller: Address,
    ) -> impl Future<Output = Result<Bytes, CallError>> + Send;
}

// Forwarding impls so a single shared backend can serve both primitive roles.

impl<T> DeployPrimitive for Arc<T>
where
    T: DeployPrimitive,
{
    fn deploy(
        &self,
        unit: &str,
        args: &[ArgValue],
    ) -> impl Future<Output = Result<Address, DeployError>> + Send {
        (**self).deploy(unit, args)
    }
}

impl<T> CallPrimitive for Arc<T>
where
    T: CallPrimitive,
{
    fn call(
        &self,
        target: Address,
        method: &str,
        args: &[ArgValue],
        caller: Address,
    ) -> impl Future<Output = Result<Bytes, CallError>> + Send {
        (**self).call(target, method, args, caller)
    }
}

/// Everything a run needs from the target environment.
///
/// Constructed by the driver and passed by reference into a run; the runner
/// never provisions networks or accounts itself.
pub struct Environment<D, C> {
    /// Network label, used only to filter steps.
    pub network: String,
    /// Available caller identities, in priority order. At least one.
    pub accounts: Vec<Address>,
    /// The deploy primitive.
    pub deploy: D,
    /// The call primitive.
    pub call: C,
}

impl<D, C> Environment<D, C>
where
    D: DeployPrimitive,
    C: CallPrimitive,
{
    pub fn new(network: impl Into<String>, accounts: Vec<Address>, deploy: D, call: C) -> Self {
        Self {
            network: network.into(),
            accounts,
            deploy,
            call,
        }
    }
}
