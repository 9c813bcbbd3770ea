//! Sequential execution engine for migration plans.

use crate::env::{CallPrimitive, DeployPrimitive, Environment};
use crate::error::{RunFailure, StepError};
use crate::registry::DeploymentRegistry;
use crate::step::{Step, StepAction, resolve_args};

/// Executes an ordered list of [`Step`]s exactly once, in order.
///
/// Steps run strictly sequentially: step N+1 never begins before step N
/// completes, because later steps may consume identifiers produced by
/// earlier ones. The runner exclusively owns the [`DeploymentRegistry`] for
/// the duration of a run, so no locking is needed around it.
///
/// # Example
///
/// ```no_run
/// use convoy_migrate::{Arg, CallerSelector, MigrationRunner, Step};
///
/// let runner = MigrationRunner::new()
///     .then(Step::deploy("NodeContract", []))
///     .then(Step::deploy("UserContract", [Arg::address_of("NodeContract")]))
///     .then(Step::call("UserContract", "connector", [], CallerSelector::First));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MigrationRunner {
    steps: Vec<Step>,
}

impl MigrationRunner {
    /// An empty plan. Running it succeeds trivially with an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_steps(steps: impl IntoIterator<Item = Step>) -> Self {
        Self {
            steps: steps.into_iter().collect(),
        }
    }

    /// Append a step to the end of the plan.
    pub fn then(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Execute the plan against `env`.
    ///
    /// Halts on the first failing step; the returned [`RunFailure`] carries
    /// the failing step index and the registry as populated so far. Units
    /// already deployed stay deployed; there is no rollback and no retry.
    pub async fn run<D, C>(
        &self,
        env: &Environment<D, C>,
    ) -> Result<DeploymentRegistry, RunFailure>
    where
        D: DeployPrimitive,
        C: CallPrimitive,
    {
        let mut registry = DeploymentRegistry::new();

        for (index, step) in self.steps.iter().enumerate() {
            if !step.runs_on(&env.network) {
                tracing::info!(
                    step = index,
                    unit = step.unit(),
                    network = %env.network,
                    "Step not enabled for this network, skipping"
                );
                continue;
            }

            if let Err(error) = execute_step(step, env, &mut registry).await {
                tracing::error!(step = index, %error, "Migration halted");
                return Err(RunFailure {
                    step: index,
                    error,
                    registry,
                });
            }
        }

        Ok(registry)
    }
}

async fn execute_step<D, C>(
    step: &Step,
    env: &Environment<D, C>,
    registry: &mut DeploymentRegistry,
) -> Result<(), StepError>
where
    D: DeployPrimitive,
    C: CallPrimitive,
{
    match &step.action {
        StepAction::Deploy { unit, args } => {
            // Argument resolution happens before the primitive is invoked,
            // so a forward reference never causes a deploy side effect.
            let resolved = resolve_args(args, registry)?;

            tracing::info!(unit = %unit, "Deploying unit...");
            let identifier = env
                .deploy
                .deploy(unit, &resolved)
                .await
                .map_err(|source| StepError::Deploy {
                    unit: unit.clone(),
                    source,
                })?;

            registry.record(unit, identifier)?;
            tracing::info!(unit = %unit, identifier = %identifier, "Unit deployed");
        }
        StepAction::Call {
            unit,
            method,
            args,
            caller,
        } => {
            let target = registry.resolve(unit)?;
            let resolved = resolve_args(args, registry)?;
            let caller = caller.resolve(&env.accounts)?;

            tracing::info!(unit = %unit, method = %method, caller = %caller, "Calling unit...");
            let _ = env
                .call
                .call(target, method, &resolved, caller)
                .await
                .map_err(|source| StepError::Call {
                    unit: unit.clone(),
                    method: method.clone(),
                    source,
                })?;
        }
    }

    Ok(())
}
