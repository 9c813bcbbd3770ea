//! In-memory chain backend with deterministic, parameter-addressed
//! deployment.
//!
//! `LocalChain` implements both primitives against process-local state. Its
//! idempotency policy is explicit: two deploys are "the same deployment"
//! when the SHA-256 digest of the unit name and the canonical JSON of the
//! resolved constructor arguments match. The identifier is derived from that
//! digest, so identical parameters always yield the identical address, and
//! re-running a plan reuses existing deployments instead of repeating them.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use alloy_core::primitives::{Address, Bytes};
use sha2::{Digest, Sha256};

use crate::env::{CallPrimitive, DeployPrimitive};
use crate::error::{CallError, DeployError};
use crate::step::ArgValue;

#[derive(Debug, Clone, PartialEq, Eq)]
struct DeployedUnit {
    identifier: Address,
    constructor_args: Vec<ArgValue>,
    digest: [u8; 32],
}

/// One recorded method invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallRecord {
    pub target: Address,
    pub method: String,
    pub args: Vec<ArgValue>,
    pub caller: Address,
}

#[derive(Debug, Default)]
struct LocalState {
    deployed: BTreeMap<String, DeployedUnit>,
    calls: Vec<CallRecord>,
    deploys_executed: u64,
    deploys_skipped: u64,
}

/// Process-local backend serving both primitive roles.
///
/// State survives across runs within the process, which is what makes
/// re-run idempotence observable: the second run of the same plan performs
/// zero new deploy side effects.
#[derive(Debug, Default)]
pub struct LocalChain {
    state: Mutex<LocalState>,
}

impl LocalChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Digest of the deployment-relevant parameters.
    ///
    /// Deterministic: serialization goes through canonical JSON so the same
    /// unit name and arguments always hash identically.
    fn deployment_digest(unit: &str, args: &[ArgValue]) -> [u8; 32] {
        let json =
            serde_json::to_string(args).expect("argument serialization should never fail");

        let mut hasher = Sha256::new();
        hasher.update(unit.as_bytes());
        hasher.update(json.as_bytes());
        hasher.finalize().into()
    }

    fn state(&self) -> MutexGuard<'_, LocalState> {
        self.state.lock().expect("local chain state lock poisoned")
    }

    /// The identifier of a deployed unit, if present.
    pub fn identifier_of(&self, unit: &str) -> Option<Address> {
        self.state().deployed.get(unit).map(|d| d.identifier)
    }

    /// The constructor arguments a unit was deployed with.
    pub fn constructor_args(&self, unit: &str) -> Option<Vec<ArgValue>> {
        self.state()
            .deployed
            .get(unit)
            .map(|d| d.constructor_args.clone())
    }

    /// Number of deploys that actually created a unit.
    pub fn deploys_executed(&self) -> u64 {
        self.state().deploys_executed
    }

    /// Number of deploys answered from existing state.
    pub fn deploys_skipped(&self) -> u64 {
        self.state().deploys_skipped
    }

    /// Every method invocation recorded so far, in order.
    pub fn calls(&self) -> Vec<CallRecord> {
        self.state().calls.clone()
    }
}

impl DeployPrimitive for LocalChain {
    async fn deploy(&self, unit: &str, args: &[ArgValue]) -> Result<Address, DeployError> {
        let digest = Self::deployment_digest(unit, args);
        tracing::debug!(unit = %unit, params_digest = %hex::encode(digest), "Computed deployment digest");
        let mut state = self.state();

        if let Some(existing) = state.deployed.get(unit) {
            if existing.digest == digest {
                let identifier = existing.identifier;
                state.deploys_skipped += 1;
                tracing::info!(
                    unit = %unit,
                    identifier = %identifier,
                    "Unit already deployed with the same parameters, reusing identifier"
                );
                return Ok(identifier);
            }
            tracing::info!(unit = %unit, "Constructor parameters changed, redeploying");
        }

        // Ethereum-style address: the trailing 20 bytes of the digest.
        let identifier = Address::from_slice(&digest[12..]);
        state.deployed.insert(
            unit.to_string(),
            DeployedUnit {
                identifier,
                constructor_args: args.to_vec(),
                digest,
            },
        );
        state.deploys_executed += 1;

        Ok(identifier)
    }
}

impl CallPrimitive for LocalChain {
    async fn call(
        &self,
        target: Address,
        method: &str,
        args: &[ArgValue],
        caller: Address,
    ) -> Result<Bytes, CallError> {
        let mut state = self.state();

        if !state.deployed.values().any(|d| d.identifier == target) {
            return Err(CallError::new(format!("no unit deployed at {target}")));
        }

        state.calls.push(CallRecord {
            target,
            method: method.to_string(),
            args: args.to_vec(),
            caller,
        });

        Ok(Bytes::new())
    }
}
