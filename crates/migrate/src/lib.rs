//! convoy-migrate - Sequential deployment orchestration.
//!
//! This crate provides the migration engine for deploying an ordered set of
//! interdependent contracts: steps execute strictly in sequence, the address
//! of an earlier-deployed unit can be threaded into the constructor
//! arguments of a later one, and a post-deployment wiring call connects
//! already-deployed units under a chosen caller identity.
//!
//! The engine is environment-agnostic: it talks to the target chain only
//! through the [`DeployPrimitive`] and [`CallPrimitive`] traits, supplied
//! explicitly via an [`Environment`]. A process-local backend,
//! [`LocalChain`], is bundled for simulated runs and tests.

mod env;
mod error;
mod local;
mod registry;
mod runner;
mod step;

pub use env::{CallPrimitive, DeployPrimitive, Environment};
pub use error::{CallError, DeployError, RunFailure, StepError};
pub use local::{CallRecord, LocalChain};
pub use registry::DeploymentRegistry;
pub use runner::MigrationRunner;
pub use step::{Arg, ArgValue, CallerSelector, Step, StepAction};
