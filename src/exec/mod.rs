// src/exec/mod.rs

//! Process execution layer.
//!
//! This module runs exactly one toolchain process per [`Invocation`] and turns
//! its fate into a [`Termination`] for the engine.
//!
//! - [`invocation`] holds the immutable per-call descriptor and the
//!   failure exit code policy.
//! - [`backend`] provides the `ProcessLauncher` / `ChildProcess` traits and
//!   the `tokio::process` implementation used in production.
//! - [`interrupt`] provides the `InterruptSource` trait and the SIGINT
//!   listener.
//! - [`supervisor`] races child completion against interrupts and applies
//!   the exit code rules.

use std::future::Future;
use std::pin::Pin;

pub mod backend;
pub mod interrupt;
pub mod invocation;
pub mod supervisor;

pub use backend::{ChildExit, ChildProcess, ProcessLauncher, TokioLauncher};
pub use interrupt::{InterruptSource, SigintSource};
pub use invocation::{DEFAULT_FAILURE_EXIT_CODE, Invocation, to_string_pretty};
pub use supervisor::{Supervisor, Termination};

/// Boxed future used at the trait seams of this module.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
