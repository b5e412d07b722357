// src/engine/mod.rs

//! Orchestration engine for executer.
//!
//! Feeds the steps of a dispatch [`Plan`](crate::dispatch::Plan) through the
//! supervisor one at a time. The engine never exits the process; it hands
//! the final [`Termination`](crate::exec::Termination) back to `main`.

pub mod runtime;

pub use runtime::Runtime;
