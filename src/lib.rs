// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! A dependency-aware multi-module runner: build a DAG of modules, validate
//! it, and drive it to completion across a bounded worker pool.
//!
//! ```
//! use graphrunner::{ModuleDescriptor, ModuleSet, RunOptions};
//! use graphrunner::hook::ProcessHook;
//! use std::sync::Arc;
//! use tokio_util::sync::CancellationToken;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let run_opts = RunOptions { working_dir: ".".to_string(), ..Default::default() };
//! let mut network = ModuleDescriptor::new("network", Arc::new(ProcessHook::new("true", Vec::<String>::new())));
//! network.run_opts = run_opts.clone();
//! let mut database = ModuleDescriptor::new("database", Arc::new(ProcessHook::new("true", Vec::<String>::new())))
//!     .with_deps(["network"]);
//! database.run_opts = run_opts;
//! let modules = ModuleSet::new(vec![network, database]);
//!
//! modules.check_for_cycles()?;
//! modules.run(CancellationToken::new(), 4).await?;
//! # Ok(())
//! # }
//! ```

pub mod dot;
pub mod engine;
pub mod errors;
pub mod graph;
pub mod hook;
pub mod module;
mod module_set;
pub mod observability;
#[cfg(test)]
mod testutil;

pub use dot::DotOptions;
pub use errors::{CompositeError, ExecutionError, RunError, ValidationError};
pub use graph::Mode;
pub use module::{Hook, HookError, ModuleDescriptor, RunOptions};
pub use module_set::ModuleSet;
