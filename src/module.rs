// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The module descriptor: the unit of work the rest of the crate schedules.

use async_trait::async_trait;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// The error type a [`Hook`] returns. Boxed so individual hook implementations
/// can carry whatever concrete error they like without the scheduler caring.
pub type HookError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The externally supplied effectful operation a module runs.
///
/// The scheduler invokes this at most once per module, never reentrantly for
/// the same module, but concurrently across different modules. Implementations
/// must observe `ctx` cooperatively: once it is cancelled they are expected to
/// return promptly rather than run to completion.
#[async_trait]
pub trait Hook: Send + Sync {
    async fn run(&self, ctx: CancellationToken, run_opts: &RunOptions) -> Result<(), HookError>;
}

/// Per-module configuration consumed by its hook and by the scheduler.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// If true, a failed or skipped predecessor does not block this module.
    pub ignore_dependency_errors: bool,
    /// Root path the hook should run in; also used by the visualizer for
    /// prefix-trimming module labels.
    pub working_dir: String,
}

/// A single unit of infrastructure work: an id, its declared dependencies,
/// and the hook that actually does the work.
///
/// Immutable once constructed — the scheduler never mutates a descriptor,
/// only the run-graph node wrapping it.
pub struct ModuleDescriptor {
    pub id: String,
    /// Ids of other modules in the same collection this one depends on.
    /// Duplicates are tolerated (treated as a set) but declaration order is
    /// significant for deterministic cycle reporting and `DependencyFailed`
    /// attribution.
    pub deps: Vec<String>,
    /// Excluded modules are pruned from the run graph but the visualizer
    /// still renders them (highlighted) and their declared edges.
    pub excluded: bool,
    /// Treated as already successful: the hook is never invoked but
    /// successors proceed as though it had run.
    pub assume_applied: bool,
    pub run_opts: RunOptions,
    pub hook: Arc<dyn Hook>,
}

impl ModuleDescriptor {
    pub fn new(id: impl Into<String>, hook: Arc<dyn Hook>) -> Self {
        Self {
            id: id.into(),
            deps: Vec::new(),
            excluded: false,
            assume_applied: false,
            run_opts: RunOptions::default(),
            hook,
        }
    }

    pub fn with_deps(mut self, deps: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.deps = deps.into_iter().map(Into::into).collect();
        self
    }

    pub fn excluded(mut self) -> Self {
        self.excluded = true;
        self
    }

    pub fn assume_applied(mut self) -> Self {
        self.assume_applied = true;
        self
    }

    pub fn with_run_opts(mut self, run_opts: RunOptions) -> Self {
        self.run_opts = run_opts;
        self
    }
}
