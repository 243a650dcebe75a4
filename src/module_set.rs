// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The public entry point: a named collection of modules, with the
//! validate/run/visualize operations the rest of the crate implements.

use crate::dot::{self, DotOptions};
use crate::engine;
use crate::errors::{CompositeError, RunError, ValidationError};
use crate::graph::{self, Mode, RunGraph};
use crate::module::ModuleDescriptor;
use crate::observability::messages::CycleRejected;
use crate::observability::StructuredLog;
use std::io::Write;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// A collection of modules sharing one dependency graph.
#[derive(Clone)]
pub struct ModuleSet(Vec<Arc<ModuleDescriptor>>);

impl ModuleSet {
    pub fn new(modules: Vec<ModuleDescriptor>) -> Self {
        Self(modules.into_iter().map(Arc::new).collect())
    }

    pub fn modules(&self) -> &[Arc<ModuleDescriptor>] {
        &self.0
    }

    /// Detects a cycle in the declared dependency edges, independent of any
    /// exclusion or traversal mode.
    pub fn check_for_cycles(&self) -> Result<(), ValidationError> {
        graph::check_for_cycles(&self.0)
    }

    /// Runs every module once its predecessors have completed, normal order.
    pub async fn run(&self, ctx: CancellationToken, parallelism: usize) -> Result<(), RunError> {
        self.run_with_mode(ctx, parallelism, Mode::Normal).await
    }

    /// Runs dependents before their dependencies (the edge-inverted graph).
    pub async fn run_reverse(
        &self,
        ctx: CancellationToken,
        parallelism: usize,
    ) -> Result<(), RunError> {
        self.run_with_mode(ctx, parallelism, Mode::Reverse).await
    }

    /// Runs every surviving module independently, with no ordering constraint.
    pub async fn run_unordered(
        &self,
        ctx: CancellationToken,
        parallelism: usize,
    ) -> Result<(), RunError> {
        self.run_with_mode(ctx, parallelism, Mode::Unordered).await
    }

    async fn run_with_mode(
        &self,
        ctx: CancellationToken,
        parallelism: usize,
        mode: Mode,
    ) -> Result<(), RunError> {
        let graph = RunGraph::build(&self.0, mode).map_err(|e| {
            if let ValidationError::CycleDetected { chain } = &e {
                CycleRejected { chain }.log();
            }
            e
        })?;
        let composite: CompositeError = engine::run(ctx, graph, parallelism, mode).await;
        composite.into_result().map_err(RunError::from)
    }

    /// Renders the declared (pre-pruning) dependency graph as DOT.
    pub fn write_dot(&self, sink: &mut dyn Write, opts: &DotOptions) -> std::io::Result<()> {
        dot::write_dot(sink, &self.0, opts)
    }
}
