// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for run-graph construction and scheduling events.

use super::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A scheduler run is starting.
pub struct RunStarted<'a> {
    pub mode: &'a str,
    pub node_count: usize,
    pub parallelism: usize,
}

impl Display for RunStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "starting {} run over {} modules, parallelism={}",
            self.mode, self.node_count, self.parallelism
        )
    }
}

impl StructuredLog for RunStarted<'_> {
    fn log(&self) {
        tracing::info!(
            mode = self.mode,
            node_count = self.node_count,
            parallelism = self.parallelism,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "run",
            span_name = name,
            mode = self.mode,
            node_count = self.node_count,
            parallelism = self.parallelism,
        )
    }
}

/// A scheduler run finished; `failure_count` is the size of the resulting
/// composite error (zero means the run succeeded).
pub struct RunCompleted<'a> {
    pub mode: &'a str,
    pub failure_count: usize,
    pub duration: std::time::Duration,
}

impl Display for RunCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} run completed in {:?} with {} failed/skipped modules",
            self.mode, self.duration, self.failure_count
        )
    }
}

impl StructuredLog for RunCompleted<'_> {
    fn log(&self) {
        if self.failure_count == 0 {
            tracing::info!(
                mode = self.mode,
                failure_count = self.failure_count,
                duration_ms = self.duration.as_millis() as u64,
                "{}", self
            );
        } else {
            tracing::warn!(
                mode = self.mode,
                failure_count = self.failure_count,
                duration_ms = self.duration.as_millis() as u64,
                "{}", self
            );
        }
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "run_completed",
            span_name = name,
            mode = self.mode,
            failure_count = self.failure_count,
            duration = ?self.duration,
        )
    }
}

/// A single module's hook is about to be invoked.
pub struct ModuleDispatched<'a> {
    pub module_id: &'a str,
}

impl Display for ModuleDispatched<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "dispatching module '{}'", self.module_id)
    }
}

impl StructuredLog for ModuleDispatched<'_> {
    fn log(&self) {
        tracing::debug!(module_id = self.module_id, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!("module_dispatched", span_name = name, module_id = self.module_id)
    }
}

/// A single module reached a terminal state.
pub struct ModuleTerminated<'a> {
    pub module_id: &'a str,
    pub state: &'a str,
    pub error: Option<&'a dyn std::error::Error>,
}

impl Display for ModuleTerminated<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self.error {
            Some(err) => write!(
                f,
                "module '{}' terminated as {}: {}",
                self.module_id, self.state, err
            ),
            None => write!(f, "module '{}' terminated as {}", self.module_id, self.state),
        }
    }
}

impl StructuredLog for ModuleTerminated<'_> {
    fn log(&self) {
        match self.error {
            Some(err) => tracing::warn!(
                module_id = self.module_id,
                state = self.state,
                error = %err,
                "{}", self
            ),
            None => tracing::info!(module_id = self.module_id, state = self.state, "{}", self),
        }
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "module_terminated",
            span_name = name,
            module_id = self.module_id,
            state = self.state,
        )
    }
}

/// Graph validation failed before any module could run.
pub struct CycleRejected<'a> {
    pub chain: &'a [String],
}

impl Display for CycleRejected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "rejected cyclic dependency graph: {}", self.chain.join(" -> "))
    }
}

impl StructuredLog for CycleRejected<'_> {
    fn log(&self) {
        tracing::error!(chain = ?self.chain, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!("cycle_rejected", span_name = name, chain = ?self.chain)
    }
}
