// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Mock hook implementations for exercising the scheduler and graph builder
//! without shelling out to a real command.
//!
//! Mirrors the stub-backend pattern used elsewhere in this codebase for
//! testing executor logic in isolation: a no-op success, a hook that records
//! every invocation, and a gated hook for exercising concurrency bounds.

#![cfg(test)]

use crate::module::{Hook, HookError, ModuleDescriptor, RunOptions};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;

/// A hook that always succeeds immediately.
pub struct SucceedingHook;

#[async_trait]
impl Hook for SucceedingHook {
    async fn run(&self, _ctx: CancellationToken, _run_opts: &RunOptions) -> Result<(), HookError> {
        Ok(())
    }
}

/// Records every invocation (by module run_opts identity is not available,
/// so callers distinguish instances by constructing one `RecordingHook` per
/// module under test) and lets a test assert whether it ran at all.
#[derive(Clone, Default)]
pub struct RecordingHook {
    invocations: Arc<AtomicUsize>,
    fail: bool,
}

impl RecordingHook {
    pub fn new() -> Self {
        Self {
            invocations: Arc::new(AtomicUsize::new(0)),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            invocations: Arc::new(AtomicUsize::new(0)),
            fail: true,
        }
    }

    pub fn invocation_count(&self) -> usize {
        self.invocations.load(Ordering::SeqCst)
    }

    pub fn was_invoked(&self) -> bool {
        self.invocation_count() > 0
    }
}

#[async_trait]
impl Hook for RecordingHook {
    async fn run(&self, _ctx: CancellationToken, _run_opts: &RunOptions) -> Result<(), HookError> {
        self.invocations.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            Err(std::io::Error::other("recording hook configured to fail").into())
        } else {
            Ok(())
        }
    }
}

/// A hook that blocks until released, to deterministically exercise
/// parallelism caps and in-flight cancellation.
///
/// Polls its `released` flag rather than using `Notify`, so a `release_all`
/// that races a hook's first poll is never a lost wakeup.
pub struct GatedHook {
    released: std::sync::atomic::AtomicBool,
    started: AtomicUsize,
}

impl GatedHook {
    pub fn new() -> Self {
        Self {
            released: std::sync::atomic::AtomicBool::new(false),
            started: AtomicUsize::new(0),
        }
    }

    pub fn started_count(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }

    pub fn release_all(&self) {
        self.released.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl Hook for GatedHook {
    async fn run(&self, ctx: CancellationToken, _run_opts: &RunOptions) -> Result<(), HookError> {
        self.started.fetch_add(1, Ordering::SeqCst);
        loop {
            if self.released.load(Ordering::SeqCst) {
                return Ok(());
            }
            tokio::select! {
                () = tokio::time::sleep(std::time::Duration::from_millis(5)) => continue,
                () = ctx.cancelled() => return Err(std::io::Error::other("cancelled while gated").into()),
            }
        }
    }
}

/// Convenience constructor for a module whose hook always succeeds.
pub fn stub_module(id: &str, deps: &[&str]) -> ModuleDescriptor {
    ModuleDescriptor::new(id, Arc::new(SucceedingHook)).with_deps(deps.to_vec())
}

/// Like [`stub_module`] but records whether it was invoked.
pub fn recording_module(id: &str, deps: &[&str], hook: RecordingHook) -> ModuleDescriptor {
    ModuleDescriptor::new(id, Arc::new(hook)).with_deps(deps.to_vec())
}

/// Tracks invocation order across many modules sharing one mock, useful for
/// asserting topological-start ordering.
#[derive(Clone, Default)]
pub struct OrderLog(Arc<Mutex<Vec<String>>>);

impl OrderLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, id: &str) {
        self.0.lock().unwrap().push(id.to_string());
    }

    pub fn snapshot(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

pub struct OrderRecordingHook {
    pub id: String,
    pub log: OrderLog,
    pub fail: bool,
}

#[async_trait]
impl Hook for OrderRecordingHook {
    async fn run(&self, _ctx: CancellationToken, _run_opts: &RunOptions) -> Result<(), HookError> {
        self.log.record(&self.id);
        if self.fail {
            Err(std::io::Error::other(format!("{} failed", self.id)).into())
        } else {
            Ok(())
        }
    }
}

pub fn order_module(id: &str, deps: &[&str], log: OrderLog, fail: bool) -> ModuleDescriptor {
    ModuleDescriptor::new(id, Arc::new(OrderRecordingHook { id: id.to_string(), log, fail }))
        .with_deps(deps.to_vec())
}
