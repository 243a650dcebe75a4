// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Shared mock hooks for integration tests exercising the public API.

use async_trait::async_trait;
use graphrunner::{Hook, HookError, RunOptions};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;

/// Records every invocation and optionally fails, for asserting exactly
/// which modules' hooks ran.
#[derive(Clone)]
pub struct RecordingHook {
    invocations: Arc<AtomicUsize>,
    fail: bool,
}

impl RecordingHook {
    pub fn succeeding() -> Self {
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

    pub fn was_invoked(&self) -> bool {
        self.invocations.load(Ordering::SeqCst) > 0
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

/// Records the order in which modules actually started running.
#[derive(Clone, Default)]
pub struct OrderLog(Arc<Mutex<Vec<String>>>);

impl OrderLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    fn record(&self, id: &str) {
        self.0.lock().unwrap().push(id.to_string());
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
