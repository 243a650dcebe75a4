// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The coordinator-free worker pool: one task per run-graph node, talking to
//! its dependents over a dedicated completion channel rather than through a
//! polled, lock-guarded state table.

use crate::errors::{CompositeError, ExecutionError};
use crate::graph::{Mode, RunGraph};
use crate::observability::messages::{ModuleDispatched, ModuleTerminated, RunCompleted, RunStarted};
use crate::observability::StructuredLog;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{mpsc, Mutex, Semaphore};
use tokio_util::sync::CancellationToken;

/// The outcome a finished predecessor reports to its successors: `None` on
/// success, `Some(error)` carrying the exact terminal error otherwise.
type PredecessorOutcome = (usize, Option<Arc<ExecutionError>>);

/// Runs every node of `graph` to completion, honoring `parallelism` and `ctx`.
///
/// Returns the aggregate [`CompositeError`] of every failed or skipped node —
/// empty if every node succeeded.
pub async fn run(ctx: CancellationToken, graph: RunGraph, parallelism: usize, mode: Mode) -> CompositeError {
    let parallelism = parallelism.max(1);
    let node_count = graph.nodes.len();

    RunStarted {
        mode: mode_name(mode),
        node_count,
        parallelism,
    }
    .log();
    let started_at = Instant::now();

    let ids: Arc<Vec<String>> = Arc::new(graph.nodes.iter().map(|n| n.module.id.clone()).collect());

    let mut senders: Vec<mpsc::UnboundedSender<PredecessorOutcome>> = Vec::with_capacity(node_count);
    let mut receivers: Vec<Option<mpsc::UnboundedReceiver<PredecessorOutcome>>> =
        Vec::with_capacity(node_count);
    for _ in 0..node_count {
        let (tx, rx) = mpsc::unbounded_channel();
        senders.push(tx);
        receivers.push(Some(rx));
    }
    let senders = Arc::new(senders);

    let semaphore = Arc::new(Semaphore::new(parallelism));
    let errors = Arc::new(Mutex::new(Vec::<ExecutionError>::new()));

    let mut handles = Vec::with_capacity(node_count);
    for (idx, node) in graph.nodes.iter().enumerate() {
        let receiver = receivers[idx].take().expect("each receiver is taken exactly once");
        handles.push(tokio::spawn(run_node(
            idx,
            node.module.clone(),
            node.predecessors.clone(),
            node.successors.clone(),
            receiver,
            ctx.clone(),
            semaphore.clone(),
            senders.clone(),
            errors.clone(),
            ids.clone(),
        )));
    }

    for handle in handles {
        if let Err(join_err) = handle.await {
            errors.lock().await.push(ExecutionError::Internal {
                module_id: "<unknown>".to_string(),
                message: join_err.to_string(),
            });
        }
    }

    let collected = Arc::try_unwrap(errors)
        .expect("every spawned task has completed and dropped its Arc clone")
        .into_inner();
    let composite = CompositeError::from_errors(collected);

    RunCompleted {
        mode: mode_name(mode),
        failure_count: composite.len(),
        duration: started_at.elapsed(),
    }
    .log();

    composite
}

#[allow(clippy::too_many_arguments)]
async fn run_node(
    idx: usize,
    module: Arc<crate::module::ModuleDescriptor>,
    predecessors: Vec<usize>,
    successors: Vec<usize>,
    mut receiver: mpsc::UnboundedReceiver<PredecessorOutcome>,
    ctx: CancellationToken,
    semaphore: Arc<Semaphore>,
    senders: Arc<Vec<mpsc::UnboundedSender<PredecessorOutcome>>>,
    errors: Arc<Mutex<Vec<ExecutionError>>>,
    ids: Arc<Vec<String>>,
) {
    let module_id = module.id.clone();

    // assume_applied short-circuits to succeeded the instant the node starts:
    // it never waits on its own predecessors, never invokes its hook, and is
    // immune to cancellation, since neither a worker slot nor a hook call is
    // ever at stake for it.
    let terminal_error: Option<ExecutionError> = if module.assume_applied {
        None
    } else {
        let mut outcomes: HashMap<usize, Option<Arc<ExecutionError>>> = HashMap::new();
        let mut cancelled_while_waiting = false;

        while outcomes.len() < predecessors.len() {
            tokio::select! {
                biased;
                () = ctx.cancelled() => {
                    cancelled_while_waiting = true;
                    break;
                }
                received = receiver.recv() => {
                    match received {
                        Some((pred_idx, outcome)) => { outcomes.insert(pred_idx, outcome); }
                        None => break,
                    }
                }
            }
        }

        if cancelled_while_waiting {
            Some(ExecutionError::Cancelled {
                module_id: module_id.clone(),
            })
        } else {
            let blocking = predecessors.iter().find_map(|&pred_idx| {
                outcomes
                    .get(&pred_idx)
                    .and_then(|outcome| outcome.clone())
                    .map(|err| (pred_idx, err))
            });

            match blocking {
                Some((pred_idx, underlying)) if !module.run_opts.ignore_dependency_errors => {
                    Some(ExecutionError::DependencyFailed {
                        module_id: module_id.clone(),
                        dep_id: ids[pred_idx].clone(),
                        underlying: Box::new((*underlying).clone()),
                    })
                }
                _ => dispatch(&module, &ctx, &semaphore).await,
            }
        }
    };

    ModuleTerminated {
        module_id: &module_id,
        state: terminal_error
            .as_ref()
            .map(state_name)
            .unwrap_or("succeeded"),
        error: terminal_error.as_ref().map(|e| e as &dyn std::error::Error),
    }
    .log();

    let outcome_for_successors = terminal_error.clone().map(Arc::new);
    if let Some(err) = terminal_error {
        errors.lock().await.push(err);
    }

    for &succ_idx in &successors {
        let _ = senders[succ_idx].send((idx, outcome_for_successors.clone()));
    }
}

/// Runs `module`'s hook once a worker slot is free, returning the terminal
/// error if any. Dispatch is skipped entirely — yielding `Cancelled` instead
/// — if the run is already cancelled before a slot is acquired.
async fn dispatch(
    module: &crate::module::ModuleDescriptor,
    ctx: &CancellationToken,
    semaphore: &Semaphore,
) -> Option<ExecutionError> {
    if ctx.is_cancelled() {
        return Some(ExecutionError::Cancelled {
            module_id: module.id.clone(),
        });
    }

    let _permit = semaphore
        .acquire()
        .await
        .expect("the semaphore is never closed for the lifetime of a run");

    if ctx.is_cancelled() {
        return Some(ExecutionError::Cancelled {
            module_id: module.id.clone(),
        });
    }

    ModuleDispatched { module_id: &module.id }.log();

    match module.hook.run(ctx.clone(), &module.run_opts).await {
        Ok(()) => None,
        Err(cause) => Some(ExecutionError::HookFailed {
            module_id: module.id.clone(),
            cause: Arc::from(cause),
        }),
    }
}

fn state_name(err: &ExecutionError) -> &'static str {
    match err {
        ExecutionError::HookFailed { .. } => "failed",
        ExecutionError::DependencyFailed { .. } => "failed",
        ExecutionError::Cancelled { .. } => "skipped",
        ExecutionError::Internal { .. } => "failed",
    }
}

fn mode_name(mode: Mode) -> &'static str {
    match mode {
        Mode::Normal => "normal",
        Mode::Reverse => "reverse",
        Mode::Unordered => "unordered",
    }
}
