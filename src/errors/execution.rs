// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;
use std::sync::Arc;

/// A failure attributed to a single run-graph node.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ExecutionError {
    /// The module's hook returned an error.
    #[error("module '{module_id}' failed: {cause}")]
    HookFailed {
        module_id: String,
        cause: Arc<dyn std::error::Error + Send + Sync>,
    },

    /// The module was blocked by a predecessor that did not succeed.
    #[error("module '{module_id}' blocked by dependency '{dep_id}': {underlying}")]
    DependencyFailed {
        module_id: String,
        dep_id: String,
        underlying: Box<ExecutionError>,
    },

    /// The module never ran because the run was cancelled first.
    #[error("module '{module_id}' skipped: run was cancelled")]
    Cancelled { module_id: String },

    /// A worker task ended unexpectedly (e.g. panicked) rather than reporting
    /// a terminal state through the normal channel.
    #[error("module '{module_id}' worker task failed: {message}")]
    Internal { module_id: String, message: String },
}

impl ExecutionError {
    /// The id of the module this error is attributed to.
    pub fn module_id(&self) -> &str {
        match self {
            ExecutionError::HookFailed { module_id, .. } => module_id,
            ExecutionError::DependencyFailed { module_id, .. } => module_id,
            ExecutionError::Cancelled { module_id } => module_id,
            ExecutionError::Internal { module_id, .. } => module_id,
        }
    }
}

/// The ordered collection of per-node errors produced by a single run call.
///
/// An empty composite means the run succeeded. Member order is completion
/// order, not declaration order: two independent failures can appear in
/// either order across runs of the same input.
#[derive(Debug, Clone, Default)]
pub struct CompositeError {
    errors: Vec<ExecutionError>,
}

impl CompositeError {
    pub fn from_errors(errors: Vec<ExecutionError>) -> Self {
        Self { errors }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExecutionError> {
        self.errors.iter()
    }

    /// Collapses an empty composite into `Ok(())`, matching "no error" semantics.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for CompositeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n");
        write!(f, "{joined}")
    }
}

impl std::error::Error for CompositeError {}

impl IntoIterator for CompositeError {
    type Item = ExecutionError;
    type IntoIter = std::vec::IntoIter<ExecutionError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}
