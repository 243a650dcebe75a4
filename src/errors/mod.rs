// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Error types for dependency-graph validation and module execution.

mod execution;
mod validation;

pub use execution::{CompositeError, ExecutionError};
pub use validation::ValidationError;

use std::fmt;

/// Top-level failure from any of the `ModuleSet::run*` entry points.
///
/// Validation failures (a cyclic graph) are reported immediately and distinctly
/// from execution failures, which are always a [`CompositeError`] — possibly
/// empty, in which case the run succeeded.
#[derive(Debug)]
pub enum RunError {
    Validation(ValidationError),
    Failures(CompositeError),
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunError::Validation(e) => write!(f, "{e}"),
            RunError::Failures(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RunError::Validation(e) => Some(e),
            RunError::Failures(e) => Some(e),
        }
    }
}

impl From<ValidationError> for RunError {
    fn from(value: ValidationError) -> Self {
        RunError::Validation(value)
    }
}

impl From<CompositeError> for RunError {
    fn from(value: CompositeError) -> Self {
        RunError::Failures(value)
    }
}
