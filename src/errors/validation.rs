// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;

/// Errors raised while validating a module collection's dependency graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A cycle was found while walking the declared dependency edges.
    ///
    /// `chain` is the full back-edge path in discovery order, with the
    /// repeated module id as both its first and last element (e.g. `[j, k, j]`).
    CycleDetected { chain: Vec<String> },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::CycleDetected { chain } => {
                write!(f, "cyclic dependency detected: {}", chain.join(" -> "))
            }
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_chain_as_arrow_path() {
        let err = ValidationError::CycleDetected {
            chain: vec!["j".to_string(), "k".to_string(), "j".to_string()],
        };
        assert_eq!(err.to_string(), "cyclic dependency detected: j -> k -> j");
    }
}
