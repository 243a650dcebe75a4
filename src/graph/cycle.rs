// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Cycle detection over a flat module collection, independent of any
//! particular traversal mode.

use crate::errors::ValidationError;
use crate::module::ModuleDescriptor;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Depth-first search from every module in declaration order, reporting the
/// first back-edge found as a `[start, ..., start]` chain.
pub fn check_for_cycles(modules: &[Arc<ModuleDescriptor>]) -> Result<(), ValidationError> {
    let by_id: HashMap<&str, &ModuleDescriptor> =
        modules.iter().map(|m| (m.id.as_str(), m.as_ref())).collect();

    let mut visited: HashSet<&str> = HashSet::new();
    let mut in_path: Vec<&str> = Vec::new();
    let mut in_path_set: HashSet<&str> = HashSet::new();

    for module in modules {
        if visited.contains(module.id.as_str()) {
            continue;
        }
        if let Some(chain) = visit(
            module.id.as_str(),
            &by_id,
            &mut visited,
            &mut in_path,
            &mut in_path_set,
        ) {
            return Err(ValidationError::CycleDetected { chain });
        }
    }

    Ok(())
}

fn visit<'a>(
    id: &'a str,
    by_id: &HashMap<&'a str, &'a ModuleDescriptor>,
    visited: &mut HashSet<&'a str>,
    in_path: &mut Vec<&'a str>,
    in_path_set: &mut HashSet<&'a str>,
) -> Option<Vec<String>> {
    in_path.push(id);
    in_path_set.insert(id);

    if let Some(module) = by_id.get(id) {
        for dep_id in module.deps.iter().map(String::as_str) {
            if in_path_set.contains(dep_id) {
                let start = in_path.iter().position(|&seen| seen == dep_id).expect(
                    "dep_id is a member of in_path_set iff it is present in in_path",
                );
                let mut chain: Vec<String> =
                    in_path[start..].iter().map(|s| s.to_string()).collect();
                chain.push(dep_id.to_string());
                return Some(chain);
            }
            if !visited.contains(dep_id) {
                if let Some(chain) = visit(dep_id, by_id, visited, in_path, in_path_set) {
                    return Some(chain);
                }
            }
        }
    }

    in_path.pop();
    in_path_set.remove(id);
    visited.insert(id);
    None
}
