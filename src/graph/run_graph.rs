// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The run graph: a flat module list turned into an index-addressed DAG,
//! pruned of excluded modules and, for reverse mode, edge-inverted.

use crate::errors::ValidationError;
use crate::module::ModuleDescriptor;
use std::collections::HashMap;
use std::sync::Arc;

/// Which direction (if any) dependency edges are scheduled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Dependencies before dependents, as declared.
    Normal,
    /// Dependents before dependencies — edges are inverted before scheduling.
    Reverse,
    /// All edges dropped; every surviving module is independently runnable.
    Unordered,
}

/// One node in the materialized run graph. Neighbors are referenced by
/// stable index into the owning [`RunGraph`]'s `nodes`, not by pointer —
/// Rust has no tracing GC, so a `Vec` plus index is the idiomatic stand-in
/// for the reference-cycle-friendly graphs this model describes.
#[derive(Clone)]
pub struct RunGraphNode {
    pub module: Arc<ModuleDescriptor>,
    pub predecessors: Vec<usize>,
    pub successors: Vec<usize>,
}

/// The DAG actually scheduled for one run call.
#[derive(Clone)]
pub struct RunGraph {
    pub nodes: Vec<RunGraphNode>,
    index_of: HashMap<String, usize>,
}

impl RunGraph {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index_of.get(id).copied()
    }

    /// Builds the run graph for `mode` from `modules`, pruning excluded
    /// modules and rejecting a result that would still contain a cycle.
    pub fn build(
        modules: &[Arc<ModuleDescriptor>],
        mode: Mode,
    ) -> Result<Self, ValidationError> {
        let surviving: Vec<&Arc<ModuleDescriptor>> =
            modules.iter().filter(|m| !m.excluded).collect();

        let index_of: HashMap<String, usize> = surviving
            .iter()
            .enumerate()
            .map(|(i, m)| (m.id.clone(), i))
            .collect();

        let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); surviving.len()];
        let mut successors: Vec<Vec<usize>> = vec![Vec::new(); surviving.len()];

        if mode != Mode::Unordered {
            for (m_idx, module) in surviving.iter().enumerate() {
                for dep_id in &module.deps {
                    let Some(&dep_idx) = index_of.get(dep_id) else {
                        continue;
                    };
                    let (pred_idx, succ_idx) = match mode {
                        Mode::Normal => (dep_idx, m_idx),
                        Mode::Reverse => (m_idx, dep_idx),
                        Mode::Unordered => unreachable!("handled above"),
                    };
                    if !predecessors[succ_idx].contains(&pred_idx) {
                        predecessors[succ_idx].push(pred_idx);
                    }
                    if !successors[pred_idx].contains(&succ_idx) {
                        successors[pred_idx].push(succ_idx);
                    }
                }
            }

            if let Some(chain) = find_cycle(&successors, &surviving) {
                return Err(ValidationError::CycleDetected { chain });
            }
        }

        let nodes = surviving
            .into_iter()
            .cloned()
            .enumerate()
            .map(|(i, module)| RunGraphNode {
                module,
                predecessors: std::mem::take(&mut predecessors[i]),
                successors: std::mem::take(&mut successors[i]),
            })
            .collect();

        Ok(RunGraph { nodes, index_of })
    }
}

/// A defensive cycle check over the final, mode-adjusted adjacency — the
/// builder should never actually trip this given an acyclic input graph
/// (exclusion only removes nodes, reversal only flips direction), but it is
/// the backstop that makes "the builder rejects a post-inversion cycle" true
/// rather than assumed.
fn find_cycle(successors: &[Vec<usize>], surviving: &[&Arc<ModuleDescriptor>]) -> Option<Vec<String>> {
    #[derive(Clone, Copy, PartialEq)]
    enum Color {
        White,
        Gray,
        Black,
    }

    let n = successors.len();
    let mut color = vec![Color::White; n];
    let mut path = Vec::new();

    fn visit(
        u: usize,
        successors: &[Vec<usize>],
        color: &mut [Color],
        path: &mut Vec<usize>,
    ) -> Option<Vec<usize>> {
        color[u] = Color::Gray;
        path.push(u);
        for &v in &successors[u] {
            match color[v] {
                Color::Gray => {
                    let start = path.iter().position(|&x| x == v).unwrap();
                    let mut chain = path[start..].to_vec();
                    chain.push(v);
                    return Some(chain);
                }
                Color::White => {
                    if let Some(chain) = visit(v, successors, color, path) {
                        return Some(chain);
                    }
                }
                Color::Black => {}
            }
        }
        path.pop();
        color[u] = Color::Black;
        None
    }

    for start in 0..n {
        if color[start] == Color::White {
            if let Some(chain) = visit(start, successors, &mut color, &mut path) {
                return Some(chain.into_iter().map(|i| surviving[i].id.clone()).collect());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::stub_module;

    fn arcs(modules: Vec<crate::module::ModuleDescriptor>) -> Vec<Arc<ModuleDescriptor>> {
        modules.into_iter().map(Arc::new).collect()
    }

    #[test]
    fn normal_mode_orients_edges_dependency_to_dependent() {
        let modules = arcs(vec![stub_module("a", &[]), stub_module("b", &["a"])]);
        let graph = RunGraph::build(&modules, Mode::Normal).unwrap();
        let a = graph.index_of("a").unwrap();
        let b = graph.index_of("b").unwrap();
        assert_eq!(graph.nodes[b].predecessors, vec![a]);
        assert_eq!(graph.nodes[a].successors, vec![b]);
    }

    #[test]
    fn reverse_mode_inverts_edges() {
        let modules = arcs(vec![stub_module("a", &[]), stub_module("b", &["a"])]);
        let graph = RunGraph::build(&modules, Mode::Reverse).unwrap();
        let a = graph.index_of("a").unwrap();
        let b = graph.index_of("b").unwrap();
        assert_eq!(graph.nodes[a].predecessors, vec![b]);
        assert_eq!(graph.nodes[b].successors, vec![a]);
    }

    #[test]
    fn unordered_mode_drops_all_edges() {
        let modules = arcs(vec![
            stub_module("a", &[]),
            stub_module("b", &["a"]),
            stub_module("c", &["b"]),
        ]);
        let graph = RunGraph::build(&modules, Mode::Unordered).unwrap();
        for node in &graph.nodes {
            assert!(node.predecessors.is_empty());
            assert!(node.successors.is_empty());
        }
    }

    #[test]
    fn excluded_modules_are_pruned_but_do_not_break_remaining_edges() {
        let mut b = stub_module("b", &["a"]);
        b.excluded = true;
        let modules = arcs(vec![stub_module("a", &[]), b, stub_module("c", &["b"])]);
        let graph = RunGraph::build(&modules, Mode::Normal).unwrap();
        assert_eq!(graph.len(), 2);
        let c = graph.index_of("c").unwrap();
        assert!(graph.nodes[c].predecessors.is_empty());
    }
}
