// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! DAG validation and run-graph construction.

mod cycle;
mod run_graph;

pub use cycle::check_for_cycles;
pub use run_graph::{Mode, RunGraph, RunGraphNode};
