// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The scheduler: turns a validated [`crate::graph::RunGraph`] into a
//! completed run.

mod scheduler;

pub use scheduler::run;
