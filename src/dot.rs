// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! DOT-format rendering of a module collection's declared dependency graph.
//!
//! Unlike [`crate::graph::RunGraph`], this walks the *raw* module list —
//! excluded modules and their edges are still drawn, just highlighted.

use crate::module::ModuleDescriptor;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

/// Options controlling label rendering.
#[derive(Debug, Clone, Default)]
pub struct DotOptions {
    /// A configured working-directory path; its *parent directory* is the
    /// prefix trimmed from module labels. Modules not under that prefix are
    /// rendered with their id verbatim.
    pub working_dir: String,
}

/// Writes a DOT digraph for `modules` to `sink`, in input order.
pub fn write_dot(
    sink: &mut dyn Write,
    modules: &[Arc<ModuleDescriptor>],
    opts: &DotOptions,
) -> io::Result<()> {
    let prefix = prefix_from_working_dir(&opts.working_dir);

    writeln!(sink, "digraph {{")?;
    for module in modules {
        let label = trim_label(&module.id, &prefix);
        if module.excluded {
            writeln!(sink, "  \"{label}\" [color=red];")?;
        } else {
            writeln!(sink, "  \"{label}\";")?;
        }
        for dep_id in &module.deps {
            let dep_label = trim_label(dep_id, &prefix);
            writeln!(sink, "  \"{label}\" -> \"{dep_label}\";")?;
        }
    }
    writeln!(sink, "}}")?;
    Ok(())
}

fn prefix_from_working_dir(working_dir: &str) -> String {
    if working_dir.is_empty() {
        return String::new();
    }
    Path::new(working_dir)
        .parent()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn trim_label(id: &str, prefix: &str) -> String {
    if prefix.is_empty() {
        return id.to_string();
    }
    match id.strip_prefix(prefix) {
        Some(rest) => rest.strip_prefix('/').unwrap_or(rest).to_string(),
        None => id.to_string(),
    }
}
