// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Prints the DOT representation of a small module graph with one excluded
//! node, demonstrating `ModuleSet::write_dot`.

use graphrunner::hook::ProcessHook;
use graphrunner::{DotOptions, ModuleDescriptor, ModuleSet};
use std::sync::Arc;

fn noop_hook() -> Arc<ProcessHook> {
    Arc::new(ProcessHook::new("true", Vec::<String>::new()))
}

fn main() -> anyhow::Result<()> {
    let modules = ModuleSet::new(vec![
        ModuleDescriptor::new("/config/network", noop_hook()),
        ModuleDescriptor::new("/config/database", noop_hook()).with_deps(["/config/network"]),
        ModuleDescriptor::new("/config/cache", noop_hook())
            .with_deps(["/config/network"])
            .excluded(),
        ModuleDescriptor::new("/config/app", noop_hook())
            .with_deps(["/config/database", "/config/cache"]),
    ]);

    let opts = DotOptions {
        working_dir: "/config/terragrunt.hcl".to_string(),
    };
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    modules.write_dot(&mut handle, &opts)?;
    Ok(())
}
