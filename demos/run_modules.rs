// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Runs a small three-module graph (`network` -> `database` -> `app`) using
//! the real subprocess hook, to show the public API end to end.

use graphrunner::hook::ProcessHook;
use graphrunner::{ModuleDescriptor, ModuleSet, RunOptions};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

fn echo_hook(message: &str) -> Arc<ProcessHook> {
    Arc::new(ProcessHook::new("echo", vec![message.to_string()]))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let run_opts = RunOptions {
        ignore_dependency_errors: false,
        working_dir: ".".to_string(),
    };

    let modules = ModuleSet::new(vec![
        ModuleDescriptor::new("network", echo_hook("provisioning network"))
            .with_run_opts(run_opts.clone()),
        ModuleDescriptor::new("database", echo_hook("provisioning database"))
            .with_deps(["network"])
            .with_run_opts(run_opts.clone()),
        ModuleDescriptor::new("app", echo_hook("deploying app"))
            .with_deps(["network", "database"])
            .with_run_opts(run_opts),
    ]);

    modules.check_for_cycles()?;
    modules.run(CancellationToken::new(), 2).await?;

    println!("all modules applied successfully");
    Ok(())
}
