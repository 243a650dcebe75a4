// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! A reference [`Hook`] implementation that spawns an external process.
//!
//! The scheduler never special-cases this type — it depends only on the
//! [`Hook`] trait — but a runner that cannot run anything real is not much
//! of a runner, so this is the one concrete backend the crate ships.

use crate::module::{Hook, HookError, RunOptions};
use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tokio_util::sync::CancellationToken;

/// Runs `program args...` in `run_opts.working_dir`, forwarding its output
/// through `tracing` as it arrives and observing cancellation by killing the
/// child rather than waiting for it to exit on its own.
pub struct ProcessHook {
    pub program: String,
    pub args: Vec<String>,
}

impl ProcessHook {
    pub fn new(program: impl Into<String>, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl Hook for ProcessHook {
    async fn run(&self, ctx: CancellationToken, run_opts: &RunOptions) -> Result<(), HookError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .current_dir(&run_opts.working_dir)
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        let stdout = child.stdout.take().expect("stdout was piped");
        let stderr = child.stderr.take().expect("stderr was piped");
        let program = self.program.clone();

        let stdout_task = tokio::spawn(stream_lines(stdout, program.clone(), false));
        let stderr_task = tokio::spawn(stream_lines(stderr, program.clone(), true));

        let exit_status = tokio::select! {
            status = child.wait() => status?,
            () = ctx.cancelled() => {
                child.kill().await?;
                let _ = child.wait().await;
                return Err(std::io::Error::other(format!("'{}' cancelled", self.program)).into());
            }
        };

        let _ = stdout_task.await;
        let _ = stderr_task.await;

        if exit_status.success() {
            Ok(())
        } else {
            Err(std::io::Error::other(format!(
                "'{}' exited with {}",
                self.program,
                exit_status
                    .code()
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "unknown status".to_string())
            ))
            .into())
        }
    }
}

async fn stream_lines(pipe: impl tokio::io::AsyncRead + Unpin, program: String, is_stderr: bool) {
    let mut lines = BufReader::new(pipe).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        if is_stderr {
            tracing::debug!(program = %program, stream = "stderr", "{}", line);
        } else {
            tracing::debug!(program = %program, stream = "stdout", "{}", line);
        }
    }
}
