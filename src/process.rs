#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{
    ffi::OsString,
    path::PathBuf,
    process::{ExitStatus, Stdio},
    time::Duration,
};

use anyhow::{Context, Result};
use bon::Builder;
use thiserror::Error;
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    process::Command,
};

/// Captured result of a finished subprocess.
#[derive(Debug)]
pub struct Collected {
    /// exit status
    pub status: ExitStatus,
    /// everything written to stdout
    pub stdout: Vec<u8>,
    /// everything written to stderr
    pub stderr: Vec<u8>,
}

/// What the spawned process reads on stdin.
#[derive(Debug, Clone, Default)]
pub enum StdinSource {
    /// nothing; reads see end of file
    #[default]
    Null,
    /// these bytes, then end of file
    Bytes(Vec<u8>),
}

/// A process outlived its deadline and was killed.
#[derive(Debug, Error)]
#[error("{program} did not finish within {}s", .limit.as_secs())]
pub struct DeadlineExceeded {
    /// program that was killed
    pub program: String,
    /// the deadline it missed
    pub limit:   Duration,
}

/// Whether `err` came from a missed deadline rather than from spawning or
/// reading the process.
pub fn is_timeout(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| cause.is::<DeadlineExceeded>())
}

/// One run of an external tool with its output captured.
#[derive(Debug, Builder)]
#[builder(on(OsString, into))]
pub struct Invocation {
    /// program to run, a bare name or a path
    program:  OsString,
    /// command line arguments
    #[builder(default)]
    args:     Vec<OsString>,
    /// stdin contents
    #[builder(default)]
    stdin:    StdinSource,
    /// working directory, inherited when unset
    cwd:      Option<PathBuf>,
    /// wall-clock limit; the process is killed once it passes
    deadline: Option<Duration>,
}

impl Invocation {
    /// Spawns the process and waits for it to exit, collecting stdout and
    /// stderr concurrently so neither pipe can fill up and stall it.
    pub async fn collect(self) -> Result<Collected> {
        let shown = self.program.to_string_lossy().into_owned();

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd.stdin(match &self.stdin {
            StdinSource::Null => Stdio::null(),
            StdinSource::Bytes(_) => Stdio::piped(),
        });
        if let Some(dir) = &self.cwd {
            cmd.current_dir(dir);
        }

        let mut child = cmd
            .spawn()
            .with_context(|| format!("failed to spawn {shown}"))?;

        if let StdinSource::Bytes(bytes) = self.stdin
            && let Some(mut handle) = child.stdin.take()
        {
            tokio::spawn(async move {
                let _ = handle.write_all(&bytes).await;
                let _ = handle.shutdown().await;
            });
        }

        let mut stdout = child.stdout.take().context("missing stdout pipe")?;
        let mut stderr = child.stderr.take().context("missing stderr pipe")?;
        let finished = async {
            let mut out = Vec::new();
            let mut err = Vec::new();
            let (status, read_out, read_err) = tokio::join!(
                child.wait(),
                stdout.read_to_end(&mut out),
                stderr.read_to_end(&mut err)
            );
            read_out.context("failed to read stdout")?;
            read_err.context("failed to read stderr")?;
            Ok::<Collected, anyhow::Error>(Collected {
                status: status.context("failed to wait on process")?,
                stdout: out,
                stderr: err,
            })
        };

        // dropping `child` on the timeout path kills it
        match self.deadline {
            Some(limit) => match tokio::time::timeout(limit, finished).await {
                Ok(collected) => collected,
                Err(_) => Err(DeadlineExceeded {
                    program: shown,
                    limit,
                }
                .into()),
            },
            None => finished.await,
        }
    }
}
