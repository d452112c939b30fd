//! Scripted process adapter
//!
//! Replays a queue of canned outcomes instead of launching processes, and
//! records every invocation it receives. Used to exercise the pipeline
//! stages without ffmpeg installed.

use std::collections::VecDeque;
use std::path::Path;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::domain::model::{CancelSignal, ProcessInvocation, RunResult};
use crate::error::{AmbimuxError, AmbimuxResult};
use crate::ports::ProcessPort;

/// One canned outcome
#[derive(Debug, Clone)]
pub enum ScriptedStep {
    /// Exit with the given code and output
    Exit {
        code: i32,
        stdout: String,
        stderr: String,
        /// Create the file named by the last argument, like a tool writing its output
        write_output: bool,
    },
    /// Fail as if the executable were missing
    SpawnFailure,
    /// Block until cancelled
    Hang,
    /// Write the output file, then block until cancelled
    HangAfterOutput,
}

impl ScriptedStep {
    /// Successful exit that writes the output file
    pub fn writes_output() -> Self {
        ScriptedStep::Exit {
            code: 0,
            stdout: String::new(),
            stderr: String::new(),
            write_output: true,
        }
    }

    /// Successful exit printing `stdout`
    pub fn prints(stdout: impl Into<String>) -> Self {
        ScriptedStep::Exit {
            code: 0,
            stdout: stdout.into(),
            stderr: String::new(),
            write_output: false,
        }
    }

    /// Failed exit with diagnostics and no output file
    pub fn fails(code: i32, stderr: impl Into<String>) -> Self {
        ScriptedStep::Exit {
            code,
            stdout: String::new(),
            stderr: stderr.into(),
            write_output: false,
        }
    }
}

/// In-memory `ProcessPort`
#[derive(Debug, Default)]
pub struct ScriptedProcessAdapter {
    steps: Mutex<VecDeque<ScriptedStep>>,
    calls: Mutex<Vec<ProcessInvocation>>,
}

impl ScriptedProcessAdapter {
    pub fn new<I>(steps: I) -> Self
    where
        I: IntoIterator<Item = ScriptedStep>,
    {
        Self {
            steps: Mutex::new(steps.into_iter().collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Invocations received so far, in order
    pub fn calls(&self) -> Vec<ProcessInvocation> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Steps not yet consumed
    pub fn remaining(&self) -> usize {
        self.steps
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[async_trait]
impl ProcessPort for ScriptedProcessAdapter {
    async fn run(
        &self,
        invocation: &ProcessInvocation,
        cancel: &CancelSignal,
    ) -> AmbimuxResult<RunResult> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(invocation.clone());
        let step = self
            .steps
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();

        match step {
            Some(ScriptedStep::Exit {
                code,
                stdout,
                stderr,
                write_output,
            }) => {
                if write_output {
                    if let Some(path) = invocation.args.last() {
                        tokio::fs::write(Path::new(path), b"scripted output").await?;
                    }
                }
                Ok(RunResult {
                    exit_code: Some(code),
                    stdout: if invocation.capture_stdout {
                        stdout
                    } else {
                        String::new()
                    },
                    stderr,
                })
            }
            Some(step @ (ScriptedStep::Hang | ScriptedStep::HangAfterOutput)) => {
                if matches!(step, ScriptedStep::HangAfterOutput) {
                    if let Some(path) = invocation.args.last() {
                        tokio::fs::write(Path::new(path), b"partial output").await?;
                    }
                }
                let mut cancel = cancel.clone();
                cancel.cancelled().await;
                Err(AmbimuxError::Cancelled {
                    executable: invocation.executable.clone(),
                })
            }
            Some(ScriptedStep::SpawnFailure) | None => Err(AmbimuxError::ProcessSpawn {
                executable: invocation.executable.clone(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "no scripted step for invocation",
                ),
            }),
        }
    }
}
