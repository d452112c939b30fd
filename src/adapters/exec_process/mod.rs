//! Process execution adapter
//!
//! Runs external media tools with tokio, streaming their output into bounded
//! buffers while waiting for exit, a timeout or a cancellation request.

mod tail;

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::{Child, Command};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::domain::model::{CancelSignal, ProcessInvocation, RunResult};
use crate::error::{AmbimuxError, AmbimuxResult};
use crate::ports::ProcessPort;

pub use tail::DiagnosticTail;

/// Default upper bound on a single tool invocation
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(600);

/// Default byte budget for captured stderr/stdout
pub const DEFAULT_DIAGNOSTICS_LIMIT: usize = 64 * 1024;

/// tokio-based process adapter
#[derive(Debug, Clone)]
pub struct TokioProcessAdapter {
    timeout: Option<Duration>,
    diagnostics_limit: usize,
}

enum Outcome {
    Exited(std::io::Result<std::process::ExitStatus>),
    TimedOut,
    Cancelled,
}

impl TokioProcessAdapter {
    /// Create adapter with the default timeout and diagnostics budget
    pub fn new() -> Self {
        Self {
            timeout: Some(DEFAULT_TIMEOUT),
            diagnostics_limit: DEFAULT_DIAGNOSTICS_LIMIT,
        }
    }

    /// Set the per-invocation timeout; `None` waits indefinitely
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_diagnostics_limit(mut self, limit: usize) -> Self {
        self.diagnostics_limit = limit;
        self
    }

    fn collect<R>(&self, reader: Option<R>) -> Option<JoinHandle<String>>
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let limit = self.diagnostics_limit;
        reader.map(|reader| tokio::spawn(collect_lines(reader, limit)))
    }
}

impl Default for TokioProcessAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProcessPort for TokioProcessAdapter {
    async fn run(
        &self,
        invocation: &ProcessInvocation,
        cancel: &CancelSignal,
    ) -> AmbimuxResult<RunResult> {
        debug!(command = %invocation.display_command(), "Spawning process");

        let mut command = Command::new(&invocation.executable);
        command
            .args(&invocation.args)
            .stdin(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if invocation.capture_stdout {
            command.stdout(Stdio::piped());
        } else {
            command.stdout(Stdio::null());
        }

        let mut child = command
            .spawn()
            .map_err(|source| AmbimuxError::ProcessSpawn {
                executable: invocation.executable.clone(),
                source,
            })?;

        // Drain both pipes concurrently so a chatty tool never blocks on a full pipe.
        let stderr_task = self.collect(child.stderr.take());
        let stdout_task = self.collect(child.stdout.take());

        let mut cancel = cancel.clone();
        let timeout = self.timeout;
        let deadline = async move {
            match timeout {
                Some(limit) => tokio::time::sleep(limit).await,
                None => std::future::pending::<()>().await,
            }
        };

        let outcome = tokio::select! {
            status = child.wait() => Outcome::Exited(status),
            _ = deadline => Outcome::TimedOut,
            _ = cancel.cancelled() => Outcome::Cancelled,
        };

        let status = match outcome {
            Outcome::Exited(status) => status?,
            Outcome::TimedOut => {
                terminate(&mut child, [stderr_task, stdout_task]).await;
                warn!(executable = %invocation.executable, "Process timed out");
                return Err(AmbimuxError::Timeout {
                    executable: invocation.executable.clone(),
                    after: timeout.unwrap_or_default(),
                });
            }
            Outcome::Cancelled => {
                terminate(&mut child, [stderr_task, stdout_task]).await;
                warn!(executable = %invocation.executable, "Process cancelled");
                return Err(AmbimuxError::Cancelled {
                    executable: invocation.executable.clone(),
                });
            }
        };

        let stderr = join_output(stderr_task).await;
        let stdout = join_output(stdout_task).await;
        let exit_code = status.code();
        debug!(executable = %invocation.executable, ?exit_code, "Process exited");

        Ok(RunResult {
            exit_code,
            stdout,
            stderr,
        })
    }
}

/// Read `reader` to EOF, keeping at most `limit` bytes of any one line in
/// memory and the most recent lines within `limit` overall.
async fn collect_lines<R>(reader: R, limit: usize) -> String
where
    R: AsyncRead + Unpin,
{
    let mut tail = DiagnosticTail::new(limit);
    let mut reader = BufReader::new(reader);
    let mut line: Vec<u8> = Vec::new();
    loop {
        let chunk = match reader.fill_buf().await {
            Ok(chunk) if !chunk.is_empty() => chunk,
            _ => break,
        };
        let newline = chunk.iter().position(|b| *b == b'\n');
        let segment = match newline {
            Some(end) => &chunk[..end],
            None => chunk,
        };
        // Bytes past the budget are skipped until the next newline.
        let room = limit.saturating_sub(line.len());
        line.extend_from_slice(&segment[..segment.len().min(room)]);
        let consumed = segment.len() + usize::from(newline.is_some());
        reader.consume(consumed);

        if newline.is_some() {
            push_line(&mut tail, &line);
            line.clear();
        }
    }
    if !line.is_empty() {
        push_line(&mut tail, &line);
    }
    tail.joined()
}

fn push_line(tail: &mut DiagnosticTail, bytes: &[u8]) {
    let line = String::from_utf8_lossy(bytes);
    tail.push(line.trim_end_matches('\r'));
}

async fn terminate(child: &mut Child, readers: [Option<JoinHandle<String>>; 2]) {
    if let Err(e) = child.kill().await {
        debug!(error = %e, "Failed to kill process");
    }
    for task in readers.into_iter().flatten() {
        task.abort();
    }
}

async fn join_output(task: Option<JoinHandle<String>>) -> String {
    match task {
        Some(task) => task.await.unwrap_or_default(),
        None => String::new(),
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::domain::model::cancel_pair;

    fn sh(script: &str) -> ProcessInvocation {
        ProcessInvocation::new("sh").args(["-c", script])
    }

    #[tokio::test]
    async fn test_captures_exit_code_and_stderr() {
        let adapter = TokioProcessAdapter::new();
        let result = adapter
            .run(&sh("echo oops >&2; exit 3"), &CancelSignal::never())
            .await
            .unwrap();
        assert_eq!(result.exit_code, Some(3));
        assert_eq!(result.stderr, "oops");
        assert!(result.stdout.is_empty());
    }

    #[tokio::test]
    async fn test_captures_stdout_when_requested() {
        let adapter = TokioProcessAdapter::new();
        let result = adapter
            .run(&sh("echo 12.5").capture_stdout(), &CancelSignal::never())
            .await
            .unwrap();
        assert!(result.success());
        assert_eq!(result.stdout.trim(), "12.5");
    }

    #[tokio::test]
    async fn test_arguments_are_not_shell_interpreted() {
        let adapter = TokioProcessAdapter::new();
        let invocation = ProcessInvocation::new("echo")
            .arg("$HOME; echo injected")
            .capture_stdout();
        let result = adapter
            .run(&invocation, &CancelSignal::never())
            .await
            .unwrap();
        assert_eq!(result.stdout, "$HOME; echo injected");
    }

    #[tokio::test]
    async fn test_missing_executable_is_spawn_error() {
        let adapter = TokioProcessAdapter::new();
        let invocation = ProcessInvocation::new("ambimux-definitely-not-installed");
        let err = adapter
            .run(&invocation, &CancelSignal::never())
            .await
            .unwrap_err();
        assert!(matches!(err, AmbimuxError::ProcessSpawn { .. }));
    }

    #[tokio::test]
    async fn test_timeout_kills_process() {
        let adapter = TokioProcessAdapter::new().with_timeout(Some(Duration::from_millis(100)));
        let err = adapter
            .run(&sh("sleep 5"), &CancelSignal::never())
            .await
            .unwrap_err();
        assert!(matches!(err, AmbimuxError::Timeout { .. }));
    }

    #[tokio::test]
    async fn test_cancellation_kills_process() {
        let adapter = TokioProcessAdapter::new().with_timeout(None);
        let (handle, signal) = cancel_pair();
        let invocation = sh("sleep 5");

        let run = adapter.run(&invocation, &signal);
        let cancel = async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            handle.cancel();
        };
        let (result, _) = tokio::join!(run, cancel);
        assert!(matches!(result, Err(AmbimuxError::Cancelled { .. })));
    }

    #[tokio::test]
    async fn test_diagnostics_are_bounded() {
        let adapter = TokioProcessAdapter::new().with_diagnostics_limit(64);
        let result = adapter
            .run(
                &sh("i=0; while [ $i -lt 200 ]; do echo line-$i >&2; i=$((i+1)); done"),
                &CancelSignal::never(),
            )
            .await
            .unwrap();
        assert!(result.stderr.starts_with('['));
        assert!(result.stderr.ends_with("line-199"));
        assert!(result.stderr.len() < 128);
    }

    #[tokio::test]
    async fn test_newline_free_stream_is_bounded() {
        use tokio::io::AsyncReadExt;

        let endless = tokio::io::repeat(b'a').take(20_000_000);
        let kept = collect_lines(endless, 64).await;
        assert_eq!(kept, "a".repeat(64));
    }

    #[tokio::test]
    async fn test_oversized_line_resyncs_at_newline() {
        use tokio::io::AsyncReadExt;

        let stream = tokio::io::repeat(b'x')
            .take(1_000_000)
            .chain(&b"\r\nshort\n"[..]);
        let kept = collect_lines(stream, 64).await;
        assert_eq!(kept, "[1 earlier lines truncated]\nshort");
    }

    #[tokio::test]
    async fn test_huge_stderr_line_from_process_is_bounded() {
        let adapter = TokioProcessAdapter::new().with_diagnostics_limit(64);
        let result = adapter
            .run(
                &sh("head -c 5000000 /dev/zero | tr '\\0' a >&2; exit 1"),
                &CancelSignal::never(),
            )
            .await
            .unwrap();
        assert_eq!(result.exit_code, Some(1));
        assert_eq!(result.stderr, "a".repeat(64));
    }
}
