//! Child process execution with a deadline.
//!
//! The child is placed in its own process group on Unix so that a timeout can
//! signal every descendant at once. Both pipes are drained on helper threads
//! while the main thread waits, so a child writing more than a pipe buffer
//! never stalls. Descendants still alive when the child exits are killed too,
//! since they would otherwise hold the pipes open past the deadline.

use std::io::Read;
use std::path::PathBuf;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use wait_timeout::ChildExt;

use crate::error::RunnerError;

/// Everything a finished child left behind.
#[derive(Debug, Clone)]
pub struct CapturedOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
    pub duration: Duration,
}

impl CapturedOutput {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Exit code, or `None` when the child was killed by a signal.
    pub fn code(&self) -> Option<i32> {
        self.status.code()
    }

    /// All of stdout, then all of stderr. The streams are captured separately,
    /// so this is not the order the child wrote them in; use it for display,
    /// not for anything that depends on which line came last.
    pub fn combined(&self) -> String {
        let mut out = self.stdout.clone();
        if !self.stderr.is_empty() {
            if !out.is_empty() && !out.ends_with('\n') {
                out.push('\n');
            }
            out.push_str(&self.stderr);
        }
        out
    }
}

/// Run `command` to completion, killing its whole process tree if it
/// outlives `timeout`. `None` waits indefinitely.
pub fn run_with_watchdog(
    mut command: Command,
    timeout: Option<Duration>,
) -> Result<CapturedOutput, RunnerError> {
    let program = PathBuf::from(command.get_program());
    command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        command.process_group(0);
    }

    tracing::debug!(program = %program.display(), ?timeout, "spawning");
    let start = Instant::now();
    let mut child = command
        .spawn()
        .map_err(|source| RunnerError::Spawn { program, source })?;

    let stdout = drain(child.stdout.take());
    let stderr = drain(child.stderr.take());

    let status = match timeout {
        Some(limit) => match child.wait_timeout(limit)? {
            Some(status) => status,
            None => {
                tracing::warn!(pid = child.id(), ?limit, "deadline passed, killing process tree");
                terminate(&mut child);
                let _ = collect(stdout);
                let _ = collect(stderr);
                return Err(RunnerError::Timeout(limit));
            }
        },
        None => child.wait()?,
    };

    #[cfg(unix)]
    kill_process_tree(child.id());

    let deadline = timeout.map(|limit| start + limit);
    let (Some(stdout), Some(stderr)) = (
        collect_before(stdout, deadline),
        collect_before(stderr, deadline),
    ) else {
        let limit = timeout.unwrap_or_default();
        tracing::warn!(pid = child.id(), ?limit, "output pipes still open at the deadline");
        return Err(RunnerError::Timeout(limit));
    };

    let captured = CapturedOutput {
        status,
        stdout,
        stderr,
        duration: start.elapsed(),
    };
    tracing::debug!(
        status = ?captured.code(),
        elapsed_ms = captured.duration.as_millis() as u64,
        "process finished"
    );
    Ok(captured)
}

/// Kill the child's tree, then the child itself, and reap it.
fn terminate(child: &mut Child) {
    kill_process_tree(child.id());
    let _ = child.kill();
    let _ = child.wait();
}

/// Forcefully terminate the process tree rooted at `pid`.
///
/// On Unix `pid` must lead its own process group, which
/// [`run_with_watchdog`] arranges. Signalling a group that no longer exists
/// is harmless, so calling this more than once is fine.
pub fn kill_process_tree(pid: u32) {
    #[cfg(unix)]
    let result = Command::new("kill")
        .args(["-KILL", "--", &format!("-{pid}")])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    #[cfg(windows)]
    let result = Command::new("taskkill")
        .args(["/T", "/F", "/PID", &pid.to_string()])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    #[cfg(not(any(unix, windows)))]
    let result: std::io::Result<ExitStatus> = Err(std::io::Error::new(
        std::io::ErrorKind::Unsupported,
        "process tree termination is not supported on this platform",
    ));

    match result {
        Ok(status) if status.success() => tracing::debug!(pid, "process tree killed"),
        Ok(status) => tracing::debug!(pid, code = ?status.code(), "process tree already gone"),
        Err(err) => tracing::warn!(pid, %err, "could not signal process tree"),
    }
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buf);
        }
        buf
    })
}

fn collect(handle: JoinHandle<Vec<u8>>) -> String {
    let bytes = handle.join().unwrap_or_default();
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Like [`collect`], but gives up at `deadline`. An abandoned reader thread
/// is detached and ends when the pipe closes.
fn collect_before(handle: JoinHandle<Vec<u8>>, deadline: Option<Instant>) -> Option<String> {
    if let Some(deadline) = deadline {
        while !handle.is_finished() {
            if Instant::now() >= deadline {
                return None;
            }
            thread::sleep(Duration::from_millis(10));
        }
    }
    Some(collect(handle))
}
