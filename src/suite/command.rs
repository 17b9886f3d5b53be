//! Shell command execution for command checks

use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, warn};
use wait_timeout::ChildExt;

/// How long to wait for pipe readers once the child has exited
const OUTPUT_COLLECTION_TIMEOUT: Duration = Duration::from_secs(10);

/// Maximum captured size per stream (10MB)
const MAX_OUTPUT_SIZE: usize = 10 * 1024 * 1024;

/// Lines of stderr kept in a failure message
pub const STDERR_TAIL_LINES: usize = 20;

/// What happened to one command
#[derive(Debug, Clone)]
pub struct CommandResult {
    pub command: String,
    pub stdout: String,
    pub stderr: String,
    /// `None` when the process was killed or terminated by a signal
    pub exit_code: Option<i32>,
    pub duration: Duration,
    pub timed_out: bool,
}

impl CommandResult {
    pub fn success(&self) -> bool {
        !self.timed_out && self.exit_code == Some(0)
    }

    /// One-line failure description with the stderr tail, or `None` on success
    pub fn failure_message(&self, timeout: Duration) -> Option<String> {
        if self.success() {
            return None;
        }
        let mut message = if self.timed_out {
            format!(
                "timed out after {}",
                crate::report::format_duration(timeout)
            )
        } else {
            match self.exit_code {
                Some(code) => format!("command exited with code {code}"),
                None => "command terminated by signal".to_string(),
            }
        };
        let tail = tail_lines(&self.stderr, STDERR_TAIL_LINES);
        if !tail.is_empty() {
            message.push('\n');
            message.push_str(&tail);
        }
        Some(message)
    }
}

/// Run `command` through the shell, killing it if it outlives `timeout`
pub fn run_command(
    command: &str,
    working_dir: Option<&Path>,
    timeout: Duration,
) -> Result<CommandResult> {
    let start = Instant::now();
    let mut child = spawn_shell_command(command, working_dir)?;

    // Drain the pipes while waiting, or a chatty child blocks on a full pipe.
    let stdout_rx = spawn_reader(child.stdout.take());
    let stderr_rx = spawn_reader(child.stderr.take());

    let status = child
        .wait_timeout(timeout)
        .with_context(|| format!("Failed to wait for command: {command}"))?;

    let timed_out = status.is_none();
    if timed_out {
        warn!(command, "command timed out, killing");
        kill_child_process(&mut child);
    }
    let duration = start.elapsed();

    // Both readers share one deadline so a stuck pipe costs the wait once.
    let deadline = Instant::now() + OUTPUT_COLLECTION_TIMEOUT;
    let stdout = collect(&stdout_rx, deadline);
    let stderr = collect(&stderr_rx, deadline);

    let exit_code = status.and_then(|s: ExitStatus| s.code());
    debug!(command, ?exit_code, timed_out, "command finished");

    Ok(CommandResult {
        command: command.to_string(),
        stdout,
        stderr,
        exit_code,
        duration,
        timed_out,
    })
}

fn spawn_shell_command(command: &str, working_dir: Option<&Path>) -> Result<Child> {
    let mut cmd = if cfg!(target_family = "unix") {
        let mut c = Command::new("sh");
        c.arg("-c").arg(command);
        c
    } else {
        let mut c = Command::new("cmd");
        c.arg("/C").arg(command);
        c
    };

    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    if let Some(dir) = working_dir {
        cmd.current_dir(dir);
    }

    // Own process group, so a timeout can kill everything the shell started
    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        cmd.process_group(0);
    }

    cmd.spawn()
        .with_context(|| format!("Failed to spawn command: {command}"))
}

fn spawn_reader<R: Read + Send + 'static>(stream: Option<R>) -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel();
    match stream {
        Some(stream) => {
            thread::spawn(move || {
                let _ = tx.send(read_stream_to_string(stream));
            });
        }
        None => {
            let _ = tx.send(String::new());
        }
    }
    rx
}

fn collect(rx: &mpsc::Receiver<String>, deadline: Instant) -> String {
    rx.recv_timeout(deadline.saturating_duration_since(Instant::now()))
        .unwrap_or_else(|_| "[output collection timed out]".to_string())
}

/// Read a stream to a string, keeping at most [`MAX_OUTPUT_SIZE`] bytes
fn read_stream_to_string<R: Read>(mut stream: R) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 8192];

    loop {
        match stream.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => {
                let remaining = MAX_OUTPUT_SIZE.saturating_sub(buf.len());
                let to_copy = n.min(remaining);
                buf.extend_from_slice(&chunk[..to_copy]);
                if to_copy < n {
                    // Keep draining so the child never sees a broken pipe
                    while stream.read(&mut chunk).unwrap_or(0) > 0 {}
                    buf.extend_from_slice(b"\n[output truncated at 10MB]");
                    break;
                }
            }
            Err(_) => {
                if buf.is_empty() {
                    return "[error reading output]".to_string();
                }
                break;
            }
        }
    }

    String::from_utf8_lossy(&buf).into_owned()
}

/// Kill the child's whole process group, then reap the child
fn kill_child_process(child: &mut Child) {
    #[cfg(unix)]
    {
        use nix::sys::signal::{killpg, Signal};
        use nix::unistd::Pid;

        if let Ok(pgid) = i32::try_from(child.id()) {
            if let Err(e) = killpg(Pid::from_raw(pgid), Signal::SIGKILL) {
                debug!(pgid, "killpg failed: {e}");
            }
        }
    }
    let _ = child.kill();
    let _ = child.wait();
}

/// Last `max_lines` lines of `text`, ignoring trailing whitespace
pub fn tail_lines(text: &str, max_lines: usize) -> String {
    let lines: Vec<&str> = text.trim_end().lines().collect();
    let skip = lines.len().saturating_sub(max_lines);
    lines[skip..].join("\n")
}
