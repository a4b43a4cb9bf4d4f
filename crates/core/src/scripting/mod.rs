//! External program invocation.
//!
//! [`subprocess::run_command`] spawns a prepared [`tokio::process::Command`],
//! drains stdout and stderr concurrently, and enforces a wall-clock timeout.
//! The types below describe what goes in and what comes back.

pub mod subprocess;

use std::path::PathBuf;
use std::time::Duration;

/// Invocation parameters for a single subprocess run.
#[derive(Debug, Clone)]
pub struct ScriptInput {
    /// Positional arguments appended after the program.
    pub args: Vec<String>,
    /// Working directory for the child process (inherits ours if `None`).
    pub working_directory: Option<PathBuf>,
    /// Maximum wall-clock time before the process is killed.
    pub timeout: Duration,
}

/// Captured output from a finished process.
#[derive(Debug, Clone)]
pub struct ScriptOutput {
    /// Complete stdout captured from the process.
    pub stdout: String,
    /// Complete stderr captured from the process.
    pub stderr: String,
    /// Process exit code (`-1` if killed by signal).
    pub exit_code: i32,
    /// Wall-clock duration in milliseconds.
    pub duration_ms: u64,
}

impl ScriptOutput {
    pub fn succeeded(&self) -> bool {
        self.exit_code == 0
    }
}

/// Errors raised before a process produced an exit status.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    /// The process exceeded its timeout and was killed.
    #[error("Script timed out after {elapsed_ms}ms")]
    Timeout { elapsed_ms: u64 },

    /// Spawning or waiting on the process failed.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
