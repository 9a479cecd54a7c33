//! Shared mock infrastructure for unit tests.
//!
//! Recording implementations of the application ports so each test file
//! doesn't have to re-define the same boilerplate.

#![allow(dead_code, clippy::expect_used)]

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Output};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::Result;
use oxy_cli::application::ports::{
    CommandRunner, ConfigStore, ContainerRuntime, LocalFs, ProgressReporter,
};
use oxy_cli::domain::{CommandSpec, ContainerRun};
use oxy_common::WorkspaceConfig;

// ── Output helpers ────────────────────────────────────────────────────────────

/// Build an `ExitStatus` from a logical exit code.
///
/// On Unix the raw wait-status encodes the exit code in bits 8–15, so we shift.
#[cfg(unix)]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    ExitStatus::from_raw(code << 8)
}

#[cfg(windows)]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::windows::process::ExitStatusExt;
    #[allow(clippy::cast_sign_loss)]
    ExitStatus::from_raw(code as u32)
}

pub fn ok_output(stdout: &[u8]) -> Output {
    Output {
        status: exit_status(0),
        stdout: stdout.to_vec(),
        stderr: Vec::new(),
    }
}

pub fn err_output(code: i32, stderr: &[u8]) -> Output {
    Output {
        status: exit_status(code),
        stdout: Vec::new(),
        stderr: stderr.to_vec(),
    }
}

/// Initialized workspace at `/ws` with image `oxy-dev` registered.
pub fn container_config() -> WorkspaceConfig {
    let mut cfg = WorkspaceConfig::for_root(Path::new("/ws"));
    cfg.container = "oxy-dev".to_string();
    cfg
}

// ── Mock: command runner ──────────────────────────────────────────────────────

/// Records every command; commands whose rendering contains `fail_on` exit 1.
#[derive(Default)]
pub struct RecordingRunner {
    pub calls: Mutex<Vec<CommandSpec>>,
    pub fail_on: Option<String>,
}

impl RecordingRunner {
    pub fn failing_on(pattern: &str) -> Self {
        Self {
            fail_on: Some(pattern.to_string()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.lock().expect("mutex poisoned").clone()
    }

    pub fn rendered(&self) -> Vec<String> {
        self.calls().iter().map(ToString::to_string).collect()
    }

    fn record(&self, spec: &CommandSpec) -> i32 {
        self.calls.lock().expect("mutex poisoned").push(spec.clone());
        match &self.fail_on {
            Some(pattern) if spec.to_string().contains(pattern.as_str()) => 1,
            _ => 0,
        }
    }
}

impl CommandRunner for RecordingRunner {
    async fn run(&self, spec: &CommandSpec) -> Result<Output> {
        match self.record(spec) {
            0 => Ok(ok_output(b"")),
            code => Ok(err_output(code, b"Error: No such container")),
        }
    }

    async fn run_with_timeout(&self, spec: &CommandSpec, _timeout: Duration) -> Result<Output> {
        self.run(spec).await
    }

    async fn run_status(&self, spec: &CommandSpec) -> Result<ExitStatus> {
        Ok(exit_status(self.record(spec)))
    }
}

// ── Mock: container runtime ───────────────────────────────────────────────────

/// Records runtime calls as short event strings (`run <id> <command>`,
/// `kill <id>`, `rm <id>`, `pull <image>`, `build <tag>`).
#[derive(Default)]
pub struct RecordingRuntime {
    pub events: Mutex<Vec<String>>,
    pub runs: Mutex<Vec<ContainerRun>>,
    /// Runs whose command contains this exit with code 2.
    pub fail_run: Option<String>,
    /// Runs never finish (simulates a long build).
    pub hang: bool,
    pub fail_pull: bool,
}

impl RecordingRuntime {
    pub fn failing_run(pattern: &str) -> Self {
        Self {
            fail_run: Some(pattern.to_string()),
            ..Self::default()
        }
    }

    pub fn hanging() -> Self {
        Self {
            hang: true,
            ..Self::default()
        }
    }

    pub fn events(&self) -> Vec<String> {
        self.events.lock().expect("mutex poisoned").clone()
    }

    /// Rendered commands of every container run, in order.
    pub fn run_commands(&self) -> Vec<String> {
        self.runs
            .lock()
            .expect("mutex poisoned")
            .iter()
            .map(|r| r.command.to_string())
            .collect()
    }

    pub fn runs(&self) -> Vec<ContainerRun> {
        self.runs.lock().expect("mutex poisoned").clone()
    }

    /// Record an event that happened outside the port, e.g. the daemon
    /// finishing a container creation.
    pub fn record(&self, event: &str) {
        self.push(event.to_string());
    }

    fn push(&self, event: String) {
        self.events.lock().expect("mutex poisoned").push(event);
    }
}

impl ContainerRuntime for RecordingRuntime {
    async fn pull(&self, image: &str) -> Result<()> {
        self.push(format!("pull {image}"));
        if self.fail_pull {
            anyhow::bail!("pull failed");
        }
        Ok(())
    }

    async fn build_image(&self, tag: &str, _context_dir: &Path) -> Result<()> {
        self.push(format!("build {tag}"));
        Ok(())
    }

    async fn run(&self, run: &ContainerRun) -> Result<ExitStatus> {
        self.push(format!("run {} {}", run.id, run.command));
        self.runs.lock().expect("mutex poisoned").push(run.clone());
        if self.hang {
            std::future::pending::<()>().await;
        }
        let failed = self
            .fail_run
            .as_ref()
            .is_some_and(|p| run.command.to_string().contains(p.as_str()));
        Ok(exit_status(if failed { 2 } else { 0 }))
    }

    async fn kill(&self, id: &str) -> Result<Output> {
        self.push(format!("kill {id}"));
        Ok(ok_output(b""))
    }

    async fn remove(&self, id: &str) -> Result<Output> {
        self.push(format!("rm {id}"));
        Ok(ok_output(b""))
    }
}

// ── Mock: filesystem ──────────────────────────────────────────────────────────

/// In-memory filesystem: a set of directories and a map of files.
#[derive(Default)]
pub struct MemFs {
    pub dirs: Mutex<HashSet<PathBuf>>,
    pub files: Mutex<HashMap<PathBuf, String>>,
}

impl MemFs {
    pub fn with_dirs(dirs: &[&str]) -> Self {
        let fs = Self::default();
        fs.dirs
            .lock()
            .expect("mutex poisoned")
            .extend(dirs.iter().map(PathBuf::from));
        fs
    }

    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.files
            .lock()
            .expect("mutex poisoned")
            .insert(PathBuf::from(path), content.to_string());
        self
    }

    pub fn file(&self, path: &str) -> Option<String> {
        self.files
            .lock()
            .expect("mutex poisoned")
            .get(Path::new(path))
            .cloned()
    }

    pub fn has_dir(&self, path: &str) -> bool {
        self.dirs.lock().expect("mutex poisoned").contains(Path::new(path))
    }
}

impl LocalFs for MemFs {
    fn exists(&self, path: &Path) -> bool {
        self.dirs.lock().expect("mutex poisoned").contains(path)
            || self.files.lock().expect("mutex poisoned").contains_key(path)
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        self.dirs
            .lock()
            .expect("mutex poisoned")
            .insert(path.to_path_buf());
        Ok(())
    }

    fn write(&self, path: &Path, content: &str) -> Result<()> {
        self.files
            .lock()
            .expect("mutex poisoned")
            .insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        self.files
            .lock()
            .expect("mutex poisoned")
            .get(path)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("no such file: {}", path.display()))
    }
}

// ── Mock: config store ────────────────────────────────────────────────────────

/// In-memory cache; records every saved config.
#[derive(Default)]
pub struct MemStore {
    pub current: Mutex<WorkspaceConfig>,
    pub saves: Mutex<Vec<WorkspaceConfig>>,
}

impl MemStore {
    pub fn with(config: WorkspaceConfig) -> Self {
        Self {
            current: Mutex::new(config),
            saves: Mutex::new(Vec::new()),
        }
    }

    pub fn saves(&self) -> Vec<WorkspaceConfig> {
        self.saves.lock().expect("mutex poisoned").clone()
    }
}

impl ConfigStore for MemStore {
    fn load(&self) -> WorkspaceConfig {
        self.current.lock().expect("mutex poisoned").clone()
    }

    fn save(&self, config: &WorkspaceConfig) -> Result<()> {
        *self.current.lock().expect("mutex poisoned") = config.clone();
        self.saves.lock().expect("mutex poisoned").push(config.clone());
        Ok(())
    }

    fn path(&self) -> PathBuf {
        PathBuf::from("/ws/.oxy.json")
    }
}

// ── Mock: progress reporter ───────────────────────────────────────────────────

/// Collects reported messages.
#[derive(Default)]
pub struct CollectingReporter {
    pub messages: Mutex<Vec<String>>,
}

impl CollectingReporter {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().expect("mutex poisoned").clone()
    }
}

impl ProgressReporter for CollectingReporter {
    fn step(&self, message: &str) {
        self.messages
            .lock()
            .expect("mutex poisoned")
            .push(format!("step: {message}"));
    }

    fn success(&self, message: &str) {
        self.messages
            .lock()
            .expect("mutex poisoned")
            .push(format!("success: {message}"));
    }

    fn warn(&self, message: &str) {
        self.messages
            .lock()
            .expect("mutex poisoned")
            .push(format!("warn: {message}"));
    }
}
