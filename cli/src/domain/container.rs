//! Rendering of a single `docker run` invocation.

use std::path::PathBuf;

use oxy_common::{
    CONTAINER_INSTALL_PATH, CONTAINER_SIM_PATH, CONTAINER_SRC_DIR, CONTAINER_USER,
    WorkspaceConfig,
};

use crate::domain::command::CommandSpec;
use crate::domain::env::build_env;

/// Prefix of the names given to containers spawned by this tool.
pub const CONTAINER_ID_PREFIX: &str = "oxy-box";

/// Name of the container spawned by the process with the given pid.
#[must_use]
pub fn container_id(pid: u32) -> String {
    format!("{CONTAINER_ID_PREFIX}-{pid}")
}

/// Everything needed to start one ephemeral build container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerRun {
    /// Container name; also used as hostname and as the registry key.
    pub id: String,
    /// Image tag built by `init-container`.
    pub image: String,
    /// Host path → container path bind mounts.
    pub mounts: Vec<(PathBuf, String)>,
    pub user: String,
    /// Command to execute inside the container; its `dir` is the container workdir.
    pub command: CommandSpec,
    /// Allocate a TTY and keep stdin open (`-it`).
    pub interactive: bool,
}

impl ContainerRun {
    /// Standard build container for `config`: workspace mounts, build
    /// environment, and `command` appended to its own env.
    #[must_use]
    pub fn for_workspace(
        config: &WorkspaceConfig,
        id: String,
        mut command: CommandSpec,
        interactive: bool,
    ) -> Self {
        let mut env = build_env(&config.env);
        env.append(&mut command.env);
        command.env = env;
        Self {
            id,
            image: config.container.clone(),
            mounts: vec![
                (config.src_dir.clone(), CONTAINER_SRC_DIR.to_string()),
                (config.sim_path.clone(), CONTAINER_SIM_PATH.to_string()),
                (config.fair_root_path.clone(), CONTAINER_INSTALL_PATH.to_string()),
            ],
            user: CONTAINER_USER.to_string(),
            command,
            interactive,
        }
    }

    /// Arguments passed to the `docker` binary.
    #[must_use]
    pub fn docker_args(&self) -> Vec<String> {
        let mut args = vec!["run".to_string()];
        if self.interactive {
            args.push("-it".to_string());
        }
        args.push("--rm".to_string());
        for (host, guest) in &self.mounts {
            args.push("-v".to_string());
            args.push(format!("{}:{guest}", host.display()));
        }
        args.push("-u".to_string());
        args.push(self.user.clone());
        if let Some(dir) = self.command.dir_display() {
            args.push("-w".to_string());
            args.push(dir);
        }
        for (key, value) in &self.command.env {
            args.push("-e".to_string());
            args.push(format!("{key}={value}"));
        }
        args.extend([
            "--name".to_string(),
            self.id.clone(),
            "-h".to_string(),
            self.id.clone(),
            self.image.clone(),
            self.command.program.clone(),
        ]);
        args.extend(self.command.args.iter().cloned());
        args
    }
}
