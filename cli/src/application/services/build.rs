//! Application service: the fixed build pipeline.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! Stages run strictly in order; the first failing stage aborts the
//! pipeline and nothing is retried.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use oxy_common::{
    CONTAINER_INSTALL_PATH, CONTAINER_SRC_DIR, Project, WorkspaceConfig, container_build_dir,
    container_project_dir,
};

use crate::application::ports::{CommandRunner, ContainerRuntime, LocalFs, ProgressReporter};
use crate::application::services::sandbox::Sandbox;
use crate::application::services::sources::sync_sources;
use crate::domain::CommandSpec;
use crate::domain::fairsoft::{FAIRSOFT_CONFIG_FILE, FairSoftConfig};

/// One step of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    FetchSources,
    WriteConfig,
    FairSoft,
    FairRoot,
    AliceO2,
}

impl Stage {
    /// The stage that builds `project`.
    #[must_use]
    pub fn for_project(project: Project) -> Self {
        match project {
            Project::FairSoft => Stage::FairSoft,
            Project::FairRoot => Stage::FairRoot,
            Project::AliceO2 => Stage::AliceO2,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Stage::FetchSources => "fetch sources",
            Stage::WriteConfig => "write config",
            Stage::FairSoft => "build fair-soft",
            Stage::FairRoot => "build fair-root",
            Stage::AliceO2 => "build alice-o2",
        };
        f.write_str(label)
    }
}

/// What to build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    /// Projects to build; empty means all of them.
    pub targets: Vec<Project>,
    /// Clone/fetch the sources first.
    pub fetch: bool,
    /// Parallelism passed to `make -j`.
    pub jobs: usize,
}

impl BuildOptions {
    /// Stages to run, in pipeline order. Project stages keep build order
    /// whatever order the targets were given in.
    #[must_use]
    pub fn stages(&self) -> Vec<Stage> {
        let mut stages = Vec::new();
        if self.fetch {
            stages.push(Stage::FetchSources);
        }
        stages.push(Stage::WriteConfig);
        let mut projects: Vec<Project> = if self.targets.is_empty() {
            Project::ALL.to_vec()
        } else {
            self.targets.clone()
        };
        projects.sort();
        projects.dedup();
        stages.extend(projects.into_iter().map(Stage::for_project));
        stages
    }
}

/// In-container commands of a project stage; empty for host-side stages.
#[must_use]
pub fn stage_commands(stage: Stage, config: &WorkspaceConfig, jobs: usize) -> Vec<CommandSpec> {
    let make_jobs = format!("-j{jobs}");
    match stage {
        Stage::FetchSources | Stage::WriteConfig => Vec::new(),
        Stage::FairSoft => vec![
            CommandSpec::new("/bin/sh")
                .args(["-c", &format!("./configure.sh ../{FAIRSOFT_CONFIG_FILE}")])
                .current_dir(container_project_dir(Project::FairSoft.name())),
        ],
        Stage::FairRoot => {
            let dir = container_build_dir(Project::FairRoot.name());
            vec![
                CommandSpec::new("cmake")
                    .arg(format!("-DCMAKE_INSTALL_PREFIX={CONTAINER_INSTALL_PATH}"))
                    .arg("-DUSE_NANOMSG=1")
                    .arg(format!("-DCMAKE_CXX_COMPILER={}", config.env.cxx))
                    .arg(format!("-DCMAKE_C_COMPILER={}", config.env.cc))
                    .arg("../")
                    .current_dir(&dir),
                CommandSpec::new("make").arg(&make_jobs).current_dir(&dir),
                CommandSpec::new("make").arg("install").current_dir(&dir),
            ]
        }
        Stage::AliceO2 => {
            let dir = container_build_dir(Project::AliceO2.name());
            vec![
                CommandSpec::new("cmake").arg("../").current_dir(&dir),
                CommandSpec::new("make").arg(&make_jobs).current_dir(&dir),
            ]
        }
    }
}

/// Write `config.cache` into `src_dir` and return its path.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_fairsoft_config(fs: &impl LocalFs, src_dir: &Path) -> Result<PathBuf> {
    let path = src_dir.join(FAIRSOFT_CONFIG_FILE);
    let content = FairSoftConfig::default().render();
    tracing::debug!(path = %path.display(), config = %content, "writing externals config");
    fs.write(&path, &content)?;
    Ok(path)
}

/// Run the pipeline and return the stages that completed.
///
/// # Errors
///
/// Returns the first stage failure, wrapped with the stage name.
pub async fn run_pipeline<C: ContainerRuntime>(
    runner: &impl CommandRunner,
    fs: &impl LocalFs,
    sandbox: &Sandbox<'_, C>,
    opts: &BuildOptions,
    reporter: &impl ProgressReporter,
) -> Result<Vec<Stage>> {
    let mut completed = Vec::new();
    for stage in opts.stages() {
        reporter.step(&format!("{stage}..."));
        run_stage(stage, runner, fs, sandbox, opts.jobs, reporter)
            .await
            .with_context(|| format!("stage '{stage}' failed"))?;
        completed.push(stage);
    }

    reporter.success("build complete.");
    if completed.contains(&Stage::AliceO2) {
        reporter.step(&format!(
            "run: source {CONTAINER_SRC_DIR}/alice-o2/build/config.sh (inside 'oxy shell') to get a runtime environment."
        ));
    }
    Ok(completed)
}

async fn run_stage<C: ContainerRuntime>(
    stage: Stage,
    runner: &impl CommandRunner,
    fs: &impl LocalFs,
    sandbox: &Sandbox<'_, C>,
    jobs: usize,
    reporter: &impl ProgressReporter,
) -> Result<()> {
    let config = sandbox.config();
    match stage {
        Stage::FetchSources => sync_sources(runner, fs, &config.src_dir, reporter).await,
        Stage::WriteConfig => write_fairsoft_config(fs, &config.src_dir).map(|_| ()),
        Stage::FairSoft | Stage::FairRoot | Stage::AliceO2 => {
            if let Some(project) = stage_project(stage).filter(|p| *p != Project::FairSoft) {
                fs.create_dir_all(&config.build_dir(project))?;
            }
            for command in stage_commands(stage, config, jobs) {
                sandbox.exec(command).await?;
            }
            Ok(())
        }
    }
}

fn stage_project(stage: Stage) -> Option<Project> {
    match stage {
        Stage::FairSoft => Some(Project::FairSoft),
        Stage::FairRoot => Some(Project::FairRoot),
        Stage::AliceO2 => Some(Project::AliceO2),
        Stage::FetchSources | Stage::WriteConfig => None,
    }
}
