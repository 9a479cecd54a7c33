//! Application service: cleaning build products.
//!
//! Targets are validated up front so a typo never leaves the tree half
//! cleaned.

use std::collections::BTreeSet;
use std::fmt;

use anyhow::{Context, Result};
use oxy_common::{Project, container_build_dir, container_project_dir};

use crate::application::ports::{ContainerRuntime, LocalFs, ProgressReporter};
use crate::application::services::sandbox::Sandbox;
use crate::domain::CleanError;
use crate::domain::CommandSpec;
use crate::domain::extpkgs::{CLEAN_ALL, CLEAN_SCRIPT, parse_clean_targets};

/// Targets cleaned when none are named.
pub const DEFAULT_CLEAN_TARGETS: [Project; 3] =
    [Project::AliceO2, Project::FairRoot, Project::FairSoft];

/// Something `oxy clean` can clean.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanTarget {
    Project(Project),
    /// A FairSoft external package listed in `make_clean.sh`.
    Package(String),
}

impl fmt::Display for CleanTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CleanTarget::Project(p) => write!(f, "{p}"),
            CleanTarget::Package(name) => f.write_str(name),
        }
    }
}

/// Map target names to clean targets, in the order given.
///
/// `packages` is only called when a name is not a project, so the clean
/// script is not read for plain project cleans.
///
/// # Errors
///
/// Returns `CleanError::UnknownTarget` for the first name that is neither a
/// project nor a listed package, or the error of `packages`.
pub fn resolve_targets(
    names: &[String],
    packages: impl FnOnce() -> Result<BTreeSet<String>>,
) -> Result<Vec<CleanTarget>> {
    if names.is_empty() {
        return Ok(DEFAULT_CLEAN_TARGETS
            .into_iter()
            .map(CleanTarget::Project)
            .collect());
    }

    let mut packages = Some(packages);
    let mut known: Option<BTreeSet<String>> = None;
    let mut targets = Vec::with_capacity(names.len());
    for name in names {
        if let Ok(project) = name.parse::<Project>() {
            targets.push(CleanTarget::Project(project));
            continue;
        }
        if known.is_none() {
            known = Some(match packages.take() {
                Some(load) => load()?,
                None => BTreeSet::new(),
            });
        }
        if known.as_ref().is_some_and(|set| set.contains(name)) {
            targets.push(CleanTarget::Package(name.clone()));
        } else {
            return Err(CleanError::UnknownTarget(name.clone()).into());
        }
    }
    Ok(targets)
}

/// In-container command that cleans `target`.
#[must_use]
pub fn clean_command(target: &CleanTarget) -> CommandSpec {
    let script = format!("./{CLEAN_SCRIPT}");
    let fairsoft_dir = container_project_dir(Project::FairSoft.name());
    match target {
        CleanTarget::Project(Project::FairSoft) => CommandSpec::new(script)
            .arg(CLEAN_ALL)
            .current_dir(fairsoft_dir),
        CleanTarget::Project(project) => CommandSpec::new("make")
            .arg("clean")
            .current_dir(container_build_dir(project.name())),
        CleanTarget::Package(name) => CommandSpec::new(script)
            .arg(name.as_str())
            .current_dir(fairsoft_dir),
    }
}

/// Clean `names` (or the default targets) one after another.
///
/// # Errors
///
/// Returns an error for an unknown target before anything runs, or the
/// first failing clean command.
pub async fn clean<C: ContainerRuntime>(
    fs: &impl LocalFs,
    sandbox: &Sandbox<'_, C>,
    names: &[String],
    reporter: &impl ProgressReporter,
) -> Result<Vec<CleanTarget>> {
    let script = sandbox
        .config()
        .project_dir(Project::FairSoft)
        .join(CLEAN_SCRIPT);
    let targets = resolve_targets(names, || {
        let text = fs
            .read_to_string(&script)
            .with_context(|| format!("reading {}", script.display()))?;
        Ok(parse_clean_targets(&text))
    })?;

    for target in &targets {
        reporter.step(&format!("cleaning [{target}]..."));
        sandbox
            .exec(clean_command(target))
            .await
            .with_context(|| format!("cleaning {target}"))?;
    }
    reporter.success("clean complete.");
    Ok(targets)
}
