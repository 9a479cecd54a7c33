//! CLI argument parsing with clap derive

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, AppFlags, OutputFlags};
use crate::commands;

/// Build the ALICE O2 software stack in a docker container
#[derive(Parser)]
#[command(
    name = "oxy",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Initialize a workspace: fetch sources and create the build image
    Init(commands::init::InitArgs),

    /// Create the docker image used for compilation
    InitContainer(commands::init_container::InitContainerArgs),

    /// Build fair-soft, fair-root and alice-o2
    Build(commands::build::BuildArgs),

    /// Clean build products of the given targets
    Clean(commands::clean::CleanArgs),

    /// Run a command (default: bash) in the build container
    Shell(commands::shell::ShellArgs),
}

impl Cli {
    /// Flags shared by every command.
    #[must_use]
    pub fn flags(&self) -> AppFlags {
        AppFlags {
            output: OutputFlags {
                no_color: self.no_color,
                quiet: self.quiet,
            },
            verbose: self.verbose,
        }
    }

    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn run(self, app: &AppContext) -> Result<ExitCode> {
        let done = |()| ExitCode::SUCCESS;
        match self.command {
            Command::Init(args) => commands::init::run(&args, app).await.map(done),
            Command::InitContainer(args) => {
                commands::init_container::run(&args, app).await.map(done)
            }
            Command::Build(args) => commands::build::run(&args, app).await.map(done),
            Command::Clean(args) => commands::clean::run(&args, app).await.map(done),
            Command::Shell(args) => commands::shell::run(&args, app).await,
        }
    }
}
