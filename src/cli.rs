//! CLI argument parsing and command dispatch

use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Args, Parser, Subcommand};
use log::LevelFilter;

use crate::commands;
use component_deps::config::Config;
use component_deps::output::OutputConfig;

/// Component dependencies - Fetch and link the components an inventory uses
#[derive(Parser, Debug)]
#[command(name = "component-deps")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalArgs,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: LevelFilter,

    /// Control verbosity. Can be repeated for more verbose output
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

/// Settings shared by all commands
#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Working directory containing inventory/ and dependencies/
    #[arg(
        long,
        global = true,
        value_name = "PATH",
        env = "COMPONENT_DEPS_WORK_DIR",
        default_value = "."
    )]
    pub work_dir: PathBuf,

    /// Base URL for global Git config repositories
    #[arg(
        long,
        global = true,
        value_name = "URL",
        env = "COMPONENT_DEPS_GLOBAL_GIT_BASE"
    )]
    pub global_git_base: Option<String>,

    /// Base URL for component repositories [default: {global-git-base}/commodore-components]
    #[arg(
        long,
        global = true,
        value_name = "URL",
        env = "COMPONENT_DEPS_COMPONENT_BASE"
    )]
    pub component_base: Option<String>,

    /// Component URL override file, relative to the working directory
    #[arg(
        long,
        global = true,
        value_name = "PATH",
        env = "COMPONENT_DEPS_CONFIG_FILE"
    )]
    pub config_file: Option<PathBuf>,
}

impl GlobalArgs {
    /// Builds the run configuration.
    ///
    /// Fails when neither a global git base nor a component base is known.
    pub fn config(&self) -> Result<Config> {
        let mut config = match (&self.global_git_base, &self.component_base) {
            (Some(global), _) => Config::new(&self.work_dir, global),
            (None, Some(_)) => self.local_config(),
            (None, None) => anyhow::bail!(
                "No repository base configured. Set --global-git-base or --component-base"
            ),
        };
        if let Some(base) = &self.component_base {
            config = config.with_component_base(base);
        }
        if let Some(file) = &self.config_file {
            config = config.with_config_file(file);
        }
        Ok(config)
    }

    /// Builds a configuration that only needs the working directory.
    pub fn local_config(&self) -> Config {
        Config::new(&self.work_dir, self.global_git_base.as_deref().unwrap_or(""))
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch and link all components referenced by the inventory
    Fetch(commands::fetch::FetchArgs),

    /// Delete inventory, dependencies and compiled output
    Clean(commands::clean::CleanArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(self.log_level, self.verbose);
        let output = OutputConfig::from_env_and_flag(&self.color);

        match self.command {
            Commands::Fetch(args) => commands::fetch::execute(args, &self.global, output),
            Commands::Clean(args) => commands::clean::execute(args, &self.global, output),
        }
    }
}

/// Log level after applying `-v` flags on top of `--log-level`.
///
/// `-v`, `-vv` and `-vvv` ask for at least info, debug and trace; the more
/// verbose of that and `--log-level` wins.
fn effective_log_level(log_level: LevelFilter, verbose: u8) -> LevelFilter {
    let requested = match verbose {
        0 => LevelFilter::Off,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    log_level.max(requested)
}

/// Initialise `env_logger`. `RUST_LOG` takes precedence over the flags.
fn init_logging(log_level: LevelFilter, verbose: u8) {
    env_logger::Builder::new()
        .filter_level(effective_log_level(log_level, verbose))
        .parse_default_env()
        .format_timestamp(None)
        .init();
}
