//! CLI for goci
//!
//! Resolves Go pipeline plans and prints them:
//! - `base`: Go container with caches and the project mounted
//! - `test`: `go test` plan
//! - `lint`: `golangci-lint` plan
//! - `completions`: Generate shell completions
//!
//! Options from the configuration file come first, command-line flags are
//! applied after them and therefore win.

pub mod completions;
pub mod render;

use anyhow::{Context, Result};
use clap::{ArgAction, CommandFactory, Parser, Subcommand, ValueEnum};
use goci::client::{BaseClient, CiDetectorClient, Client, Container};
use goci::golang::{
    self, CommonOption, CoverMode, LintOption, TestOption, base_image, base_image_repository,
    base_image_tag, cover_profile, disable_cgo, enable_cgo, enable_race_detector, project_root,
    source_image, source_image_repository, source_image_tag, verbose,
};
use goci::infrastructure::{Config, init_logging};
use std::path::{Path, PathBuf};

/// CLI arguments for goci
#[derive(Parser, Debug)]
#[command(name = "goci")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file (defaults to ./goci.yaml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, global = true, default_value_t = FormatArg::Text)]
    format: FormatArg,

    /// Log level, overrides the configuration file
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Do not forward CI variables into containers
    #[arg(long, global = true)]
    no_ci_env: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Go container with build caches and the project mounted
    Base {
        #[command(flatten)]
        common: CommonArgs,
    },

    /// Run `go test` on every package
    Test(TestArgs),

    /// Run golangci-lint on the project
    Lint(LintArgs),

    /// Generate shell completions
    Completions {
        /// Shell type
        #[arg(value_enum)]
        shell: ShellArg,
        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Flags shared by every pipeline command
#[derive(clap::Args, Debug, Default)]
struct CommonArgs {
    /// Base image repository, without tag
    #[arg(long)]
    base_image_repository: Option<String>,
    /// Base image tag
    #[arg(long, visible_alias = "go-version")]
    base_image_tag: Option<String>,
    /// Full base image reference, wins over repository and tag
    #[arg(long)]
    base_image: Option<String>,
    /// Set CGO_ENABLED=1
    #[arg(long, conflicts_with = "no_cgo")]
    cgo: bool,
    /// Set CGO_ENABLED=0
    #[arg(long)]
    no_cgo: bool,
    /// Project root on the host
    #[arg(long)]
    project_root: Option<String>,
}

impl CommonArgs {
    fn to_options(&self) -> Vec<CommonOption> {
        let mut opts = Vec::new();

        if let Some(v) = &self.base_image_repository {
            opts.push(base_image_repository(v.as_str()));
        }
        if let Some(v) = &self.base_image_tag {
            opts.push(base_image_tag(v.as_str()));
        }
        if let Some(v) = &self.base_image {
            opts.push(base_image(v.as_str()));
        }
        if self.cgo {
            opts.push(enable_cgo());
        }
        if self.no_cgo {
            opts.push(disable_cgo());
        }
        if let Some(v) = &self.project_root {
            opts.push(project_root(v.as_str()));
        }

        opts
    }
}

/// Flags of the `test` command
#[derive(clap::Args, Debug, Default)]
struct TestArgs {
    #[command(flatten)]
    common: CommonArgs,
    /// Verbose test output; `--verbose=false` turns it off
    #[arg(
        short,
        long,
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    verbose: Option<bool>,
    /// Enable the race detector (forces cgo on)
    #[arg(long)]
    race: bool,
    /// Coverage mode: set, count or atomic
    #[arg(long)]
    covermode: Option<CoverMode>,
    /// Coverage profile output file
    #[arg(long)]
    coverprofile: Option<String>,
}

impl TestArgs {
    fn to_options(&self) -> Vec<TestOption> {
        let mut opts: Vec<TestOption> = self
            .common
            .to_options()
            .into_iter()
            .map(TestOption::from)
            .collect();

        if let Some(v) = self.verbose {
            opts.push(verbose(v));
        }
        if self.race {
            opts.push(enable_race_detector());
        }
        if let Some(mode) = self.covermode {
            opts.push(mode.into());
        }
        if let Some(v) = &self.coverprofile {
            opts.push(cover_profile(v.as_str()));
        }

        opts
    }
}

/// Flags of the `lint` command
#[derive(clap::Args, Debug, Default)]
struct LintArgs {
    #[command(flatten)]
    common: CommonArgs,
    /// Repository of the image golangci-lint is taken from
    #[arg(long)]
    source_image_repository: Option<String>,
    /// Tag of the golangci-lint image
    #[arg(long, visible_alias = "linter-version")]
    source_image_tag: Option<String>,
    /// Full golangci-lint image reference
    #[arg(long)]
    source_image: Option<String>,
}

impl LintArgs {
    fn to_options(&self) -> Vec<LintOption> {
        let mut opts: Vec<LintOption> = self
            .common
            .to_options()
            .into_iter()
            .map(LintOption::from)
            .collect();

        if let Some(v) = &self.source_image_repository {
            opts.push(source_image_repository(v.as_str()));
        }
        if let Some(v) = &self.source_image_tag {
            opts.push(source_image_tag(v.as_str()));
        }
        if let Some(v) = &self.source_image {
            opts.push(source_image(v.as_str()));
        }

        opts
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    Text,
    Json,
    Yaml,
}

impl From<FormatArg> for render::OutputFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Text => Self::Text,
            FormatArg::Json => Self::Json,
            FormatArg::Yaml => Self::Yaml,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum ShellArg {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Build the CLI command for completion generation
pub fn build_cli() -> clap::Command {
    Args::command()
}

/// Parse and execute CLI arguments
pub fn run() -> Result<()> {
    execute(Args::parse())
}

/// Loaded configuration plus everything needed to print a plan
struct Session {
    config: Config,
    client: Box<dyn Client>,
    format: render::OutputFormat,
}

impl Session {
    fn open(args: &Args) -> Result<Self> {
        let config = load_config(args.config.as_deref())?;
        init_logging(args.log_level.as_deref().unwrap_or(&config.log_level));

        let client: Box<dyn Client> = if config.ci_env && !args.no_ci_env {
            Box::new(CiDetectorClient::new(BaseClient))
        } else {
            Box::new(BaseClient)
        };

        Ok(Self {
            config,
            client,
            format: args.format.into(),
        })
    }

    fn print(&self, container: &Container) -> Result<()> {
        println!("{}", render::render(container, self.format)?);
        Ok(())
    }
}

fn execute(args: Args) -> Result<()> {
    match &args.command {
        Command::Completions { shell, output } => write_completions(*shell, output.as_deref()),
        Command::Base { common } => {
            let session = Session::open(&args)?;
            let mut opts = session.config.golang.base_options();
            opts.extend(common.to_options());
            session.print(&golang::base(&session.client, opts))
        }
        Command::Test(test_args) => {
            let session = Session::open(&args)?;
            let mut opts = session.config.golang.test_options();
            opts.extend(test_args.to_options());
            session.print(&golang::test(&session.client, opts))
        }
        Command::Lint(lint_args) => {
            let session = Session::open(&args)?;
            let mut opts = session.config.golang.lint_options();
            opts.extend(lint_args.to_options());
            session.print(&golang::lint(&session.client, opts))
        }
    }
}

fn write_completions(shell: ShellArg, output: Option<&Path>) -> Result<()> {
    use clap_complete::Shell;

    let shell = match shell {
        ShellArg::Bash => Shell::Bash,
        ShellArg::Zsh => Shell::Zsh,
        ShellArg::Fish => Shell::Fish,
        ShellArg::PowerShell => Shell::PowerShell,
    };

    let completions = completions::generate_completions(shell)?;

    if let Some(output_path) = output {
        completions::save_completions(&completions, output_path)?;
    } else {
        println!("{completions}");
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load configuration: {}", path.display())),
        None => Config::discover(Path::new("."))
            .context("Failed to load configuration from the current directory"),
    }
}
