use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use git_bump::cli::{compose_message, App};
use git_bump::config::{self, Config};
use git_bump::history::HistoryResolver;
use git_bump::ui;

#[derive(Parser)]
#[command(
    name = "git-bump",
    version,
    about = "Compute and tag the next semantic version from templated commit messages"
)]
struct Args {
    #[arg(short, long, global = true, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Pre-release label, e.g. alpha")]
    pre: Option<String>,

    #[arg(short, long, global = true, help = "Log debug output to stderr")]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args)]
struct RepoArg {
    #[arg(default_value = ".", help = "Path inside the git repository")]
    repo: PathBuf,
}

#[derive(Subcommand)]
enum Command {
    /// Print the next version
    Next(RepoArg),
    /// Print the latest tag
    Latest(RepoArg),
    /// Print the change type of the unreleased commits
    Change(RepoArg),
    /// Print the unreleased commit messages
    Commits {
        #[command(flatten)]
        repo: RepoArg,
        #[arg(long, help = "List first lines under a count instead of full messages")]
        summary: bool,
    },
    /// Check every unreleased commit matches the commit template
    Verify(RepoArg),
    /// Render the changelog of the unreleased commits
    Changelog(RepoArg),
    /// Tag HEAD with the next version
    Tag(RepoArg),
    /// Compose a commit message interactively
    Commit {
        #[arg(long, help = "Write the message to this file instead of stdout")]
        msg_file: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ui::display_error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("git_bump=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(args: Args) -> Result<()> {
    let config_path = args.config.as_deref();

    match args.command {
        Command::Latest(RepoArg { repo }) => {
            let mut app = open_app(&repo, None, None)?;
            let tag = app.latest()?;
            report_warnings(&mut app);
            println!("{}", tag);
        }
        Command::Commits {
            repo: RepoArg { repo },
            summary,
        } => {
            let app = open_app(&repo, None, None)?;
            let (latest, messages) = app.commits()?;
            if summary {
                ui::display_commits(&messages, &latest.name);
            } else {
                for message in messages {
                    println!("{}", message);
                }
            }
        }
        Command::Next(RepoArg { repo }) => {
            let mut app = open_app(&repo, Some(load(config_path)?), args.pre)?;
            let next = app.next()?;
            report_warnings(&mut app);
            println!("{}", next);
        }
        Command::Change(RepoArg { repo }) => {
            let mut app = open_app(&repo, Some(load(config_path)?), None)?;
            let change = app.change()?;
            report_warnings(&mut app);
            println!("{}", change);
        }
        Command::Verify(RepoArg { repo }) => {
            let app = open_app(&repo, Some(load(config_path)?), None)?;
            app.verify()?;
        }
        Command::Changelog(RepoArg { repo }) => {
            let mut app = open_app(&repo, Some(load(config_path)?), None)?;
            let changelog = app.changelog()?;
            report_warnings(&mut app);
            println!("{}", changelog);
        }
        Command::Tag(RepoArg { repo }) => {
            let mut app = open_app(&repo, Some(load(config_path)?), args.pre)?;
            let created = app.tag()?;
            report_warnings(&mut app);
            match created {
                Some(tag) => ui::display_success(&format!("Created tag {}", tag)),
                None => ui::display_status("Version unchanged, no tag created"),
            }
        }
        Command::Commit { msg_file } => {
            let config = load(config_path)?;
            let message = compose_message(&config)?;
            match msg_file {
                Some(path) => fs::write(&path, format!("{}\n", message))
                    .with_context(|| format!("cannot write {}", path.display()))?,
                None => println!("{}", message),
            }
        }
    }

    Ok(())
}

fn load(path: Option<&Path>) -> Result<Config> {
    config::load_config(path).context("failed to load configuration")
}

fn open_app(
    repo: &Path,
    config: Option<Config>,
    pre_release: Option<String>,
) -> Result<App<git_bump::git::Git2Repository>> {
    let history = HistoryResolver::open(repo)
        .with_context(|| format!("cannot open git repository at {}", repo.display()))?;
    Ok(App::new(history, config, pre_release))
}

fn report_warnings<R: git_bump::git::Repository>(app: &mut App<R>) {
    for warning in app.take_warnings() {
        ui::display_boundary_warning(&warning);
    }
}
