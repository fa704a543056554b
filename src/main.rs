use anyhow::Result;
use clap::{Parser, Subcommand};
use is_terminal::IsTerminal;
use minus::Pager;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use twig::areas::repository::Repository;
use twig::artifacts::core::PagerWriter;
use twig::errors::TwigError;

const LOG_FILTER_ENV: &str = "TWIG_LOG";
const NO_PAGER_ENV: &str = "NO_PAGER";

#[derive(Parser)]
#[command(
    name = "twig",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "A small local version-control system",
    long_about = "twig tracks snapshots of a directory in a hidden .twig folder. \
    It supports staging, commits, branches and three-way merges, \
    all on a single machine.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(name = "init", about = "Create a repository in the current directory")]
    Init,
    #[command(
        name = "add",
        about = "Stage files for the next commit",
        long_about = "Stage the current content of the given files. Directories are added recursively."
    )]
    Add {
        #[arg(required = true, help = "Files or directories to stage")]
        paths: Vec<PathBuf>,
    },
    #[command(name = "rm", about = "Stop tracking a file")]
    Rm {
        #[arg(index = 1)]
        path: PathBuf,
    },
    #[command(name = "commit", about = "Record the staged snapshot")]
    Commit {
        #[arg(index = 1, help = "The commit message")]
        message: String,
    },
    #[command(name = "log", about = "Show the history of the current branch")]
    Log,
    #[command(name = "global-log", about = "Show every commit of every branch")]
    GlobalLog,
    #[command(name = "find", about = "Print the ids of commits with the given message")]
    Find {
        #[arg(index = 1)]
        message: String,
    },
    #[command(name = "status", about = "Show branches, staged files and working changes")]
    Status,
    #[command(
        name = "checkout",
        about = "Switch branches or restore a file",
        long_about = "checkout <branch> switches branches.\n\
        checkout -- <file> restores a file from the head commit.\n\
        checkout <commit> -- <file> restores a file from any commit."
    )]
    Checkout {
        #[arg(index = 1, help = "Branch name, or commit id when a file follows")]
        target: Option<String>,
        #[arg(index = 2, last = true, help = "File to restore")]
        file: Option<PathBuf>,
    },
    #[command(name = "branch", about = "Create a branch at the head commit")]
    Branch {
        #[arg(index = 1)]
        name: String,
    },
    #[command(name = "rm-branch", about = "Delete a branch pointer")]
    RmBranch {
        #[arg(index = 1)]
        name: String,
    },
    #[command(name = "reset", about = "Move the current branch to a commit")]
    Reset {
        #[arg(index = 1, help = "Commit id, possibly abbreviated")]
        commit: String,
    },
    #[command(name = "merge", about = "Merge a branch into the current branch")]
    Merge {
        #[arg(index = 1)]
        branch: String,
    },
}

impl Commands {
    fn is_paged(&self) -> bool {
        matches!(self, Commands::Log | Commands::GlobalLog)
    }
}

fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => match error.downcast_ref::<TwigError>() {
            Some(twig_error) if twig_error.is_user_facing() => {
                eprintln!("{twig_error}");
                ExitCode::from(1)
            }
            _ => {
                eprintln!("fatal: {error:#}");
                ExitCode::from(2)
            }
        },
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let stdout_is_terminal = std::io::stdout().is_terminal();
    if !stdout_is_terminal {
        colored::control::set_override(false);
    }

    let pager = (cli.command.is_paged()
        && stdout_is_terminal
        && std::env::var_os(NO_PAGER_ENV).is_none())
    .then(Pager::new);

    let writer: Box<dyn std::io::Write> = match &pager {
        Some(pager) => Box::new(PagerWriter::new(pager.clone())),
        None => Box::new(std::io::stdout()),
    };

    let pwd = std::env::current_dir()?;
    let repository = Repository::new(&pwd, writer)?;

    match cli.command {
        Commands::Init => {
            repository.init()?;
        }
        Commands::Add { paths } => repository.add(&paths)?,
        Commands::Rm { path } => repository.rm(&path)?,
        Commands::Commit { message } => {
            repository.commit(&message)?;
        }
        Commands::Log => repository.log()?,
        Commands::GlobalLog => repository.global_log()?,
        Commands::Find { message } => {
            repository.find(&message)?;
        }
        Commands::Status => {
            repository.status()?;
        }
        Commands::Checkout { target, file } => match (target, file) {
            (Some(commit), Some(file)) => repository.checkout_file(&commit, &file)?,
            (None, Some(file)) => repository.checkout_head_file(&file)?,
            (Some(branch), None) => repository.checkout_branch(&branch)?,
            (None, None) => anyhow::bail!("checkout needs a branch or `-- <file>`"),
        },
        Commands::Branch { name } => repository.branch(&name)?,
        Commands::RmBranch { name } => repository.rm_branch(&name)?,
        Commands::Reset { commit } => repository.reset(&commit)?,
        Commands::Merge { branch } => {
            repository.merge(&branch)?;
        }
    }

    drop(repository);
    if let Some(pager) = pager {
        minus::page_all(pager)?;
    }

    Ok(())
}
