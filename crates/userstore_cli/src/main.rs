//! `userstore` command-line entry point.
//!
//! # Responsibility
//! - Open the process-wide database once and migrate it.
//! - Drive the repository from the command line, printing records as JSON.
//!
//! Startup failures are fatal: the process logs the error and exits non-zero.

use clap::{Parser, Subcommand};
use log::{error, info};
use std::process::ExitCode;
use userstore_core::db::{init_global_db, shutdown_global_db};
use userstore_core::{
    init_logging, RepoError, RepoResult, SqliteUserRepository, StoreConfig, User, UserId,
    UserRepository,
};

#[derive(Debug, Parser)]
#[command(name = "userstore", version, about = "Manage records in the users table")]
struct Cli {
    #[command(flatten)]
    store: StoreConfig,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Open the database and apply pending migrations (default)
    Migrate,
    /// Insert a new user and print it with its assigned ID
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        age: u64,
    },
    /// Print one user by ID
    Get { id: UserId },
    /// Overwrite every field of a user, inserting it when missing
    Update {
        id: UserId,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        age: u64,
    },
    /// Delete a user by ID; deleting a missing ID succeeds
    Delete { id: UserId },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = init_logging(&cli.store.log_level, cli.store.log_dir.as_deref()) {
        eprintln!("userstore: failed to initialize logging: {err}");
        return ExitCode::FAILURE;
    }

    let handle = match cli
        .store
        .db_target()
        .and_then(|target| init_global_db(&target))
    {
        Ok(handle) => handle,
        Err(err) => {
            error!("event=startup module=cli status=error error={err}");
            eprintln!("userstore: failed to open database: {err}");
            return ExitCode::FAILURE;
        }
    };
    info!(
        "event=startup module=cli status=ok database_url={}",
        cli.store.database_url
    );

    let command = cli.command.unwrap_or(Command::Migrate);
    let outcome = handle.with_conn(|conn| run(&SqliteUserRepository::new(conn), command));

    if let Err(err) = shutdown_global_db() {
        error!("event=shutdown module=cli status=error error={err}");
    }

    match outcome {
        Ok(Some(output)) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Ok(None) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("userstore: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(repo: &dyn UserRepository, command: Command) -> RepoResult<Option<String>> {
    match command {
        Command::Migrate => Ok(None),
        Command::Create { name, email, age } => {
            let mut user = User::new(name, email, age);
            repo.create_user(&mut user)?;
            render(&user).map(Some)
        }
        Command::Get { id } => render(&repo.get_user(id)?).map(Some),
        Command::Update {
            id,
            name,
            email,
            age,
        } => {
            let mut user = User::with_id(id, name, email, age);
            repo.update_user(&mut user)?;
            render(&user).map(Some)
        }
        Command::Delete { id } => {
            repo.delete_user(id)?;
            Ok(None)
        }
    }
}

fn render(user: &User) -> RepoResult<String> {
    serde_json::to_string(user).map_err(|err| RepoError::InvalidData(err.to_string()))
}
