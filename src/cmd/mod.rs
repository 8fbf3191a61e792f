//! Subcommand dispatch and execution.
//!
//! The [`dispatch`] function routes the parsed CLI to [`run`] or
//! [`health`]. Each handler lives in its own submodule.

pub mod health;
pub mod run;

use crate::cli::{Cli, Commands};
use crate::error::ServiceError;

pub async fn dispatch(cli: Cli) -> Result<(), ServiceError> {
    match cli.command {
        Some(Commands::Run(args)) => run::execute(*args).await,
        Some(Commands::Health(args)) => health::execute(args).await,
        None => {
            print_welcome();
            Ok(())
        }
    }
}

fn print_welcome() {
    let version = env!("CARGO_PKG_VERSION");
    println!(
        "\n  general-settings v{version}\n\n  \
         No command provided. To get started:\n\n    \
         general-settings run --mongodb-url <url>        Serve settings from MongoDB\n    \
         general-settings run --settings-file <file>     Serve settings from a JSON file\n    \
         general-settings health                         Check a running instance\n    \
         general-settings --help                         See all commands and options\n"
    );
}
