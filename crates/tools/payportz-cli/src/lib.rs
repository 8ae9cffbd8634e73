//! payportz operator CLI.

pub mod cli;
pub mod commands;
pub mod context;
pub mod error;

pub use cli::{Cli, Commands, GlobalOpts};
pub use context::CliContext;
pub use error::{CliError, CliResult};

/// Main library entry point.
pub async fn run(cli: Cli) -> CliResult<()> {
    let ctx = CliContext::new(&cli.global_opts)?;

    match cli.command {
        Commands::Proposal(cmd) => commands::handle_proposal_command(&ctx, cmd).await?,
        Commands::Escrow(cmd) => commands::handle_escrow_command(&ctx, cmd).await?,
        Commands::Wallet(cmd) => commands::handle_wallet_command(&ctx, cmd).await?,
    }

    Ok(())
}
