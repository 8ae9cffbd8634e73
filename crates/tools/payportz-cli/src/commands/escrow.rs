use clap::{Args, Subcommand};
use colored::Colorize;
use payportz_escrow::{Escrow, EscrowAction, EscrowRequest};

use crate::context::CliContext;
use crate::error::CliResult;

/// CLI commands for demo escrows
#[derive(Subcommand, Debug)]
pub enum EscrowCommands {
    /// Create a new escrow in the `created` state
    Create(CreateEscrowArgs),

    /// List escrows in creation order
    List,

    /// Show one escrow
    Show { id: String },

    /// Mark an escrow as funded
    Fund { id: String },

    /// Release an escrow to its recipient
    Release { id: String },
}

#[derive(Args, Debug)]
pub struct CreateEscrowArgs {
    #[arg(long, allow_hyphen_values = true)]
    amount: f64,

    #[arg(long)]
    recipient: String,

    /// Defaults to starknet:usdc
    #[arg(long)]
    currency: Option<String>,

    #[arg(long)]
    creator: Option<String>,
}

pub async fn handle_escrow_command(ctx: &CliContext, cmd: EscrowCommands) -> CliResult {
    let store = &ctx.services.escrows;
    let escrow = match cmd {
        EscrowCommands::Create(args) => {
            let request = EscrowRequest {
                amount: Some(args.amount),
                recipient: Some(args.recipient),
                currency: args.currency,
                creator: args.creator,
            };
            store.create(&request).await?
        }
        EscrowCommands::List => {
            let escrows = store.list().await?;
            if ctx.json {
                return ctx.print_json(&escrows);
            }
            if escrows.is_empty() {
                println!("No escrows found");
            }
            for escrow in &escrows {
                print_escrow(escrow);
            }
            return Ok(());
        }
        EscrowCommands::Show { id } => store.get(&id).await?,
        EscrowCommands::Fund { id } => store.transition(&id, EscrowAction::Fund).await?,
        EscrowCommands::Release { id } => store.transition(&id, EscrowAction::Release).await?,
    };

    if ctx.json {
        return ctx.print_json(&escrow);
    }
    print_escrow(&escrow);
    Ok(())
}

fn print_escrow(escrow: &Escrow) {
    println!(
        "{}  {}  {} {} -> {} (by {})",
        escrow.id.bold(),
        escrow.status.to_string().cyan(),
        escrow.amount,
        escrow.currency,
        escrow.recipient,
        escrow.creator
    );
}
