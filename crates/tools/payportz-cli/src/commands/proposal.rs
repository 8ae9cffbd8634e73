use clap::{Args, Subcommand};
use colored::{ColoredString, Colorize};
use payportz_multisig::{ApprovalResult, Proposal, ProposalRequest, ProposalStatus};
use serde_json::json;

use crate::context::CliContext;
use crate::error::CliResult;

/// CLI commands for multisig payment proposals
#[derive(Subcommand, Debug)]
pub enum ProposalCommands {
    /// Create a new proposal
    Create(CreateProposalArgs),

    /// Approve a proposal as one of its signers
    Approve {
        /// Proposal ID
        id: String,

        /// Signer address or username
        #[arg(long)]
        signer: String,
    },

    /// List all proposals, most recent first
    List,

    /// Show details of a specific proposal
    Show {
        /// Proposal ID
        id: String,
    },
}

#[derive(Args, Debug)]
pub struct CreateProposalArgs {
    /// Comma-separated signer addresses or usernames
    #[arg(long)]
    signers: String,

    /// Approvals required before the transfer executes
    #[arg(long)]
    threshold: usize,

    /// Asset as <chain>:<token>, e.g. base:usdc
    #[arg(long)]
    asset: String,

    /// Amount to transfer (-1 for the entire balance)
    #[arg(long, allow_hyphen_values = true)]
    amount: f64,

    /// Destination address or username
    #[arg(long)]
    recipient: String,

    #[arg(long)]
    creator: Option<String>,
}

pub async fn handle_proposal_command(ctx: &CliContext, cmd: ProposalCommands) -> CliResult {
    let engine = &ctx.services.engine;
    match cmd {
        ProposalCommands::Create(args) => {
            let request = ProposalRequest {
                signers: args.signers,
                threshold: args.threshold,
                chain_currency: args.asset,
                amount: args.amount,
                recipient: args.recipient,
                creator: args.creator,
            };
            let proposal = engine.create_proposal(&request).await?;
            if ctx.json {
                return ctx.print_json(&proposal);
            }
            println!("{} Proposal created", "✓".green());
            print_proposal(&proposal);
        }
        ProposalCommands::Approve { id, signer } => {
            let outcome = engine.approve(&id, &signer).await?;
            if ctx.json {
                return ctx.print_json(&json!({
                    "result": outcome.result,
                    "proposal": outcome.proposal,
                }));
            }
            let proposal = &outcome.proposal;
            match outcome.result {
                ApprovalResult::Recorded => println!(
                    "{} Approval recorded ({}/{})",
                    "✓".green(),
                    proposal.approvals.len(),
                    proposal.threshold
                ),
                ApprovalResult::AlreadyApproved => {
                    println!("{} {} already approved this proposal", "•".yellow(), signer)
                }
                ApprovalResult::Dispatched => match (proposal.tx(), proposal.error()) {
                    (Some(tx), _) => println!("{} Proposal executed, tx {}", "✓".green(), tx.hash),
                    (_, Some(error)) => {
                        println!("{} Proposal execution failed: {}", "✗".red(), error)
                    }
                    _ => println!("Proposal is {}", proposal.status()),
                },
            }
            print_proposal(proposal);
        }
        ProposalCommands::List => {
            let proposals = engine.list().await?;
            if ctx.json {
                return ctx.print_json(&proposals);
            }
            if proposals.is_empty() {
                println!("No proposals found");
            }
            for proposal in &proposals {
                if ctx.verbose {
                    print_proposal(proposal);
                    println!();
                } else {
                    println!(
                        "{}  {}  {} {} -> {}  ({}/{})",
                        proposal.id,
                        status_label(proposal.status()),
                        proposal.amount,
                        proposal.chain_currency,
                        proposal.recipient,
                        proposal.approvals.len(),
                        proposal.threshold
                    );
                }
            }
        }
        ProposalCommands::Show { id } => {
            let proposal = engine.get(&id).await?;
            if ctx.json {
                return ctx.print_json(&proposal);
            }
            print_proposal(&proposal);
        }
    }
    Ok(())
}

fn status_label(status: ProposalStatus) -> ColoredString {
    let label = status.as_str();
    match status {
        ProposalStatus::Pending => label.yellow(),
        ProposalStatus::Executing => label.cyan(),
        ProposalStatus::Executed => label.green(),
        ProposalStatus::Failed => label.red(),
    }
}

fn print_proposal(proposal: &Proposal) {
    println!("{} [{}]", proposal.id.bold(), status_label(proposal.status()));
    println!(
        "  {} {} -> {}",
        proposal.amount, proposal.chain_currency, proposal.recipient
    );
    println!(
        "  Signers: {} (threshold {})",
        proposal.signers.join(", "),
        proposal.threshold
    );
    if !proposal.approvals.is_empty() {
        println!("  Approvals: {}", proposal.approvals.join(", "));
    }
    println!("  Created by {} at {}", proposal.creator, proposal.created_at.to_rfc3339());
    if let Some(tx) = proposal.tx() {
        match &tx.link {
            Some(link) => println!("  Tx: {} ({})", tx.hash, link),
            None => println!("  Tx: {}", tx.hash),
        }
    }
    if let Some(error) = proposal.error() {
        println!("  Error: {}", error.red());
    }
}
