use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::commands::{EscrowCommands, ProposalCommands, WalletCommands};

#[derive(Parser, Debug)]
#[command(name = "payportz", author, version, about = "Operate PayPortz multisig proposals, escrows and wallets", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global_opts: GlobalOpts,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug)]
pub struct GlobalOpts {
    /// Config file (a missing file means defaults)
    #[arg(long, global = true, env = "PAYPORTZ_CONFIG_PATH", default_value = "payportz.toml")]
    pub config: PathBuf,

    /// Override the storage data directory
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Print raw JSON instead of a summary
    #[arg(long, global = true)]
    pub json: bool,

    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Multisig payment proposals
    #[command(subcommand)]
    Proposal(ProposalCommands),

    /// Demo escrows
    #[command(subcommand)]
    Escrow(EscrowCommands),

    /// Bread wallets
    #[command(subcommand)]
    Wallet(WalletCommands),
}
