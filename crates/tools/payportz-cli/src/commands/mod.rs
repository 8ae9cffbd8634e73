pub mod escrow;
pub mod proposal;
pub mod wallet;

pub use escrow::{handle_escrow_command, EscrowCommands};
pub use proposal::{handle_proposal_command, ProposalCommands};
pub use wallet::{handle_wallet_command, WalletCommands};
