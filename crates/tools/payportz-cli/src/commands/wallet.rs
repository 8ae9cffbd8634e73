use clap::{Args, Subcommand};
use colored::Colorize;
use payportz_bread::{AutomationSettings, Quote, RampDirection, SwapRequest, DEFAULT_FIAT_CURRENCY};

use crate::context::CliContext;
use crate::error::{CliError, CliResult};

/// CLI commands for Bread wallets
#[derive(Subcommand, Debug)]
pub enum WalletCommands {
    /// Create a wallet
    Create {
        /// Client reference; generated when omitted
        #[arg(long)]
        reference: Option<String>,
    },

    /// List wallets, one page at a time
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
    },

    /// Show a wallet
    Show {
        /// Wallet ID (defaults to the configured transfer wallet)
        wallet_id: Option<String>,
    },

    /// Show the balance of one asset
    Balance {
        /// Wallet ID (defaults to the configured transfer wallet)
        wallet_id: Option<String>,

        /// Asset as <chain>:<token>
        #[arg(long)]
        asset: String,
    },

    /// Show the balances of every asset in a wallet
    Balances {
        /// Wallet ID (defaults to the configured transfer wallet)
        wallet_id: Option<String>,
    },

    /// Quote a deposit (onramp) or withdrawal (offramp)
    Quote {
        /// onramp or offramp
        direction: RampDirection,

        #[arg(long)]
        amount: f64,

        /// Asset as <chain>:<token>
        #[arg(long)]
        asset: String,

        #[arg(long, default_value = DEFAULT_FIAT_CURRENCY)]
        currency: String,

        /// Treat --amount as the amount to receive
        #[arg(long)]
        exact_output: bool,
    },

    /// Show the current onramp or offramp rate
    Rate {
        /// onramp or offramp
        direction: RampDirection,

        #[arg(long, default_value = DEFAULT_FIAT_CURRENCY)]
        currency: String,
    },

    /// Convert one asset into another
    Swap(SwapArgs),

    /// Withdraw to a bank account through an offramp
    Withdraw {
        /// Wallet ID (defaults to the configured transfer wallet)
        wallet_id: Option<String>,

        #[arg(long)]
        amount: f64,

        /// Asset as <chain>:<token>
        #[arg(long)]
        asset: String,

        /// Beneficiary (registered bank account) ID
        #[arg(long)]
        beneficiary: String,
    },

    /// Check the progress of withdrawals
    WithdrawalStatus {
        /// Wallet ID (defaults to the configured transfer wallet)
        wallet_id: Option<String>,

        /// Offramp reference returned by `withdraw`
        #[arg(long)]
        reference: Option<String>,
    },

    /// List banks accepting withdrawals
    Banks {
        #[arg(long, default_value = DEFAULT_FIAT_CURRENCY)]
        currency: String,
    },

    /// Resolve the holder of a bank account
    Lookup {
        #[arg(long)]
        bank_code: String,

        #[arg(long)]
        account_number: String,

        #[arg(long, default_value = DEFAULT_FIAT_CURRENCY)]
        currency: String,
    },

    /// Choose what happens automatically to incoming deposits
    Automate {
        /// Wallet ID (defaults to the configured transfer wallet)
        wallet_id: Option<String>,

        #[arg(long)]
        transfer: bool,

        #[arg(long)]
        swap: bool,

        #[arg(long)]
        offramp: bool,

        /// Beneficiary used for automatic offramps
        #[arg(long)]
        beneficiary: Option<String>,
    },
}

#[derive(Args, Debug)]
pub struct SwapArgs {
    /// Wallet ID (defaults to the configured transfer wallet)
    wallet_id: Option<String>,

    /// Asset to sell, as <chain>:<token>
    #[arg(long)]
    from: String,

    /// Asset to buy, as <chain>:<token>
    #[arg(long)]
    to: String,

    /// Exact amount to sell
    #[arg(long, conflicts_with = "to_amount", required_unless_present = "to_amount")]
    from_amount: Option<f64>,

    /// Exact amount to buy
    #[arg(long)]
    to_amount: Option<f64>,

    /// Address receiving the bought asset
    #[arg(long)]
    receiver: String,
}

pub async fn handle_wallet_command(ctx: &CliContext, cmd: WalletCommands) -> CliResult {
    let bread = &ctx.services.bread;
    match cmd {
        WalletCommands::Create { reference } => {
            let wallet = bread.create_wallet(reference.as_deref()).await?;
            if ctx.json {
                return ctx.print_json(&wallet);
            }
            println!("{} Wallet {} created", "✓".green(), wallet.id.bold());
            println!("  EVM address: {}", wallet.address.evm);
            println!("  SVM address: {}", wallet.address.svm);
        }
        WalletCommands::List { page } => {
            let listing = bread.get_wallets(page).await?;
            if ctx.json {
                return ctx.print_json(&listing);
            }
            if listing.wallets.is_empty() {
                println!("No wallets found");
            }
            for wallet in &listing.wallets {
                let state = if wallet.is_active { "active".green() } else { "inactive".red() };
                println!("{}  {}  {}", wallet.id, wallet.reference, state);
            }
            println!("Page {} ({} wallets total)", listing.page, listing.total);
        }
        WalletCommands::Show { wallet_id } => {
            let wallet = bread.get_wallet(&wallet_or_default(ctx, wallet_id)?).await?;
            if ctx.json {
                return ctx.print_json(&wallet);
            }
            println!("{} ({})", wallet.id.bold(), wallet.reference);
            println!("  Active: {}", wallet.is_active);
            println!("  EVM address: {}", wallet.address.evm);
            println!("  SVM address: {}", wallet.address.svm);
        }
        WalletCommands::Balance { wallet_id, asset } => {
            let wallet_id = wallet_or_default(ctx, wallet_id)?;
            let balance = bread.get_balance(&wallet_id, &asset).await?;
            if ctx.json {
                return ctx.print_json(&balance);
            }
            println!(
                "{} on {}: {} (available {})",
                asset, wallet_id, balance.balance, balance.available
            );
        }
        WalletCommands::Balances { wallet_id } => {
            let wallet_id = wallet_or_default(ctx, wallet_id)?;
            let balances = bread.get_balances(&wallet_id).await?;
            if ctx.json {
                return ctx.print_json(&balances);
            }
            if balances.is_empty() {
                println!("No balances for {}", wallet_id);
            }
            for balance in &balances {
                println!(
                    "{:<16} {} (available {}, debt {})",
                    balance.code, balance.balance, balance.available, balance.debt
                );
            }
        }
        WalletCommands::Quote {
            direction,
            amount,
            asset,
            currency,
            exact_output,
        } => {
            let quote = bread
                .get_quote(direction, amount, &currency, &asset, exact_output)
                .await?;
            if ctx.json {
                return ctx.print_json(&quote);
            }
            print_quote(&quote, &asset);
        }
        WalletCommands::Rate { direction, currency } => {
            let rate = bread.get_rate(direction, &currency).await?;
            if ctx.json {
                return ctx.print_json(&rate);
            }
            println!("{} rate ({}): {}", direction, currency, rate.rate);
        }
        WalletCommands::Swap(args) => {
            let wallet_id = wallet_or_default(ctx, args.wallet_id)?;
            let request = SwapRequest {
                from_asset: args.from,
                to_asset: args.to,
                from_amount: args.from_amount,
                to_amount: args.to_amount,
            };
            let result = bread.swap(&wallet_id, &args.receiver, &request).await?;
            if ctx.json {
                return ctx.print_json(&result);
            }
            println!(
                "{} Swapped {} -> {}, tx {}",
                "✓".green(),
                request.from_asset,
                request.to_asset,
                result.hash
            );
            if let Some(link) = &result.link {
                println!("  {}", link);
            }
        }
        WalletCommands::Withdraw {
            wallet_id,
            amount,
            asset,
            beneficiary,
        } => {
            let wallet_id = wallet_or_default(ctx, wallet_id)?;
            let receipt = bread
                .execute_offramp(&wallet_id, amount, &beneficiary, &asset)
                .await?;
            if ctx.json {
                return ctx.print_json(&receipt);
            }
            println!(
                "{} Withdrawal of {} {} submitted, reference {}",
                "✓".green(),
                amount,
                asset,
                receipt.reference.bold()
            );
        }
        WalletCommands::WithdrawalStatus { wallet_id, reference } => {
            let wallet_id = wallet_or_default(ctx, wallet_id)?;
            let status = bread
                .get_offramp_status(&wallet_id, reference.as_deref())
                .await?;
            if ctx.json {
                return ctx.print_json(&status);
            }
            println!(
                "{}: {}",
                status.reference.as_deref().unwrap_or(&wallet_id),
                status.status.as_deref().unwrap_or("unknown")
            );
        }
        WalletCommands::Banks { currency } => {
            let banks = bread.get_banks(&currency).await?;
            if ctx.json {
                return ctx.print_json(&banks);
            }
            for bank in &banks {
                println!("{:<8} {}", bank.code, bank.name);
            }
        }
        WalletCommands::Lookup {
            bank_code,
            account_number,
            currency,
        } => {
            let account = bread
                .lookup_account(&bank_code, &account_number, &currency)
                .await?;
            if ctx.json {
                return ctx.print_json(&account);
            }
            println!(
                "{} ({} {})",
                account.account_name.bold(),
                account.bank_name,
                account.account_number
            );
        }
        WalletCommands::Automate {
            wallet_id,
            transfer,
            swap,
            offramp,
            beneficiary,
        } => {
            let wallet_id = wallet_or_default(ctx, wallet_id)?;
            let settings = AutomationSettings {
                transfer,
                swap,
                offramp,
                beneficiary_id: beneficiary,
            };
            let applied = bread.set_automation(&wallet_id, &settings).await?;
            if ctx.json {
                return ctx.print_json(&applied);
            }
            println!(
                "{} Automation for {}: transfer={} swap={} offramp={}",
                "✓".green(),
                wallet_id,
                applied.transfer,
                applied.swap,
                applied.offramp
            );
        }
    }
    Ok(())
}

fn print_quote(quote: &Quote, asset: &str) {
    println!(
        "{} {}: {} -> {} (rate {}, fee {})",
        quote.direction, asset, quote.input_amount, quote.output_amount, quote.rate, quote.fee
    );
    if !quote.expiry.is_empty() {
        println!("  Expires {}", quote.expiry);
    }
}

fn wallet_or_default(ctx: &CliContext, wallet_id: Option<String>) -> CliResult<String> {
    wallet_id
        .or_else(|| Some(ctx.config.bread.wallet_id.clone()))
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| {
            CliError::Config("no wallet given and bread.wallet_id is not configured".to_string())
        })
}
