use clap::Parser;
use colored::Colorize;
use payportz_cli::{run, Cli};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let level = match cli.global_opts.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Err(e) = run(cli).await {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}
