use payportz_config::{load_config_or_default, CliArgs};
use payportz_node::{init_tracing, run_node};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = CliArgs::parse();
    let config = load_config_or_default(&args.config_path)?;

    if let Err(e) = run_node(config).await {
        tracing::error!(error = %e, "node service error");
        std::process::exit(1);
    }
    Ok(())
}
