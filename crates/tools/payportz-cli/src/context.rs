use payportz_config::{load_config_or_default, PayportzConfig};
use payportz_node::Services;
use serde::Serialize;

use crate::cli::GlobalOpts;
use crate::error::{CliError, CliResult};

/// Configuration and wired services shared by every command.
pub struct CliContext {
    pub config: PayportzConfig,
    pub services: Services,
    pub json: bool,
    pub verbose: bool,
}

impl CliContext {
    pub fn new(opts: &GlobalOpts) -> CliResult<Self> {
        let mut config = load_config_or_default(&opts.config)
            .map_err(|e| CliError::Config(e.to_string()))?;
        if let Some(dir) = &opts.data_dir {
            config.storage.data_dir = dir.clone();
        }
        log::debug!("Using data directory {}", config.storage.data_dir.display());

        let services =
            Services::from_config(&config).map_err(|e| CliError::Config(e.to_string()))?;
        Ok(Self {
            config,
            services,
            json: opts.json,
            verbose: opts.verbose > 0,
        })
    }

    pub fn print_json<T: Serialize + ?Sized>(&self, value: &T) -> CliResult {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }
}
