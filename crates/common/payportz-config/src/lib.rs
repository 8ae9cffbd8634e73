use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Env var naming the config file.
pub const CONFIG_PATH_ENV: &str = "PAYPORTZ_CONFIG_PATH";
/// Config file used when neither `--config` nor the env var is given.
pub const DEFAULT_CONFIG_PATH: &str = "payportz.toml";
pub const BREAD_API_KEY_ENV: &str = "PAYPORTZ_BREAD_API_KEY";
pub const BREAD_WALLET_ID_ENV: &str = "PAYPORTZ_BREAD_WALLET_ID";

/// Top-level configuration. Every section is optional in the file.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct PayportzConfig {
    pub storage: StorageConfig,
    pub api: ApiConfig,
    pub bread: BreadConfig,
    pub executors: ExecutorsConfig,
    pub escrow: EscrowConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackendKind {
    #[default]
    File,
    Memory,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    pub backend: StorageBackendKind,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            backend: StorageBackendKind::File,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
    pub listen_address: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            listen_address: "127.0.0.1:8080".to_string(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct BreadConfig {
    pub base_url: String,
    pub api_key: String,
    /// Wallet transfers are sent from. Empty means transfers fail.
    pub wallet_id: String,
    pub timeout_secs: u64,
}

impl Default for BreadConfig {
    fn default() -> Self {
        Self {
            base_url: "https://processor-prod.up.railway.app".to_string(),
            api_key: String::new(),
            wallet_id: String::new(),
            timeout_secs: 30,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ExecutorsConfig {
    pub starknet: StarknetExecutorConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExecutorMode {
    #[default]
    Simulated,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct StarknetExecutorConfig {
    pub mode: ExecutorMode,
    pub delay_ms: u64,
    pub tx_hash: String,
}

impl Default for StarknetExecutorConfig {
    fn default() -> Self {
        Self {
            mode: ExecutorMode::Simulated,
            delay_ms: 1000,
            tx_hash: "0xmockstarknettx".to_string(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum EscrowPolicyMode {
    #[default]
    Permissive,
    Strict,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct EscrowConfig {
    pub policy: EscrowPolicyMode,
}

impl PayportzConfig {
    /// Overlay secrets from the environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|name| std::env::var(name).ok());
    }

    fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(key) = lookup(BREAD_API_KEY_ENV).filter(|v| !v.is_empty()) {
            self.bread.api_key = key;
        }
        if let Some(wallet) = lookup(BREAD_WALLET_ID_ENV).filter(|v| !v.is_empty()) {
            self.bread.wallet_id = wallet;
        }
    }
}

/// Node startup arguments, read from the environment.
#[derive(Debug)]
pub struct CliArgs {
    pub config_path: String,
}

impl CliArgs {
    pub fn parse() -> Self {
        let config_path =
            std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self { config_path }
    }
}

/// Read and parse the TOML file at `path`, then apply env overrides.
pub fn load_config(path: impl AsRef<Path>) -> anyhow::Result<PayportzConfig> {
    let path = path.as_ref();
    let config_content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config file from {}: {}", path.display(), e))?;
    let mut config: PayportzConfig = toml::from_str(&config_content)
        .map_err(|e| anyhow::anyhow!("Failed to parse TOML config from {}: {}", path.display(), e))?;
    config.apply_env_overrides();
    Ok(config)
}

/// Like `load_config`, but a missing file yields the defaults.
pub fn load_config_or_default(path: impl AsRef<Path>) -> anyhow::Result<PayportzConfig> {
    let path = path.as_ref();
    if path.exists() {
        return load_config(path);
    }
    log::warn!("Config file {} not found, using defaults", path.display());
    let mut config = PayportzConfig::default();
    config.apply_env_overrides();
    Ok(config)
}
