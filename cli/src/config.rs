use crate::error::CliError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "whitelist-hook.toml";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct HookConfig {
    pub rpc_url: String,
    pub keypair_path: String,
    pub program_id: String,
    pub default_capacity: u16,
    pub extra_account_count: u8,
}

impl Default for HookConfig {
    fn default() -> Self {
        Self {
            rpc_url: "http://127.0.0.1:8899".to_string(),
            keypair_path: "~/.config/solana/id.json".to_string(),
            program_id: whitelist_hook::ID.to_string(),
            default_capacity: 10,
            extra_account_count: 10,
        }
    }
}

/// Missing file means defaults; a present but malformed file is an error.
pub fn load_config(path: &str) -> Result<HookConfig, CliError> {
    if !Path::new(path).exists() {
        return Ok(HookConfig::default());
    }

    let contents =
        fs::read_to_string(path).map_err(|e| CliError::ConfigNotFound(e.to_string()))?;

    let config: HookConfig =
        toml::from_str(&contents).map_err(|e| CliError::InvalidConfig(e.to_string()))?;

    Ok(config)
}

/// Expands a leading `~/` to the user's home directory.
pub fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs_next::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}
