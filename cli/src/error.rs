use anchor_lang::prelude::Pubkey;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration file not found: {0}")]
    ConfigNotFound(String),

    #[error("Invalid configuration format: {0}")]
    InvalidConfig(String),

    #[error("RPC Error: {0}")]
    RpcError(#[from] solana_client::client_error::ClientError),

    #[error("Anchor Client Error: {0}")]
    AnchorError(#[from] anchor_client::ClientError),

    #[error("Invalid Pubkey format: {0}")]
    InvalidPubkey(String),

    #[error("Invalid argument: {0}")]
    InvalidArg(String),

    #[error("Keypair error: {0}")]
    KeypairError(String),

    #[error("Account not found: {0}")]
    AccountNotFound(Pubkey),

    #[error("Account already initialized: {0}")]
    AlreadyInitialized(Pubkey),

    #[error("Insufficient funds: required {0} lamports, available {1}")]
    InsufficientFunds(u64, u64),

    #[error("Mint {0} is not configured for this transfer hook: {1}")]
    MintMismatch(Pubkey, String),

    #[error("IO Error: {0}")]
    IoError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::SerializationError(e.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::IoError(e.to_string())
    }
}

pub fn parse_pubkey(value: &str) -> Result<Pubkey, CliError> {
    value
        .parse::<Pubkey>()
        .map_err(|_| CliError::InvalidPubkey(value.to_string()))
}
