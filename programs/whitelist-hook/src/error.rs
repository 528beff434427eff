use anchor_lang::prelude::*;

#[error_code]
pub enum WhitelistHookError {
    #[msg("Account is already initialized")]
    AlreadyInitialized,
    #[msg("Invalid capacity - must be between 1 and 300")]
    InvalidCapacity,
    #[msg("Invalid extra account count")]
    InvalidAccountCount,
    #[msg("Not authorized for this action")]
    Unauthorized,
    #[msg("White list is full")]
    CapacityExceeded,
    #[msg("Supplied accounts do not match the extra account meta list")]
    AccountSetMismatch,
    #[msg("Source account is not on the white list")]
    NotWhitelisted,
    #[msg("Payer cannot cover the rent for this account")]
    InsufficientFunds,
    #[msg("The token is not currently transferring")]
    IsNotCurrentlyTransferring,
}
