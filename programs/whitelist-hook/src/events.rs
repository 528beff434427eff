use anchor_lang::prelude::*;

#[event]
pub struct WhiteListInitialized {
    pub white_list: Pubkey,
    pub admin: Pubkey,
    pub capacity: u16,
}

#[event]
pub struct ExtraAccountMetaListInitialized {
    pub mint: Pubkey,
    pub extra_account_meta_list: Pubkey,
    pub extra_account_count: u8,
}

#[event]
pub struct WhiteListed {
    pub white_list: Pubkey,
    pub account: Pubkey,
    pub entries: u16,
}

#[event]
pub struct RemovedFromWhiteList {
    pub white_list: Pubkey,
    pub account: Pubkey,
    pub entries: u16,
}

#[event]
pub struct AdminTransferred {
    pub white_list: Pubkey,
    pub old_admin: Pubkey,
    pub new_admin: Pubkey,
}

#[event]
pub struct EnforcementChanged {
    pub white_list: Pubkey,
    pub enabled: bool,
}

#[event]
pub struct TransferApproved {
    pub mint: Pubkey,
    pub source: Pubkey,
    pub destination: Pubkey,
    pub amount: u64,
}
