use crate::client::HookClient;
use crate::error::CliError;
use anchor_client::solana_sdk::pubkey::Pubkey;
use serde::Serialize;
use spl_token_2022::extension::{
    transfer_hook::TransferHook, BaseStateWithExtensions, StateWithExtensions,
};
use spl_token_2022::state::Mint;
use std::fs;
use tracing::{info, warn};
use whitelist_hook::authorizer::{
    Decision, SenderAllowList, TransferAuthorizer, TransferInvocation,
};
use whitelist_hook::pda::{find_extra_account_metas_address, find_white_list_address};
use whitelist_hook::registry::RecordedAccounts;
use whitelist_hook::state::WhiteList;

#[derive(Debug, Serialize, PartialEq)]
pub struct WhiteListReport {
    pub address: String,
    pub admin: String,
    pub enforcement: bool,
    pub capacity: u16,
    pub entries: Vec<String>,
}

impl WhiteListReport {
    pub fn new(address: &Pubkey, white_list: &WhiteList) -> Self {
        Self {
            address: address.to_string(),
            admin: white_list.admin.to_string(),
            enforcement: white_list.is_on,
            capacity: white_list.capacity,
            entries: white_list.entries.iter().map(Pubkey::to_string).collect(),
        }
    }
}

pub fn handle_addresses(program_id: &Pubkey, mint: Option<Pubkey>) {
    let (white_list, bump) = find_white_list_address(program_id);
    println!("White list:          {} (bump {})", white_list, bump);

    if let Some(mint) = mint {
        let (meta_list, bump) = find_extra_account_metas_address(&mint, program_id);
        println!("Extra account metas: {} (bump {})", meta_list, bump);
    }
}

pub fn handle_init_white_list(
    client: &HookClient,
    capacity: u16,
    admin: Option<Pubkey>,
) -> Result<(), CliError> {
    let admin = admin.unwrap_or_else(|| client.payer());
    info!(capacity, %admin, "initializing white list");

    let signature = client.initialize_white_list(capacity, admin)?;
    println!("White list: {}", client.white_list_address());
    println!("Your transaction signature {}", signature);
    Ok(())
}

pub fn handle_init_registry(
    client: &HookClient,
    mint: Pubkey,
    extra_account_count: u8,
) -> Result<(), CliError> {
    info!(%mint, extra_account_count, "initializing extra account meta list");

    let signature = client.initialize_extra_account_meta_list(mint, extra_account_count)?;
    println!("Extra account metas: {}", client.extra_account_metas_address(&mint));
    println!("Your transaction signature {}", signature);
    Ok(())
}

pub fn handle_add(client: &HookClient, identity: Pubkey) -> Result<(), CliError> {
    let signature = client.add_to_white_list(identity)?;
    println!("Added {} to the white list", identity);
    println!("Your transaction signature {}", signature);
    Ok(())
}

pub fn handle_remove(client: &HookClient, identity: Pubkey) -> Result<(), CliError> {
    let signature = client.remove_from_white_list(identity)?;
    println!("Removed {} from the white list", identity);
    println!("Your transaction signature {}", signature);
    Ok(())
}

pub fn handle_set_admin(client: &HookClient, new_admin: Pubkey) -> Result<(), CliError> {
    let signature = client.set_admin(new_admin)?;
    println!("Admin handed over to {}", new_admin);
    println!("Your transaction signature {}", signature);
    Ok(())
}

pub fn handle_enforcement(client: &HookClient, enabled: bool) -> Result<(), CliError> {
    let signature = client.set_enforcement(enabled)?;
    println!(
        "White list enforcement {}",
        if enabled { "enabled" } else { "disabled" }
    );
    println!("Your transaction signature {}", signature);
    Ok(())
}

pub fn handle_status(client: &HookClient, export: Option<String>) -> Result<(), CliError> {
    let white_list = client.fetch_white_list()?;
    let report = WhiteListReport::new(&client.white_list_address(), &white_list);

    println!("White list:  {}", report.address);
    println!("Admin:       {}", report.admin);
    println!("Enforcement: {}", if report.enforcement { "on" } else { "off" });
    println!("Entries:     {}/{}", report.entries.len(), report.capacity);
    for entry in &report.entries {
        println!("  {}", entry);
    }

    if let Some(path) = export {
        fs::write(&path, serde_json::to_string_pretty(&report)?)?;
        println!("Exported status to {}", path);
    }
    Ok(())
}

/// Runs the on-chain policy locally against the current white list and the
/// accounts recorded for the mint.
pub fn simulate_transfer(
    program_id: &Pubkey,
    recorded: &RecordedAccounts,
    white_list: &WhiteList,
    source: Pubkey,
) -> Result<Decision, CliError> {
    let white_list_key = find_white_list_address(program_id).0;
    let extra_accounts = [white_list_key];
    let invocation = TransferInvocation {
        source,
        mint: recorded.mint,
        destination: Pubkey::default(),
        authority: Pubkey::default(),
        amount: 0,
        extra_accounts: &extra_accounts,
    };

    SenderAllowList::new(*program_id, recorded, white_list_key, white_list)
        .authorize(&invocation)
        .map_err(|e| CliError::InvalidArg(e.to_string()))
}

pub fn handle_check_transfer(
    client: &HookClient,
    program_id: &Pubkey,
    mint: Pubkey,
    source: Pubkey,
) -> Result<(), CliError> {
    let recorded = match client.fetch_recorded_accounts(&mint) {
        Ok(recorded) => recorded,
        Err(CliError::AccountNotFound(address)) => {
            warn!(
                %mint,
                %address,
                "extra account meta list missing, Token-2022 transfers will fail"
            );
            return Err(CliError::AccountNotFound(address));
        }
        Err(e) => return Err(e),
    };

    let white_list = client.fetch_white_list()?;
    match simulate_transfer(program_id, &recorded, &white_list, source)? {
        Decision::Approved => println!("Transfer from {} would be approved", source),
        Decision::Rejected(reason) => {
            println!("Transfer from {} would be rejected: {:?}", source, reason)
        }
    }
    Ok(())
}

/// Returns the hook program configured on a Token-2022 mint, if any.
pub fn hook_program_id(mint_data: &[u8]) -> Result<Option<Pubkey>, CliError> {
    let mint = StateWithExtensions::<Mint>::unpack(mint_data)
        .map_err(|e| CliError::SerializationError(e.to_string()))?;
    let Ok(extension) = mint.get_extension::<TransferHook>() else {
        return Ok(None);
    };
    Ok(Option::<Pubkey>::from(extension.program_id))
}

pub fn handle_verify_mint(
    client: &HookClient,
    program_id: &Pubkey,
    mint: Pubkey,
) -> Result<(), CliError> {
    let account = client.fetch_account(&mint)?;
    if account.owner != spl_token_2022::ID {
        return Err(CliError::MintMismatch(
            mint,
            format!("owned by {}, not Token-2022", account.owner),
        ));
    }

    match hook_program_id(&account.data)? {
        Some(hook) if hook == *program_id => {
            println!("Mint {} routes transfers through {}", mint, hook);
            Ok(())
        }
        Some(hook) => Err(CliError::MintMismatch(
            mint,
            format!("transfer hook points at {}", hook),
        )),
        None => Err(CliError::MintMismatch(
            mint,
            "no transfer hook extension".to_string(),
        )),
    }
}
