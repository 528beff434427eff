use crate::error::CliError;
use anchor_client::{
    solana_sdk::{
        account::Account,
        commitment_config::CommitmentConfig,
        pubkey::Pubkey,
        signature::{Keypair, Signature},
    },
    Client, Cluster, Program,
};
use std::rc::Rc;
use tracing::{debug, info};
use anchor_lang::system_program;
use whitelist_hook::pda::{find_extra_account_metas_address, find_white_list_address};
use whitelist_hook::registry::RecordedAccounts;
use whitelist_hook::state::WhiteList;

/// Blocking client for the whitelist hook program.
pub struct HookClient {
    program: Program<Rc<Keypair>>,
    program_id: Pubkey,
}

impl HookClient {
    pub fn connect(rpc_url: &str, payer: Keypair, program_id: Pubkey) -> Result<Self, CliError> {
        let client = Client::new_with_options(
            Cluster::Custom(rpc_url.to_string(), rpc_url.to_string()),
            Rc::new(payer),
            CommitmentConfig::confirmed(),
        );
        let program = client.program(program_id)?;

        info!("Connected to Solana RPC: {}", rpc_url);
        info!("Program ID: {}", program_id);

        Ok(Self {
            program,
            program_id,
        })
    }

    pub fn payer(&self) -> Pubkey {
        self.program.payer()
    }

    pub fn white_list_address(&self) -> Pubkey {
        find_white_list_address(&self.program_id).0
    }

    pub fn extra_account_metas_address(&self, mint: &Pubkey) -> Pubkey {
        find_extra_account_metas_address(mint, &self.program_id).0
    }

    pub fn fetch_account(&self, address: &Pubkey) -> Result<Account, CliError> {
        self.program
            .rpc()
            .get_account_with_commitment(address, CommitmentConfig::confirmed())?
            .value
            .ok_or(CliError::AccountNotFound(*address))
    }

    /// Fetches `address` if it exists at all, pre-funded or not.
    pub fn fetch_optional_account(&self, address: &Pubkey) -> Result<Option<Account>, CliError> {
        match self.fetch_account(address) {
            Ok(account) => Ok(Some(account)),
            Err(CliError::AccountNotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub fn account_exists(&self, address: &Pubkey) -> Result<bool, CliError> {
        Ok(self
            .fetch_optional_account(address)?
            .is_some_and(|account| !is_vacant(&account)))
    }

    pub fn fetch_white_list(&self) -> Result<WhiteList, CliError> {
        let address = self.white_list_address();
        if !self.account_exists(&address)? {
            return Err(CliError::AccountNotFound(address));
        }
        Ok(self.program.account::<WhiteList>(address)?)
    }

    /// Checks the payer can top `address` up to a rent-exempt account of
    /// `space` bytes.
    pub fn ensure_rent_covered(&self, address: &Pubkey, space: usize) -> Result<(), CliError> {
        let rpc = self.program.rpc();
        let prefunded = self
            .fetch_optional_account(address)?
            .map_or(0, |account| account.lamports);
        let rent_exempt_minimum = rpc.get_minimum_balance_for_rent_exemption(space)?;
        let required = rent_shortfall(rent_exempt_minimum, prefunded);
        let available = rpc.get_balance(&self.payer())?;
        debug!(required, available, prefunded, space, "rent check");

        if available < required {
            return Err(CliError::InsufficientFunds(required, available));
        }
        Ok(())
    }

    pub fn initialize_white_list(
        &self,
        capacity: u16,
        admin: Pubkey,
    ) -> Result<Signature, CliError> {
        let white_list = self.white_list_address();
        if self.account_exists(&white_list)? {
            return Err(CliError::AlreadyInitialized(white_list));
        }
        self.ensure_rent_covered(&white_list, WhiteList::space(capacity))?;

        let signature = self
            .program
            .request()
            .accounts(whitelist_hook::accounts::InitializeWhiteList {
                payer: self.payer(),
                white_list,
                system_program: system_program::ID,
            })
            .args(whitelist_hook::instruction::InitializeWhiteList { capacity, admin })
            .send()?;
        Ok(signature)
    }

    pub fn initialize_extra_account_meta_list(
        &self,
        mint: Pubkey,
        extra_account_count: u8,
    ) -> Result<Signature, CliError> {
        let extra_account_meta_list = self.extra_account_metas_address(&mint);
        if self.account_exists(&extra_account_meta_list)? {
            return Err(CliError::AlreadyInitialized(extra_account_meta_list));
        }
        let space = whitelist_hook::registry::registry_space(extra_account_count)
            .map_err(|e| CliError::InvalidArg(e.to_string()))?;
        self.ensure_rent_covered(&extra_account_meta_list, space)?;

        let signature = self
            .program
            .request()
            .accounts(whitelist_hook::accounts::InitializeExtraAccountMetaList {
                payer: self.payer(),
                extra_account_meta_list,
                mint,
                system_program: system_program::ID,
            })
            .args(whitelist_hook::instruction::InitializeExtraAccountMetaList {
                extra_account_count,
            })
            .send()?;
        Ok(signature)
    }

    pub fn add_to_white_list(&self, identity: Pubkey) -> Result<Signature, CliError> {
        let signature = self
            .program
            .request()
            .accounts(self.manage_accounts())
            .args(whitelist_hook::instruction::AddToWhiteList { identity })
            .send()?;
        Ok(signature)
    }

    pub fn remove_from_white_list(&self, identity: Pubkey) -> Result<Signature, CliError> {
        let signature = self
            .program
            .request()
            .accounts(self.manage_accounts())
            .args(whitelist_hook::instruction::RemoveFromWhiteList { identity })
            .send()?;
        Ok(signature)
    }

    pub fn set_admin(&self, new_admin: Pubkey) -> Result<Signature, CliError> {
        let signature = self
            .program
            .request()
            .accounts(self.manage_accounts())
            .args(whitelist_hook::instruction::SetAdmin { new_admin })
            .send()?;
        Ok(signature)
    }

    pub fn set_enforcement(&self, enabled: bool) -> Result<Signature, CliError> {
        let signature = self
            .program
            .request()
            .accounts(self.manage_accounts())
            .args(whitelist_hook::instruction::SetEnforcement { enabled })
            .send()?;
        Ok(signature)
    }

    pub fn fetch_recorded_accounts(&self, mint: &Pubkey) -> Result<RecordedAccounts, CliError> {
        let account = self.fetch_account(&self.extra_account_metas_address(mint))?;
        RecordedAccounts::unpack(*mint, &account.data)
            .map_err(|e| CliError::SerializationError(e.to_string()))
    }

    fn manage_accounts(&self) -> whitelist_hook::accounts::ManageWhiteList {
        whitelist_hook::accounts::ManageWhiteList {
            admin: self.payer(),
            white_list: self.white_list_address(),
        }
    }
}

/// Mirrors the program's vacancy rule: only an empty, system-owned account
/// can still be initialized.
pub fn is_vacant(account: &Account) -> bool {
    account.data.is_empty() && account.owner == system_program::ID
}

/// Lamports the payer still has to add on top of what sits on the address.
pub fn rent_shortfall(rent_exempt_minimum: u64, prefunded: u64) -> u64 {
    rent_exempt_minimum.max(1).saturating_sub(prefunded)
}
