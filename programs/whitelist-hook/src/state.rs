use crate::constants::MAX_WHITE_LIST_CAPACITY;
use crate::error::WhitelistHookError;
use anchor_lang::prelude::*;

/// Singleton allow-list consulted by the transfer hook.
///
/// `entries` is kept sorted so lookups are a binary search. The account is
/// allocated once for `capacity` entries and never reallocated.
#[account]
#[derive(Debug, PartialEq, Eq)]
pub struct WhiteList {
    pub admin: Pubkey,
    pub is_on: bool,
    pub capacity: u16,
    pub bump: u8,
    pub entries: Vec<Pubkey>,
}

impl WhiteList {
    /// Discriminator, fixed fields and the vec length prefix.
    pub const BASE_SPACE: usize = 8 + 32 + 1 + 2 + 1 + 4;

    pub fn space(capacity: u16) -> usize {
        Self::BASE_SPACE + capacity as usize * 32
    }

    pub fn new(admin: Pubkey, capacity: u16, bump: u8) -> Result<Self> {
        require!(
            capacity > 0 && capacity <= MAX_WHITE_LIST_CAPACITY,
            WhitelistHookError::InvalidCapacity
        );

        Ok(Self {
            admin,
            is_on: true,
            capacity,
            bump,
            entries: Vec::new(),
        })
    }

    pub fn contains(&self, identity: &Pubkey) -> bool {
        self.entries.binary_search(identity).is_ok()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Adds `identity`. Returns `false` when it was already listed.
    pub fn insert(&mut self, identity: Pubkey, requester: &Pubkey) -> Result<bool> {
        self.ensure_admin(requester)?;

        match self.entries.binary_search(&identity) {
            Ok(_) => Ok(false),
            Err(index) => {
                require!(
                    self.entries.len() < self.capacity as usize,
                    WhitelistHookError::CapacityExceeded
                );
                self.entries.insert(index, identity);
                Ok(true)
            }
        }
    }

    /// Removes `identity`. Returns `false` when it was not listed.
    pub fn remove(&mut self, identity: &Pubkey, requester: &Pubkey) -> Result<bool> {
        self.ensure_admin(requester)?;

        match self.entries.binary_search(identity) {
            Ok(index) => {
                self.entries.remove(index);
                Ok(true)
            }
            Err(_) => Ok(false),
        }
    }

    /// Hands administration to `new_admin` and returns the previous admin.
    pub fn set_admin(&mut self, new_admin: Pubkey, requester: &Pubkey) -> Result<Pubkey> {
        self.ensure_admin(requester)?;
        Ok(std::mem::replace(&mut self.admin, new_admin))
    }

    pub fn set_enforcement(&mut self, enabled: bool, requester: &Pubkey) -> Result<()> {
        self.ensure_admin(requester)?;
        self.is_on = enabled;
        Ok(())
    }

    fn ensure_admin(&self, requester: &Pubkey) -> Result<()> {
        require_keys_eq!(self.admin, *requester, WhitelistHookError::Unauthorized);
        Ok(())
    }
}
