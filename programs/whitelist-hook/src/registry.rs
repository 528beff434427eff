//! Extra accounts the hook requires on every `Execute` call.
//!
//! The descriptor list is written once per mint into an SPL
//! `ExtraAccountMetaList` account and Token-2022 appends the resolved accounts
//! after the five base accounts (source, mint, destination, owner, meta list).

use crate::constants::{MAX_EXTRA_ACCOUNT_METAS, WHITE_LIST_SEED};
use crate::error::WhitelistHookError;
use crate::pda::find_white_list_address;
use anchor_lang::prelude::*;
use spl_tlv_account_resolution::{
    account::ExtraAccountMeta, seeds::Seed, state::ExtraAccountMetaList,
};
use spl_transfer_hook_interface::instruction::ExecuteInstruction;
use spl_type_length_value::state::TlvStateBorrowed;

/// `ExtraAccountMeta` discriminator for an entry holding a literal address.
const FIXED_ADDRESS_DISCRIMINATOR: u8 = 0;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccountRole {
    WhiteList,
}

impl AccountRole {
    pub fn address(&self, program_id: &Pubkey) -> Pubkey {
        match self {
            AccountRole::WhiteList => find_white_list_address(program_id).0,
        }
    }

    fn seeds(&self) -> Vec<Seed> {
        match self {
            AccountRole::WhiteList => vec![Seed::Literal {
                bytes: WHITE_LIST_SEED.to_vec(),
            }],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HookAccountDescriptor {
    pub role: AccountRole,
    pub is_writable: bool,
    /// Recorded as seeds for Token-2022 to derive instead of a fixed address.
    pub is_derived: bool,
}

impl HookAccountDescriptor {
    pub fn to_extra_account_meta(&self, program_id: &Pubkey) -> Result<ExtraAccountMeta> {
        let meta = if self.is_derived {
            ExtraAccountMeta::new_with_seeds(&self.role.seeds(), false, self.is_writable)?
        } else {
            ExtraAccountMeta::new_with_pubkey(
                &self.role.address(program_id),
                false,
                self.is_writable,
            )?
        };
        Ok(meta)
    }
}

/// The hook only reads the white list, so it is requested read-only.
pub const REQUIRED_ACCOUNTS: &[HookAccountDescriptor] = &[HookAccountDescriptor {
    role: AccountRole::WhiteList,
    is_writable: false,
    is_derived: false,
}];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedAccount {
    pub role: AccountRole,
    pub key: Pubkey,
    pub is_writable: bool,
}

/// Descriptor list read back from the meta list account of `mint`.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordedAccounts {
    pub mint: Pubkey,
    pub metas: Vec<ExtraAccountMeta>,
}

impl RecordedAccounts {
    pub fn unpack(mint: Pubkey, data: &[u8]) -> Result<Self> {
        let state = TlvStateBorrowed::unpack(data)?;
        let metas = ExtraAccountMetaList::unpack_with_tlv_state::<ExecuteInstruction>(&state)?;
        Ok(Self {
            mint,
            metas: metas.data().to_vec(),
        })
    }

    /// Pairs each recorded entry with the role declared at the same position.
    /// Addresses come from the record, never from a fresh derivation.
    pub fn resolve(&self, program_id: &Pubkey) -> Result<Vec<ResolvedAccount>> {
        require!(
            self.metas.len() == REQUIRED_ACCOUNTS.len(),
            WhitelistHookError::AccountSetMismatch
        );

        REQUIRED_ACCOUNTS
            .iter()
            .zip(&self.metas)
            .map(|(descriptor, meta)| {
                Ok(ResolvedAccount {
                    role: descriptor.role,
                    key: recorded_address(descriptor, meta, program_id)?,
                    is_writable: bool::from(meta.is_writable),
                })
            })
            .collect()
    }
}

fn recorded_address(
    descriptor: &HookAccountDescriptor,
    meta: &ExtraAccountMeta,
    program_id: &Pubkey,
) -> Result<Pubkey> {
    if meta.discriminator == FIXED_ADDRESS_DISCRIMINATOR {
        return Ok(Pubkey::new_from_array(meta.address_config));
    }

    // seed entries are only honoured when they are the ones this program writes
    require!(
        *meta == descriptor.to_extra_account_meta(program_id)?,
        WhitelistHookError::AccountSetMismatch
    );
    Ok(descriptor.role.address(program_id))
}

pub fn extra_account_metas(program_id: &Pubkey) -> Result<Vec<ExtraAccountMeta>> {
    REQUIRED_ACCOUNTS
        .iter()
        .map(|descriptor| descriptor.to_extra_account_meta(program_id))
        .collect()
}

pub fn validate_extra_account_count(extra_account_count: u8) -> Result<()> {
    require!(
        extra_account_count as usize >= REQUIRED_ACCOUNTS.len()
            && extra_account_count <= MAX_EXTRA_ACCOUNT_METAS,
        WhitelistHookError::InvalidAccountCount
    );
    Ok(())
}

/// Bytes to allocate for a meta list holding `extra_account_count` entries.
pub fn registry_space(extra_account_count: u8) -> Result<usize> {
    validate_extra_account_count(extra_account_count)?;
    Ok(ExtraAccountMetaList::size_of(extra_account_count as usize)?)
}

/// Attached extra accounts must equal the resolved descriptors in identity and order.
pub fn match_accounts(required: &[ResolvedAccount], attached: &[Pubkey]) -> Result<()> {
    require!(
        required.len() == attached.len()
            && required
                .iter()
                .zip(attached)
                .all(|(expected, actual)| expected.key == *actual),
        WhitelistHookError::AccountSetMismatch
    );
    Ok(())
}

pub fn find_role(required: &[ResolvedAccount], role: AccountRole) -> Result<Pubkey> {
    required
        .iter()
        .find(|account| account.role == role)
        .map(|account| account.key)
        .ok_or_else(|| error!(WhitelistHookError::AccountSetMismatch))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extra_account_count_bounds() {
        assert_eq!(
            validate_extra_account_count(0).unwrap_err(),
            WhitelistHookError::InvalidAccountCount.into()
        );
        assert_eq!(
            validate_extra_account_count(MAX_EXTRA_ACCOUNT_METAS + 1).unwrap_err(),
            WhitelistHookError::InvalidAccountCount.into()
        );
        assert!(validate_extra_account_count(1).is_ok());
        assert!(validate_extra_account_count(10).is_ok());
    }

    #[test]
    fn test_registry_space_grows_with_count() {
        let one = registry_space(1).expect("one entry");
        let ten = registry_space(10).expect("ten entries");
        assert!(ten > one);
        assert_eq!(ten, ExtraAccountMetaList::size_of(10).expect("size"));
    }

    #[test]
    fn test_white_list_recorded_as_fixed_read_only_address() {
        let metas = extra_account_metas(&crate::ID).expect("metas");
        let (white_list, _) = find_white_list_address(&crate::ID);
        assert_eq!(
            metas,
            vec![ExtraAccountMeta::new_with_pubkey(&white_list, false, false).expect("meta")]
        );
    }

    #[test]
    fn test_derived_descriptor_uses_seeds() {
        let descriptor = HookAccountDescriptor {
            role: AccountRole::WhiteList,
            is_writable: false,
            is_derived: true,
        };
        let expected = ExtraAccountMeta::new_with_seeds(
            &[Seed::Literal {
                bytes: WHITE_LIST_SEED.to_vec(),
            }],
            false,
            false,
        )
        .expect("meta");
        assert_eq!(
            descriptor.to_extra_account_meta(&crate::ID).expect("meta"),
            expected
        );
    }

    fn recorded(mint: Pubkey) -> RecordedAccounts {
        RecordedAccounts {
            mint,
            metas: extra_account_metas(&crate::ID).expect("metas"),
        }
    }

    #[test]
    fn test_recorded_accounts_read_back_from_meta_list() {
        let metas = extra_account_metas(&crate::ID).expect("metas");
        let mut data = vec![0u8; registry_space(10).expect("space")];
        ExtraAccountMetaList::init::<ExecuteInstruction>(&mut data, &metas).expect("init");

        let mint = Pubkey::new_unique();
        let record = RecordedAccounts::unpack(mint, &data).expect("unpack");
        assert_eq!(record, recorded(mint));
    }

    #[test]
    fn test_unwritten_meta_list_is_rejected() {
        let data = vec![0u8; registry_space(1).expect("space")];
        assert!(RecordedAccounts::unpack(Pubkey::new_unique(), &data).is_err());
    }

    #[test]
    fn test_resolve_reads_address_from_record() {
        let record = recorded(Pubkey::new_unique());
        let resolved = record.resolve(&crate::ID).expect("resolve");
        assert_eq!(
            resolved,
            vec![ResolvedAccount {
                role: AccountRole::WhiteList,
                key: find_white_list_address(&crate::ID).0,
                is_writable: false,
            }]
        );

        let elsewhere = Pubkey::new_unique();
        let relocated = RecordedAccounts {
            mint: record.mint,
            metas: vec![ExtraAccountMeta::new_with_pubkey(&elsewhere, false, false).expect("meta")],
        };
        let resolved = relocated.resolve(&crate::ID).expect("resolve");
        assert_eq!(resolved[0].key, elsewhere);
    }

    #[test]
    fn test_resolve_rejects_foreign_layouts() {
        let mint = Pubkey::new_unique();
        let empty = RecordedAccounts {
            mint,
            metas: vec![],
        };
        assert_eq!(
            empty.resolve(&crate::ID).unwrap_err(),
            WhitelistHookError::AccountSetMismatch.into()
        );

        let foreign_seeds = RecordedAccounts {
            mint,
            metas: vec![ExtraAccountMeta::new_with_seeds(
                &[Seed::Literal {
                    bytes: b"elsewhere".to_vec(),
                }],
                false,
                false,
            )
            .expect("meta")],
        };
        assert_eq!(
            foreign_seeds.resolve(&crate::ID).unwrap_err(),
            WhitelistHookError::AccountSetMismatch.into()
        );
    }

    #[test]
    fn test_match_accounts_checks_identity_and_order() {
        let required = recorded(Pubkey::new_unique())
            .resolve(&crate::ID)
            .expect("resolve");
        let declared: Vec<Pubkey> = required.iter().map(|account| account.key).collect();

        assert!(match_accounts(&required, &declared).is_ok());
        assert_eq!(
            match_accounts(&required, &[Pubkey::new_unique()]).unwrap_err(),
            WhitelistHookError::AccountSetMismatch.into()
        );
        assert_eq!(
            match_accounts(&required, &[]).unwrap_err(),
            WhitelistHookError::AccountSetMismatch.into()
        );

        let mut extended = declared.clone();
        extended.push(Pubkey::new_unique());
        assert!(match_accounts(&required, &extended).is_err());
    }
}
