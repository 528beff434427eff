//! Program derived addresses owned by the hook.

use crate::constants::{EXTRA_ACCOUNT_METAS_SEED, WHITE_LIST_SEED};
use anchor_lang::prelude::*;

pub fn find_white_list_address(program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[WHITE_LIST_SEED], program_id)
}

/// Same address Token-2022 resolves through
/// `spl_transfer_hook_interface::get_extra_account_metas_address`.
pub fn find_extra_account_metas_address(mint: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[EXTRA_ACCOUNT_METAS_SEED, mint.as_ref()], program_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_white_list_address_is_stable() {
        let (first, bump) = find_white_list_address(&crate::ID);
        let (second, _) = find_white_list_address(&crate::ID);
        assert_eq!(first, second);
        assert_eq!(
            Pubkey::create_program_address(&[WHITE_LIST_SEED, &[bump]], &crate::ID)
                .expect("canonical bump"),
            first
        );
    }

    #[test]
    fn test_extra_account_metas_address_matches_interface() {
        let mint = Pubkey::new_unique();
        let (address, _) = find_extra_account_metas_address(&mint, &crate::ID);
        assert_eq!(
            address,
            spl_transfer_hook_interface::get_extra_account_metas_address(&mint, &crate::ID)
        );
    }

    #[test]
    fn test_registry_address_is_per_mint() {
        let (a, _) = find_extra_account_metas_address(&Pubkey::new_unique(), &crate::ID);
        let (b, _) = find_extra_account_metas_address(&Pubkey::new_unique(), &crate::ID);
        assert_ne!(a, b);
        assert_ne!(a, find_white_list_address(&crate::ID).0);
    }
}
