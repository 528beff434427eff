//! Account creation for the hook's program derived addresses.

use crate::error::WhitelistHookError;
use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Allocate, Assign, CreateAccount, Transfer};

/// Fails with `AlreadyInitialized` once `account` holds data or has an owner
/// other than the system program.
pub fn ensure_vacant(account: &AccountInfo) -> Result<()> {
    require!(
        account.data_is_empty() && account.owner == &system_program::ID,
        WhitelistHookError::AlreadyInitialized
    );
    Ok(())
}

/// Creates a rent-exempt account of `space` bytes at a PDA owned by this
/// program. `new_account` must already have passed `ensure_vacant`. Lamports
/// already sitting on the address are topped up, so pre-funding cannot block
/// initialization.
pub fn create_pda_account<'info>(
    payer: &AccountInfo<'info>,
    new_account: &AccountInfo<'info>,
    system_program: &AccountInfo<'info>,
    space: usize,
    signer_seeds: &[&[u8]],
) -> Result<()> {
    let rent = Rent::get()?.minimum_balance(space).max(1);
    let required_lamports = rent.saturating_sub(new_account.lamports());
    require!(
        payer.lamports() >= required_lamports,
        WhitelistHookError::InsufficientFunds
    );

    if new_account.lamports() == 0 {
        return system_program::create_account(
            CpiContext::new_with_signer(
                system_program.clone(),
                CreateAccount {
                    from: payer.clone(),
                    to: new_account.clone(),
                },
                &[signer_seeds],
            ),
            rent,
            space as u64,
            &crate::ID,
        );
    }

    if required_lamports > 0 {
        system_program::transfer(
            CpiContext::new(
                system_program.clone(),
                Transfer {
                    from: payer.clone(),
                    to: new_account.clone(),
                },
            ),
            required_lamports,
        )?;
    }

    system_program::allocate(
        CpiContext::new_with_signer(
            system_program.clone(),
            Allocate {
                account_to_allocate: new_account.clone(),
            },
            &[signer_seeds],
        ),
        space as u64,
    )?;

    system_program::assign(
        CpiContext::new_with_signer(
            system_program.clone(),
            Assign {
                account_to_assign: new_account.clone(),
            },
            &[signer_seeds],
        ),
        &crate::ID,
    )
}
