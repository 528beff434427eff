use crate::account::{create_pda_account, ensure_vacant};
use crate::constants::WHITE_LIST_SEED;
use crate::events::*;
use crate::state::*;
use anchor_lang::prelude::*;

#[derive(Accounts)]
pub struct InitializeWhiteList<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    /// CHECK: created in the handler, address fixed by seeds
    #[account(
        mut,
        seeds = [WHITE_LIST_SEED],
        bump
    )]
    pub white_list: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<InitializeWhiteList>, capacity: u16, admin: Pubkey) -> Result<()> {
    let info = ctx.accounts.white_list.to_account_info();
    ensure_vacant(&info)?;

    let bump = ctx.bumps.white_list;
    let white_list = WhiteList::new(admin, capacity, bump)?;

    let bump_seed = [bump];
    let signer_seeds: &[&[u8]] = &[WHITE_LIST_SEED, &bump_seed];
    create_pda_account(
        &ctx.accounts.payer.to_account_info(),
        &info,
        &ctx.accounts.system_program.to_account_info(),
        WhiteList::space(capacity),
        signer_seeds,
    )?;

    let mut data = info.try_borrow_mut_data()?;
    white_list.try_serialize(&mut &mut data[..])?;

    msg!("White list created with capacity {0}", capacity);
    emit!(WhiteListInitialized {
        white_list: info.key(),
        admin,
        capacity,
    });

    Ok(())
}
