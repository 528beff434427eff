use crate::constants::WHITE_LIST_SEED;
use crate::events::*;
use crate::state::*;
use anchor_lang::prelude::*;

/// Admin-signed access to the white list. The admin check itself lives in
/// `WhiteList` so every mutation path goes through it.
#[derive(Accounts)]
pub struct ManageWhiteList<'info> {
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [WHITE_LIST_SEED],
        bump = white_list.bump
    )]
    pub white_list: Account<'info, WhiteList>,
}

pub fn add(ctx: Context<ManageWhiteList>, identity: Pubkey) -> Result<()> {
    let white_list = &mut ctx.accounts.white_list;

    if !white_list.insert(identity, ctx.accounts.admin.key)? {
        msg!("Already white listed: {0}", identity);
        return Ok(());
    }

    msg!("New account white listed! {0}", identity);
    emit!(WhiteListed {
        white_list: white_list.key(),
        account: identity,
        entries: white_list.len() as u16,
    });
    Ok(())
}

pub fn remove(ctx: Context<ManageWhiteList>, identity: Pubkey) -> Result<()> {
    let white_list = &mut ctx.accounts.white_list;

    if !white_list.remove(&identity, ctx.accounts.admin.key)? {
        msg!("Not on the white list: {0}", identity);
        return Ok(());
    }

    emit!(RemovedFromWhiteList {
        white_list: white_list.key(),
        account: identity,
        entries: white_list.len() as u16,
    });
    Ok(())
}
