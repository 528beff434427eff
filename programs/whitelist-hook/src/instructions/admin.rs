use crate::events::*;
use crate::instructions::white_list::ManageWhiteList;
use anchor_lang::prelude::*;

pub fn set_admin(ctx: Context<ManageWhiteList>, new_admin: Pubkey) -> Result<()> {
    let white_list = &mut ctx.accounts.white_list;
    let old_admin = white_list.set_admin(new_admin, ctx.accounts.admin.key)?;

    emit!(AdminTransferred {
        white_list: white_list.key(),
        old_admin,
        new_admin,
    });
    Ok(())
}

pub fn set_enforcement(ctx: Context<ManageWhiteList>, enabled: bool) -> Result<()> {
    let white_list = &mut ctx.accounts.white_list;
    white_list.set_enforcement(enabled, ctx.accounts.admin.key)?;

    emit!(EnforcementChanged {
        white_list: white_list.key(),
        enabled,
    });
    Ok(())
}
