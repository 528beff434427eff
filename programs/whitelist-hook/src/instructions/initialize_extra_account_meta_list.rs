use crate::account::{create_pda_account, ensure_vacant};
use crate::constants::EXTRA_ACCOUNT_METAS_SEED;
use crate::events::*;
use crate::registry;
use anchor_lang::prelude::*;
use anchor_spl::token_interface::Mint;
use spl_tlv_account_resolution::state::ExtraAccountMetaList;
use spl_transfer_hook_interface::instruction::ExecuteInstruction;

#[derive(Accounts)]
pub struct InitializeExtraAccountMetaList<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    /// CHECK: ExtraAccountMetaList account, created in the handler
    #[account(
        mut,
        seeds = [EXTRA_ACCOUNT_METAS_SEED, mint.key().as_ref()],
        bump
    )]
    pub extra_account_meta_list: UncheckedAccount<'info>,

    pub mint: InterfaceAccount<'info, Mint>,

    pub system_program: Program<'info, System>,
}

pub fn handler(
    ctx: Context<InitializeExtraAccountMetaList>,
    extra_account_count: u8,
) -> Result<()> {
    let info = ctx.accounts.extra_account_meta_list.to_account_info();
    ensure_vacant(&info)?;

    let space = registry::registry_space(extra_account_count)?;
    let extra_account_metas = registry::extra_account_metas(ctx.program_id)?;

    let mint = ctx.accounts.mint.key();
    let bump_seed = [ctx.bumps.extra_account_meta_list];
    let signer_seeds: &[&[u8]] = &[EXTRA_ACCOUNT_METAS_SEED, mint.as_ref(), &bump_seed];
    create_pda_account(
        &ctx.accounts.payer.to_account_info(),
        &info,
        &ctx.accounts.system_program.to_account_info(),
        space,
        signer_seeds,
    )?;

    ExtraAccountMetaList::init::<ExecuteInstruction>(
        &mut info.try_borrow_mut_data()?,
        &extra_account_metas,
    )?;

    msg!("Extra account metas recorded for mint {0}", mint);
    emit!(ExtraAccountMetaListInitialized {
        mint,
        extra_account_meta_list: info.key(),
        extra_account_count,
    });

    Ok(())
}
