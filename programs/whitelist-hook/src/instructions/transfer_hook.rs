use crate::authorizer::{Decision, SenderAllowList, TransferAuthorizer, TransferInvocation};
use crate::constants::EXTRA_ACCOUNT_METAS_SEED;
use crate::error::WhitelistHookError;
use crate::events::*;
use crate::registry::RecordedAccounts;
use crate::state::*;
use anchor_lang::prelude::*;
use anchor_spl::token_2022::spl_token_2022::{
    extension::{
        transfer_hook::TransferHookAccount, BaseStateWithExtensions, PodStateWithExtensions,
    },
    pod::PodAccount,
};
use anchor_spl::token_interface::{Mint, TokenAccount};
use spl_tlv_account_resolution::state::ExtraAccountMetaList;
use spl_transfer_hook_interface::instruction::{ExecuteInstruction, TransferHookInstruction};

/// Accounts of the SPL `Execute` instruction. The first five are fixed by the
/// interface; the rest come from the extra account meta list, in its order.
#[derive(Accounts)]
pub struct TransferHook<'info> {
    #[account(token::mint = mint)]
    pub source_token: InterfaceAccount<'info, TokenAccount>,
    pub mint: InterfaceAccount<'info, Mint>,
    #[account(token::mint = mint)]
    pub destination_token: InterfaceAccount<'info, TokenAccount>,
    /// CHECK: source owner or delegate, authenticated by Token-2022
    pub owner: UncheckedAccount<'info>,
    /// CHECK: ExtraAccountMetaList account, address fixed by seeds
    #[account(
        seeds = [EXTRA_ACCOUNT_METAS_SEED, mint.key().as_ref()],
        bump
    )]
    pub extra_account_meta_list: UncheckedAccount<'info>,
    pub white_list: Account<'info, WhiteList>,
}

pub fn handler(ctx: Context<TransferHook>, amount: u64) -> Result<()> {
    check_is_transferring(&ctx.accounts.source_token.to_account_info())?;
    check_recorded_accounts(&ctx, amount)?;

    let accounts = &ctx.accounts;
    let recorded = RecordedAccounts::unpack(
        accounts.mint.key(),
        &accounts.extra_account_meta_list.try_borrow_data()?,
    )?;
    let extra_accounts = [accounts.white_list.key()];
    let invocation = TransferInvocation {
        source: accounts.source_token.key(),
        mint: accounts.mint.key(),
        destination: accounts.destination_token.key(),
        authority: accounts.owner.key(),
        amount,
        extra_accounts: &extra_accounts,
    };

    let policy = SenderAllowList::new(
        *ctx.program_id,
        &recorded,
        accounts.white_list.key(),
        &accounts.white_list,
    );
    let decision = policy.authorize(&invocation)?;

    if let Decision::Rejected(reason) = decision {
        msg!("Transfer rejected ({0:?}): source {1}", reason, invocation.source);
        return decision.into_result();
    }

    msg!("Transfer of {0} approved for source {1}", amount, invocation.source);
    emit!(TransferApproved {
        mint: invocation.mint,
        source: invocation.source,
        destination: invocation.destination,
        amount,
    });
    Ok(())
}

/// Fails unless Token-2022 flagged the source account as mid-transfer, so
/// the hook cannot be invoked outside a transfer.
fn check_is_transferring(source_token: &AccountInfo) -> Result<()> {
    let data = source_token.try_borrow_data()?;
    let account = PodStateWithExtensions::<PodAccount>::unpack(&data)?;
    let extension = account.get_extension::<TransferHookAccount>()?;

    require!(
        bool::from(extension.transferring),
        WhitelistHookError::IsNotCurrentlyTransferring
    );
    Ok(())
}

/// Compares the supplied accounts with the list stored for this mint.
fn check_recorded_accounts(ctx: &Context<TransferHook>, amount: u64) -> Result<()> {
    let account_infos = ctx.accounts.to_account_infos();
    let data = ctx.accounts.extra_account_meta_list.try_borrow_data()?;

    ExtraAccountMetaList::check_account_infos::<ExecuteInstruction>(
        &account_infos,
        &TransferHookInstruction::Execute { amount }.pack(),
        ctx.program_id,
        &data,
    )
    .map_err(|_| error!(WhitelistHookError::AccountSetMismatch))
}
