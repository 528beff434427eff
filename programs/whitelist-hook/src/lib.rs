use anchor_lang::prelude::*;
use spl_discriminator::SplDiscriminate;
use spl_transfer_hook_interface::instruction::ExecuteInstruction;

pub mod account;
pub mod authorizer;
pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod pda;
pub mod registry;
pub mod state;

use instructions::*;

declare_id!("A7TKxVmarz9XkuLB22xcjyKq8sLh3AAZZ8hbxxEixWw2");

#[program]
pub mod whitelist_hook {
    use super::*;

    pub fn initialize_white_list(
        ctx: Context<InitializeWhiteList>,
        capacity: u16,
        admin: Pubkey,
    ) -> Result<()> {
        instructions::initialize_white_list::handler(ctx, capacity, admin)
    }

    pub fn initialize_extra_account_meta_list(
        ctx: Context<InitializeExtraAccountMetaList>,
        extra_account_count: u8,
    ) -> Result<()> {
        instructions::initialize_extra_account_meta_list::handler(ctx, extra_account_count)
    }

    pub fn add_to_white_list(ctx: Context<ManageWhiteList>, identity: Pubkey) -> Result<()> {
        instructions::white_list::add(ctx, identity)
    }

    pub fn remove_from_white_list(ctx: Context<ManageWhiteList>, identity: Pubkey) -> Result<()> {
        instructions::white_list::remove(ctx, identity)
    }

    pub fn set_admin(ctx: Context<ManageWhiteList>, new_admin: Pubkey) -> Result<()> {
        instructions::admin::set_admin(ctx, new_admin)
    }

    pub fn set_enforcement(ctx: Context<ManageWhiteList>, enabled: bool) -> Result<()> {
        instructions::admin::set_enforcement(ctx, enabled)
    }

    // Token-2022 invokes the hook with the SPL interface discriminator rather
    // than Anchor's, so the route is pinned to it.
    #[instruction(discriminator = ExecuteInstruction::SPL_DISCRIMINATOR_SLICE)]
    pub fn transfer_hook(ctx: Context<TransferHook>, amount: u64) -> Result<()> {
        instructions::transfer_hook::handler(ctx, amount)
    }
}
