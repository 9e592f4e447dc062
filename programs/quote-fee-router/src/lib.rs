use anchor_lang::prelude::*;

declare_id!("FAAk54pcwJFvHD76YaB5sZzqXCEhUCVpP3cBvggKofuS");

pub mod instructions;
pub mod errors;
pub mod constants;
pub mod states;
pub mod events;
pub mod distribution;
pub mod adapters;

pub use instructions::*;
pub use events::*;
pub use states::{CursorMode, PolicyUpdate};

#[program]
pub mod quote_fee_router {
    use super::*;

    pub fn init_policy(ctx: Context<InitPolicy>, args: InitPolicyArgs) -> Result<()> {
        InitPolicy::handle(ctx, args)
    }

    pub fn update_policy(ctx: Context<UpdatePolicy>, update: PolicyUpdate) -> Result<()> {
        UpdatePolicy::handle(ctx, update)
    }

    pub fn init_honorary_position(ctx: Context<InitHonoraryPosition>) -> Result<()> {
        InitHonoraryPosition::handle(ctx)
    }

    pub fn crank_distribute<'info>(
        ctx: Context<'_, '_, 'info, 'info, CrankDistribute<'info>>,
        args: CrankArgs,
    ) -> Result<()> {
        CrankDistribute::handle(ctx, args)
    }
}
