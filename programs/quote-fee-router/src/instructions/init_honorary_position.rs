use anchor_lang::prelude::*;
use anchor_spl::token::Mint;
use crate::constants::{FEE_POS_OWNER_SEED, POLICY_SEED, POSITION_SEED, VAULT_SEED};
use crate::errors::ErrorCode;
use crate::states::{HonoraryPosition, Policy};

#[derive(Accounts)]
pub struct InitHonoraryPosition<'info> {
    /// Policy authority, pays for the binding record
    #[account(mut)]
    pub authority: Signer<'info>,

    /// CHECK: Pool the position belongs to, matched against the policy
    pub pool: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [POLICY_SEED, pool.key().as_ref()],
        bump = policy.bump,
        has_one = authority @ ErrorCode::Unauthorized
    )]
    pub policy: Box<Account<'info, Policy>>,

    pub quote_mint: Box<Account<'info, Mint>>,

    /// CHECK: External cp-amm fee position, owner checked against the fee program
    pub position: UncheckedAccount<'info>,

    /// CHECK: PDA that owns the position on behalf of the engine
    #[account(
        seeds = [VAULT_SEED, policy.key().as_ref(), FEE_POS_OWNER_SEED],
        bump
    )]
    pub position_owner: UncheckedAccount<'info>,

    /// Binding record keyed by the external position
    #[account(
        init_if_needed,
        payer = authority,
        space = HonoraryPosition::DISCRIMINATOR.len() + HonoraryPosition::INIT_SPACE,
        seeds = [POSITION_SEED, position.key().as_ref()],
        bump
    )]
    pub honorary_position: Box<Account<'info, HonoraryPosition>>,

    pub system_program: Program<'info, System>,
}

impl<'info> InitHonoraryPosition<'info> {
    pub fn handle(ctx: Context<InitHonoraryPosition>) -> Result<()> {
        msg!("Binding honorary position: {}", ctx.accounts.position.key());

        ctx.accounts.honorary_position.validate_binding(
            &ctx.accounts.policy,
            &ctx.accounts.pool.key(),
            &ctx.accounts.quote_mint.key(),
        )?;
        require_keys_eq!(
            *ctx.accounts.position.owner,
            ctx.accounts.policy.fee_program,
            ErrorCode::ConstraintViolation
        );

        let now = Clock::get()?.unix_timestamp;
        let policy_key = ctx.accounts.policy.key();
        let owner_pda = ctx.accounts.position_owner.key();
        let position = ctx.accounts.position.key();

        ctx.accounts.honorary_position.bind(
            policy_key,
            &ctx.accounts.policy,
            owner_pda,
            position,
            now,
            ctx.bumps.honorary_position,
        );
        ctx.accounts.policy.honorary_position = position;

        msg!("Position owner PDA: {}", owner_pda);
        msg!("Pool: {}", ctx.accounts.policy.pool);
        msg!("Quote mint: {}", ctx.accounts.policy.quote_mint);

        emit!(crate::events::HonoraryPositionInitialized {
            pool: ctx.accounts.policy.pool,
            position,
            owner_pda,
            quote_mint: ctx.accounts.policy.quote_mint,
            timestamp: now,
        });

        Ok(())
    }
}
