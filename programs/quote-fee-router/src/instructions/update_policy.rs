use anchor_lang::prelude::*;
use crate::constants::POLICY_SEED;
use crate::errors::ErrorCode;
use crate::states::{Policy, PolicyUpdate};

#[derive(Accounts)]
pub struct UpdatePolicy<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [POLICY_SEED, policy.pool.as_ref()],
        bump = policy.bump,
        has_one = authority @ ErrorCode::Unauthorized
    )]
    pub policy: Box<Account<'info, Policy>>,
}

impl<'info> UpdatePolicy<'info> {
    pub fn handle(ctx: Context<UpdatePolicy>, update: PolicyUpdate) -> Result<()> {
        msg!("Updating policy for pool: {}", ctx.accounts.policy.pool);

        let policy_key = ctx.accounts.policy.key();
        let policy = &mut ctx.accounts.policy;
        policy.apply_update(&update)?;

        msg!("Investor fee share: {} bps", policy.investor_fee_share_bps);
        msg!("Y0 total: {}", policy.y0_total);
        msg!("Daily cap: {}", policy.daily_cap_quote);
        msg!("Min payout: {}", policy.min_payout_lamports);
        msg!("Cursor mode: {:?}", policy.cursor_mode);

        emit!(crate::events::PolicyUpdated {
            policy: policy_key,
            investor_fee_share_bps: policy.investor_fee_share_bps,
            y0_total: policy.y0_total,
            daily_cap_quote: policy.daily_cap_quote,
            min_payout_lamports: policy.min_payout_lamports,
            config_hash: policy.config_hash(),
            timestamp: Clock::get()?.unix_timestamp,
        });

        Ok(())
    }
}
