use anchor_lang::prelude::*;
use crate::distribution::planner::{plan_crank, preflight, ClaimedFees, CrankPlan, CrankRequest, PayoutTarget};
use crate::errors::ErrorCode;
use crate::states::{Policy, Progress};

/// Claims newly accrued fees from the bound position
pub trait FeeClaimAdapter {
    fn claim(&mut self, position: &Pubkey) -> Result<ClaimedFees>;
}

/// Quote-denominated treasury the engine pays out of
pub trait QuoteTreasury {
    fn balance(&self) -> Result<u64>;
    fn transfer(&mut self, target: PayoutTarget, amount: u64) -> Result<()>;
}

/// Runs one crank call: claim, plan, validate, then transfer and commit.
/// `progress` is only written after every transfer succeeded.
pub fn run_crank<C, T>(
    policy: &Policy,
    progress: &mut Progress,
    position: &Pubkey,
    claimer: &mut C,
    treasury: &mut T,
    request: &CrankRequest,
) -> Result<CrankPlan>
where
    C: FeeClaimAdapter,
    T: QuoteTreasury,
{
    require!(policy.is_position_bound(), ErrorCode::ConstraintViolation);
    require_keys_eq!(*position, policy.honorary_position, ErrorCode::ConstraintViolation);

    // Reject closed days and replays before touching the position
    preflight(policy, progress, request)?;

    let claimed = claimer.claim(position)?;
    msg!("Claimed quote: {}, base: {}", claimed.quote, claimed.base);

    let plan = plan_crank(policy, progress, claimed, request)?;
    msg!(
        "Page {} investor pool: {}, paid: {}, dust: {}, carry: {}",
        plan.page.page_cursor,
        plan.page.investor_pool,
        plan.page.paid_total,
        plan.page.dust_total,
        plan.page.carry_after
    );

    let outflow = plan.total_outflow()?;
    let balance = treasury.balance()?;
    msg!("Planned outflow: {} (treasury balance: {})", outflow, balance);
    require!(outflow <= balance, ErrorCode::InsufficientTreasuryBalance);

    for payout in &plan.payouts {
        treasury.transfer(payout.target, payout.amount)?;
    }

    *progress = plan.next.clone();
    Ok(plan)
}
