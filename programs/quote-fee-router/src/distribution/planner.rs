use anchor_lang::prelude::*;
use crate::constants::MAX_PAGE_SIZE;
use crate::distribution::math::{apply_bps, capped, mul_div_floor};
use crate::errors::ErrorCode;
use crate::states::{DayState, Policy, Progress};

/// Amounts yielded by one claim against the bound position
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClaimedFees {
    pub quote: u64,
    pub base: u64,
}

/// Caller input for one crank call
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CrankRequest {
    /// Unix timestamp of the call
    pub now: i64,
    pub page_cursor: u64,
    pub is_last_page: bool,
    /// Locked weight of each investor in the page, in page order
    pub weights: Vec<u64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PayoutTarget {
    /// Index into the page
    Investor(usize),
    Creator,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Payout {
    pub target: PayoutTarget,
    pub amount: u64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PageSummary {
    pub day: i64,
    pub page_cursor: u64,
    pub investor_count: u32,
    /// Quote claimed by this call
    pub quote_claimed: u64,
    /// Investor pool for the day as of this page
    pub investor_pool: u64,
    pub paid_total: u64,
    pub dust_total: u64,
    /// Carry after the page, before any day-close flush
    pub carry_after: u64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DayCloseSummary {
    pub day: i64,
    pub remainder: u64,
    pub distributed_today: u64,
    pub claimed_today: u64,
}

/// Fully validated outcome of a crank call, ready to commit
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CrankPlan {
    /// Progress to persist once every payout succeeded
    pub next: Progress,
    /// Stale-day flush first, then investor payouts in page order,
    /// then the creator remainder if the page closes the day
    pub payouts: Vec<Payout>,
    pub page: PageSummary,
    /// Previous day closed by this call's rollover
    pub rolled_over: Option<DayCloseSummary>,
    pub day_close: Option<DayCloseSummary>,
}

impl CrankPlan {
    pub fn total_outflow(&self) -> Result<u64> {
        self.payouts.iter().try_fold(0u64, |total, payout| {
            total
                .checked_add(payout.amount)
                .ok_or(ErrorCode::ArithmeticOverflow.into())
        })
    }
}

/// Checks that need no claim: day window, cursor and page size.
/// Returns the progress rolled onto the request's day.
pub fn preflight(policy: &Policy, progress: &Progress, request: &CrankRequest) -> Result<Progress> {
    require!(policy.initialized, ErrorCode::ConstraintViolation);
    require!(
        request.weights.len() <= MAX_PAGE_SIZE,
        ErrorCode::InvalidInvestorPage
    );

    let mut next = progress.clone();
    next.roll_to(Progress::day_of(request.now))?;
    next.check_cursor(request.page_cursor, policy.cursor_mode)?;
    Ok(next)
}

/// Close summary for a day that rolled over without its last page.
/// Its carry is still in the treasury and goes to the creator.
pub fn stale_day_close(progress: &Progress, today: i64) -> Option<DayCloseSummary> {
    if today <= progress.current_day || progress.day_state() != DayState::InProgress {
        return None;
    }
    Some(DayCloseSummary {
        day: progress.current_day,
        remainder: progress.carry_quote_today,
        distributed_today: progress.distributed_quote_today,
        claimed_today: progress.claimed_quote_today,
    })
}

/// Investor share of everything claimed today, clamped to the daily cap
pub fn investor_pool(policy: &Policy, claimed_today: u64) -> Result<u64> {
    let pool = apply_bps(claimed_today, policy.investor_fee_share_bps)?;
    Ok(capped(pool, policy.daily_cap_quote))
}

/// Computes the complete state transition for one crank call without side effects
pub fn plan_crank(
    policy: &Policy,
    progress: &Progress,
    claim: ClaimedFees,
    request: &CrankRequest,
) -> Result<CrankPlan> {
    let rolled_over = stale_day_close(progress, Progress::day_of(request.now));
    let mut next = preflight(policy, progress, request)?;

    require!(claim.base == 0, ErrorCode::QuoteOnlyViolation);
    next.claimed_quote_today = next
        .claimed_quote_today
        .checked_add(claim.quote)
        .ok_or(ErrorCode::ArithmeticOverflow)?;

    let mut payouts = Vec::with_capacity(request.weights.len() + 2);
    if let Some(stale) = rolled_over {
        if stale.remainder > 0 {
            payouts.push(Payout {
                target: PayoutTarget::Creator,
                amount: stale.remainder,
            });
        }
    }

    // Every page of the day is paid out of the same pool, so the pages
    // together form one pro-rata split over y0_total.
    let pool = investor_pool(policy, next.claimed_quote_today)?;
    let room = pool.saturating_sub(next.distributed_quote_today);

    let mut paid_total: u64 = 0;
    let mut dust_total: u64 = 0;
    for (index, weight) in request.weights.iter().enumerate() {
        let share = mul_div_floor(pool, *weight, policy.y0_total)?;
        if share == 0 {
            continue;
        }
        if share < policy.min_payout_lamports {
            dust_total = dust_total
                .checked_add(share)
                .ok_or(ErrorCode::ArithmeticOverflow)?;
            continue;
        }
        paid_total = paid_total
            .checked_add(share)
            .ok_or(ErrorCode::ArithmeticOverflow)?;
        payouts.push(Payout {
            target: PayoutTarget::Investor(index),
            amount: share,
        });
    }

    let allocated = paid_total
        .checked_add(dust_total)
        .ok_or(ErrorCode::ArithmeticOverflow)?;
    require!(allocated <= room, ErrorCode::CapExceeded);

    next.distributed_quote_today = next
        .distributed_quote_today
        .checked_add(paid_total)
        .ok_or(ErrorCode::ArithmeticOverflow)?;
    next.carry_quote_today = next
        .claimed_quote_today
        .checked_sub(next.distributed_quote_today)
        .ok_or(ErrorCode::ArithmeticOverflow)?;
    next.assert_conserved()?;

    let investor_count =
        u32::try_from(request.weights.len()).map_err(|_| error!(ErrorCode::ArithmeticOverflow))?;
    let page = PageSummary {
        day: next.current_day,
        page_cursor: request.page_cursor,
        investor_count,
        quote_claimed: claim.quote,
        investor_pool: pool,
        paid_total,
        dust_total,
        carry_after: next.carry_quote_today,
    };

    let day_close = if request.is_last_page {
        let remainder = next.carry_quote_today;
        if remainder > 0 {
            payouts.push(Payout {
                target: PayoutTarget::Creator,
                amount: remainder,
            });
        }
        next.carry_quote_today = 0;
        next.day_closed = true;
        Some(DayCloseSummary {
            day: next.current_day,
            remainder,
            distributed_today: next.distributed_quote_today,
            claimed_today: next.claimed_quote_today,
        })
    } else {
        None
    };

    next.page_cursor = request.page_cursor;
    next.last_distribution_ts = request.now;
    next.pages_processed_today = next
        .pages_processed_today
        .checked_add(1)
        .ok_or(ErrorCode::ArithmeticOverflow)?;
    next.investors_processed_today = next
        .investors_processed_today
        .checked_add(investor_count)
        .ok_or(ErrorCode::ArithmeticOverflow)?;

    Ok(CrankPlan {
        next,
        payouts,
        page,
        rolled_over,
        day_close,
    })
}
