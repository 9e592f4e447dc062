use anchor_lang::prelude::*;
use crate::constants::SECONDS_PER_DAY;
use crate::errors::ErrorCode;
use crate::states::CursorMode;

/// Where a pool stands within its current distribution day
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DayState {
    /// New day, no page processed yet
    Idle,
    /// At least one page committed, day still open
    InProgress,
    /// Last page committed, remainder routed to the creator
    Closed,
}

/// Per-pool, per-day distribution progress
#[account]
#[derive(InitSpace, Debug, Default, PartialEq, Eq)]
pub struct Progress {
    /// Pool this record tracks
    pub pool: Pubkey,
    /// Day key being distributed (floor(ts / 86400))
    pub current_day: i64,
    /// Timestamp of the last committed crank
    pub last_distribution_ts: i64,
    /// Quote claimed from the fee position today
    pub claimed_quote_today: u64,
    /// Quote paid out to investors today
    pub distributed_quote_today: u64,
    /// Quote claimed but not yet paid out today
    pub carry_quote_today: u64,
    /// Last committed caller cursor
    pub page_cursor: u64,
    /// Pages committed today
    pub pages_processed_today: u32,
    /// Investors seen across today's pages
    pub investors_processed_today: u32,
    /// True once the last page of the day committed
    pub day_closed: bool,
    /// Bump seed for the PDA
    pub bump: u8,
}

impl Progress {
    /// Day key for a unix timestamp
    pub fn day_of(unix_timestamp: i64) -> i64 {
        unix_timestamp.div_euclid(SECONDS_PER_DAY)
    }

    pub fn day_state(&self) -> DayState {
        if self.day_closed {
            DayState::Closed
        } else if self.pages_processed_today == 0 {
            DayState::Idle
        } else {
            DayState::InProgress
        }
    }

    /// Fails when a crank for `today` cannot run against this record
    pub fn check_window(&self, today: i64) -> Result<()> {
        require!(today >= self.current_day, ErrorCode::DailyWindowNotReady);
        if today == self.current_day {
            require!(!self.day_closed, ErrorCode::DailyWindowNotReady);
        }
        Ok(())
    }

    /// Moves the record onto `today`, resetting the daily totals on a new day.
    /// Returns true when a rollover happened.
    pub fn roll_to(&mut self, today: i64) -> Result<bool> {
        self.check_window(today)?;
        if today == self.current_day {
            return Ok(false);
        }

        self.current_day = today;
        self.claimed_quote_today = 0;
        self.distributed_quote_today = 0;
        self.carry_quote_today = 0;
        self.page_cursor = 0;
        self.pages_processed_today = 0;
        self.investors_processed_today = 0;
        self.day_closed = false;
        Ok(true)
    }

    /// Rejects replays and regressions of the page cursor within the day
    pub fn check_cursor(&self, page_cursor: u64, mode: CursorMode) -> Result<()> {
        let first_page = self.pages_processed_today == 0;
        match mode {
            CursorMode::Monotonic => {
                require!(
                    first_page || page_cursor > self.page_cursor,
                    ErrorCode::InvalidInvestorPage
                );
            }
            CursorMode::Sequential => {
                let expected = if first_page {
                    0
                } else {
                    self.page_cursor
                        .checked_add(1)
                        .ok_or(ErrorCode::ArithmeticOverflow)?
                };
                require!(page_cursor == expected, ErrorCode::InvalidInvestorPage);
            }
        }
        Ok(())
    }

    /// distributed + carry must never exceed claimed
    pub fn assert_conserved(&self) -> Result<()> {
        let accounted = self
            .distributed_quote_today
            .checked_add(self.carry_quote_today)
            .ok_or(ErrorCode::ArithmeticOverflow)?;
        require!(
            accounted <= self.claimed_quote_today,
            ErrorCode::CapExceeded
        );
        Ok(())
    }
}
