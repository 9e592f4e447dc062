use anchor_lang::prelude::*;

/// Event emitted when a policy is created for a pool
#[event]
pub struct PolicyInitialized {
    /// Policy PDA
    pub policy: Pubkey,
    /// Pool the policy is bound to
    pub pool: Pubkey,
    /// Quote mint the policy distributes
    pub quote_mint: Pubkey,
    /// SHA-256 over the binding and distribution parameters
    pub config_hash: [u8; 32],
    /// Timestamp of initialization
    pub timestamp: i64,
}

/// Event emitted when the authority tunes distribution parameters
#[event]
pub struct PolicyUpdated {
    pub policy: Pubkey,
    pub investor_fee_share_bps: u16,
    pub y0_total: u64,
    pub daily_cap_quote: u64,
    pub min_payout_lamports: u64,
    pub config_hash: [u8; 32],
    pub timestamp: i64,
}

/// Event emitted once the external fee position is bound to the engine
#[event]
pub struct HonoraryPositionInitialized {
    /// The pool address
    pub pool: Pubkey,
    /// The external fee position
    pub position: Pubkey,
    /// PDA that owns the position on behalf of the engine
    pub owner_pda: Pubkey,
    /// Quote mint bound to the position
    pub quote_mint: Pubkey,
    /// Timestamp of binding
    pub timestamp: i64,
}

/// Event emitted when a crank claimed quote fees from the bound position
#[event]
pub struct QuoteFeesClaimed {
    pub pool: Pubkey,
    pub position: Pubkey,
    /// Quote fees claimed by this call
    pub quote_claimed: u64,
    /// Quote fees claimed so far today
    pub claimed_today: u64,
    pub day: i64,
}

/// Event emitted for each committed page of investor payouts
#[event]
pub struct InvestorPayoutPage {
    /// Pool the page belongs to
    pub pool: Pubkey,
    /// Day key (floor(ts / 86400))
    pub day: i64,
    /// Cursor supplied by the caller
    pub page_cursor: u64,
    /// Number of investors in the page
    pub investor_count: u32,
    /// Total paid to investors in this page
    pub paid_total: u64,
    /// Shares below the dust threshold, kept in carry
    pub dust_total: u64,
    /// Carry after this page
    pub carry_after: u64,
}

/// Event emitted on day close when the remainder is routed to the creator
#[event]
pub struct CreatorPayoutDayClosed {
    pub pool: Pubkey,
    /// Day key that was closed
    pub day: i64,
    /// Remainder routed to the creator
    pub remainder: u64,
    /// Total distributed to investors on that day
    pub distributed_today: u64,
    /// Total claimed on that day
    pub claimed_today: u64,
}
