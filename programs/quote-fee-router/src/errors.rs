use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    #[msg("Quote-only guarantee violated by pool, position or claim result")]
    QuoteOnlyViolation,
    #[msg("Daily window not ready - day already closed")]
    DailyWindowNotReady,
    #[msg("Invalid investor page - cursor not monotonic or page malformed")]
    InvalidInvestorPage,
    #[msg("Distribution would exceed the daily cap or the investor pool")]
    CapExceeded,
    #[msg("Math overflow occurred during calculation")]
    ArithmeticOverflow,
    #[msg("Configuration or account relationship mismatch")]
    ConstraintViolation,
    #[msg("Signer is not the policy authority")]
    Unauthorized,
    #[msg("Treasury balance does not cover the planned payouts")]
    InsufficientTreasuryBalance,
}
