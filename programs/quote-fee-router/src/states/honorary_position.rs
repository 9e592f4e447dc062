use anchor_lang::prelude::*;
use crate::errors::ErrorCode;
use crate::states::Policy;

/// Binding between an external fee position and the engine's owner PDA
#[account]
#[derive(InitSpace, Debug, Default, PartialEq, Eq)]
pub struct HonoraryPosition {
    /// Policy the position routes fees for
    pub policy: Pubkey,
    /// PDA owning the position on behalf of the engine
    pub owner_pda: Pubkey,
    /// External fee position
    pub position: Pubkey,
    /// Pool the position belongs to
    pub pool: Pubkey,
    /// Quote mint fees are accrued in
    pub quote_mint: Pubkey,
    /// Timestamp of binding
    pub bound_at: i64,
    /// Bump seed for the PDA
    pub bump: u8,
}

impl HonoraryPosition {
    pub fn is_bound(&self) -> bool {
        self.position != Pubkey::default()
    }

    /// Checks that a new binding is allowed for this record and policy
    pub fn validate_binding(
        &self,
        policy: &Policy,
        pool: &Pubkey,
        quote_mint: &Pubkey,
    ) -> Result<()> {
        require!(policy.initialized, ErrorCode::ConstraintViolation);
        require_keys_eq!(policy.pool, *pool, ErrorCode::ConstraintViolation);
        require_keys_eq!(policy.quote_mint, *quote_mint, ErrorCode::ConstraintViolation);
        require!(!policy.is_position_bound(), ErrorCode::ConstraintViolation);
        require!(!self.is_bound(), ErrorCode::ConstraintViolation);
        Ok(())
    }

    /// Writes the binding. Callers validate first.
    pub fn bind(
        &mut self,
        policy_key: Pubkey,
        policy: &Policy,
        owner_pda: Pubkey,
        position: Pubkey,
        bound_at: i64,
        bump: u8,
    ) {
        self.policy = policy_key;
        self.owner_pda = owner_pda;
        self.position = position;
        self.pool = policy.pool;
        self.quote_mint = policy.quote_mint;
        self.bound_at = bound_at;
        self.bump = bump;
    }
}
