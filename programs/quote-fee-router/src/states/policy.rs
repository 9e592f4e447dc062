use anchor_lang::prelude::*;
use anchor_lang::solana_program::hash::hashv;
use crate::constants::{FEE_POS_OWNER_SEED, MAX_INVESTOR_FEE_SHARE_BPS, VAULT_SEED};
use crate::errors::ErrorCode;

/// How strictly the crank validates the caller-supplied page cursor
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, InitSpace)]
pub enum CursorMode {
    /// Any cursor strictly greater than the last committed one
    #[default]
    Monotonic,
    /// First page of the day is 0, then exactly previous + 1
    Sequential,
}

/// Distribution policy bound to a single pool
#[account]
#[derive(InitSpace, Debug, Default, PartialEq, Eq)]
pub struct Policy {
    /// Authority allowed to tune distribution parameters
    pub authority: Pubkey,
    /// cp-amm pool whose fees are routed
    pub pool: Pubkey,
    /// Quote mint, the only accepted fee denomination
    pub quote_mint: Pubkey,
    /// Creator quote token account receiving the day-end remainder
    pub creator_quote_ata: Pubkey,
    /// Treasury quote token account owned by the vault authority PDA
    pub treasury_quote_ata: Pubkey,
    /// Program that owns the pool and the fee position
    pub fee_program: Pubkey,
    /// External fee position bound by the binder (default until bound)
    pub honorary_position: Pubkey,
    /// Investor fee share in basis points
    pub investor_fee_share_bps: u16,
    /// Total investor allocation weight (Y0)
    pub y0_total: u64,
    /// Daily distribution cap in quote lamports (0 = no cap)
    pub daily_cap_quote: u64,
    /// Dust threshold; smaller shares stay in carry
    pub min_payout_lamports: u64,
    /// Page cursor validation strictness
    pub cursor_mode: CursorMode,
    /// Bump seed for the policy PDA
    pub bump: u8,
    /// Bump seed for the vault authority PDA
    pub vault_bump: u8,
    /// Sticky once set by init_policy
    pub initialized: bool,
}

/// Authority-tunable parameters; `None` keeps the current value
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PolicyUpdate {
    pub investor_fee_share_bps: Option<u16>,
    pub y0_total: Option<u64>,
    pub daily_cap_quote: Option<u64>,
    pub min_payout_lamports: Option<u64>,
    pub cursor_mode: Option<CursorMode>,
}

impl Policy {
    /// Validates the parameters the crank math depends on
    pub fn validate_distribution(investor_fee_share_bps: u16, y0_total: u64) -> Result<()> {
        require!(
            investor_fee_share_bps <= MAX_INVESTOR_FEE_SHARE_BPS,
            ErrorCode::ConstraintViolation
        );
        require!(y0_total > 0, ErrorCode::ConstraintViolation);
        Ok(())
    }

    /// Vault authority PDA that owns the treasury
    pub fn vault_authority(policy: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
        Pubkey::find_program_address(&[VAULT_SEED, policy.as_ref()], program_id)
    }

    /// PDA that owns the honorary fee position
    pub fn position_owner(policy: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
        Pubkey::find_program_address(&[VAULT_SEED, policy.as_ref(), FEE_POS_OWNER_SEED], program_id)
    }

    pub fn is_position_bound(&self) -> bool {
        self.honorary_position != Pubkey::default()
    }

    /// Applies an authority update. Binding fields are never touched.
    pub fn apply_update(&mut self, update: &PolicyUpdate) -> Result<()> {
        require!(self.initialized, ErrorCode::ConstraintViolation);

        let share_bps = update.investor_fee_share_bps.unwrap_or(self.investor_fee_share_bps);
        let y0_total = update.y0_total.unwrap_or(self.y0_total);
        Self::validate_distribution(share_bps, y0_total)?;

        self.investor_fee_share_bps = share_bps;
        self.y0_total = y0_total;
        if let Some(cap) = update.daily_cap_quote {
            self.daily_cap_quote = cap;
        }
        if let Some(min_payout) = update.min_payout_lamports {
            self.min_payout_lamports = min_payout;
        }
        if let Some(mode) = update.cursor_mode {
            self.cursor_mode = mode;
        }
        Ok(())
    }

    /// SHA-256 over binding and distribution parameters, emitted for audit
    pub fn config_hash(&self) -> [u8; 32] {
        hashv(&[
            self.pool.as_ref(),
            self.quote_mint.as_ref(),
            self.creator_quote_ata.as_ref(),
            self.treasury_quote_ata.as_ref(),
            &self.investor_fee_share_bps.to_le_bytes(),
            &self.y0_total.to_le_bytes(),
            &self.daily_cap_quote.to_le_bytes(),
            &self.min_payout_lamports.to_le_bytes(),
        ])
        .to_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn initialized_policy() -> Policy {
        Policy {
            authority: Pubkey::new_unique(),
            pool: Pubkey::new_unique(),
            quote_mint: Pubkey::new_unique(),
            investor_fee_share_bps: 2_000,
            y0_total: 1_000_000,
            initialized: true,
            ..Policy::default()
        }
    }

    #[test]
    fn rejects_share_above_full_basis() {
        assert!(Policy::validate_distribution(10_000, 1).is_ok());
        assert_eq!(
            Policy::validate_distribution(10_001, 1).unwrap_err(),
            ErrorCode::ConstraintViolation.into()
        );
    }

    #[test]
    fn rejects_zero_y0() {
        assert_eq!(
            Policy::validate_distribution(2_000, 0).unwrap_err(),
            ErrorCode::ConstraintViolation.into()
        );
    }

    #[test]
    fn update_keeps_binding_fields() {
        let mut policy = initialized_policy();
        let before = policy.clone();

        policy
            .apply_update(&PolicyUpdate {
                investor_fee_share_bps: Some(5_000),
                daily_cap_quote: Some(42),
                cursor_mode: Some(CursorMode::Sequential),
                ..PolicyUpdate::default()
            })
            .unwrap();

        assert_eq!(policy.investor_fee_share_bps, 5_000);
        assert_eq!(policy.daily_cap_quote, 42);
        assert_eq!(policy.cursor_mode, CursorMode::Sequential);
        assert_eq!(policy.y0_total, before.y0_total);
        assert_eq!(policy.authority, before.authority);
        assert_eq!(policy.pool, before.pool);
        assert_eq!(policy.quote_mint, before.quote_mint);
    }

    #[test]
    fn invalid_update_leaves_policy_untouched() {
        let mut policy = initialized_policy();
        let before = policy.clone();

        let err = policy
            .apply_update(&PolicyUpdate {
                investor_fee_share_bps: Some(12_000),
                daily_cap_quote: Some(7),
                ..PolicyUpdate::default()
            })
            .unwrap_err();

        assert_eq!(err, ErrorCode::ConstraintViolation.into());
        assert_eq!(policy, before);
    }

    #[test]
    fn config_hash_tracks_distribution_parameters() {
        let mut policy = initialized_policy();
        let original = policy.config_hash();
        assert_eq!(original, policy.config_hash());

        policy.min_payout_lamports = 1;
        assert_ne!(original, policy.config_hash());
    }
}
