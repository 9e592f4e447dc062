// PDA Seeds
pub const VAULT_SEED: &[u8] = b"vault";
pub const POLICY_SEED: &[u8] = b"policy";
pub const PROGRESS_SEED: &[u8] = b"progress";
pub const POSITION_SEED: &[u8] = b"position";
pub const FEE_POS_OWNER_SEED: &[u8] = b"investor_fee_pos_owner";

// sha256("global:claim_position_fee")[..8]
pub const CLAIM_POSITION_FEE_DISCRIMINATOR: [u8; 8] = [180, 38, 154, 17, 133, 33, 162, 211];

// Fee distribution constants
pub const BPS_DENOMINATOR: u64 = 10_000;
pub const MAX_INVESTOR_FEE_SHARE_BPS: u16 = 10_000; // 100% maximum
pub const SECONDS_PER_DAY: i64 = 86_400;

// Pagination
pub const MAX_PAGE_SIZE: usize = 16; // investors per crank call
pub const ACCOUNTS_PER_INVESTOR: usize = 2; // payout ATA + eligibility reference
