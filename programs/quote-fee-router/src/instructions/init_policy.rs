use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};
use crate::constants::{POLICY_SEED, VAULT_SEED};
use crate::errors::ErrorCode;
use crate::states::{CursorMode, Policy};

#[derive(Accounts)]
pub struct InitPolicy<'info> {
    /// Authority of the new policy, pays for the account
    #[account(mut)]
    pub authority: Signer<'info>,

    /// CHECK: Pool account, owner checked against the fee program
    pub pool: UncheckedAccount<'info>,

    /// Policy PDA for the pool
    #[account(
        init_if_needed,
        payer = authority,
        space = Policy::DISCRIMINATOR.len() + Policy::INIT_SPACE,
        seeds = [POLICY_SEED, pool.key().as_ref()],
        bump
    )]
    pub policy: Box<Account<'info, Policy>>,

    /// CHECK: cp-amm program that owns the pool and the fee position
    #[account(executable)]
    pub fee_program: UncheckedAccount<'info>,

    /// Quote mint, the only fee denomination distributed
    pub quote_mint: Box<Account<'info, Mint>>,

    /// Creator quote account receiving the day-end remainder
    pub creator_quote_ata: Box<Account<'info, TokenAccount>>,

    /// Treasury quote account, must be owned by the vault authority
    pub treasury_quote_ata: Box<Account<'info, TokenAccount>>,

    /// CHECK: Vault authority PDA that signs treasury transfers
    #[account(
        seeds = [VAULT_SEED, policy.key().as_ref()],
        bump
    )]
    pub vault_authority: UncheckedAccount<'info>,

    pub token_program: Program<'info, Token>,

    pub system_program: Program<'info, System>,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct InitPolicyArgs {
    /// Investor fee share in basis points (max 10000)
    pub investor_fee_share_bps: u16,
    /// Total investor allocation weight (Y0), must be non-zero
    pub y0_total: u64,
    /// Daily cap in quote lamports (0 = no cap)
    pub daily_cap_quote: u64,
    /// Dust threshold in quote lamports
    pub min_payout_lamports: u64,
    /// Cursor strictness, monotonic when omitted
    pub cursor_mode: Option<CursorMode>,
}

impl<'info> InitPolicy<'info> {
    pub fn handle(ctx: Context<InitPolicy>, args: InitPolicyArgs) -> Result<()> {
        msg!("Initializing policy for pool: {}", ctx.accounts.pool.key());

        require!(!ctx.accounts.policy.initialized, ErrorCode::ConstraintViolation);
        Policy::validate_distribution(args.investor_fee_share_bps, args.y0_total)?;

        require_keys_eq!(
            *ctx.accounts.pool.owner,
            ctx.accounts.fee_program.key(),
            ErrorCode::ConstraintViolation
        );

        validate_token_destinations(
            &ctx.accounts.quote_mint.key(),
            &ctx.accounts.creator_quote_ata.mint,
            &ctx.accounts.treasury_quote_ata.mint,
            &ctx.accounts.treasury_quote_ata.owner,
            &ctx.accounts.vault_authority.key(),
        )?;

        let policy_key = ctx.accounts.policy.key();
        let policy = &mut ctx.accounts.policy;
        policy.authority = ctx.accounts.authority.key();
        policy.pool = ctx.accounts.pool.key();
        policy.quote_mint = ctx.accounts.quote_mint.key();
        policy.creator_quote_ata = ctx.accounts.creator_quote_ata.key();
        policy.treasury_quote_ata = ctx.accounts.treasury_quote_ata.key();
        policy.fee_program = ctx.accounts.fee_program.key();
        policy.honorary_position = Pubkey::default();
        policy.investor_fee_share_bps = args.investor_fee_share_bps;
        policy.y0_total = args.y0_total;
        policy.daily_cap_quote = args.daily_cap_quote;
        policy.min_payout_lamports = args.min_payout_lamports;
        policy.cursor_mode = args.cursor_mode.unwrap_or_default();
        policy.bump = ctx.bumps.policy;
        policy.vault_bump = ctx.bumps.vault_authority;
        policy.initialized = true;

        msg!("Investor fee share: {} bps", policy.investor_fee_share_bps);
        msg!("Y0 total: {}", policy.y0_total);
        msg!("Daily cap: {} (0 = uncapped)", policy.daily_cap_quote);
        msg!("Min payout: {}", policy.min_payout_lamports);
        msg!("Cursor mode: {:?}", policy.cursor_mode);

        emit!(crate::events::PolicyInitialized {
            policy: policy_key,
            pool: policy.pool,
            quote_mint: policy.quote_mint,
            config_hash: policy.config_hash(),
            timestamp: Clock::get()?.unix_timestamp,
        });

        Ok(())
    }
}

/// Both destinations must hold the quote mint and the treasury must belong to the vault authority
pub fn validate_token_destinations(
    quote_mint: &Pubkey,
    creator_mint: &Pubkey,
    treasury_mint: &Pubkey,
    treasury_owner: &Pubkey,
    vault_authority: &Pubkey,
) -> Result<()> {
    require_keys_eq!(*creator_mint, *quote_mint, ErrorCode::ConstraintViolation);
    require_keys_eq!(*treasury_mint, *quote_mint, ErrorCode::ConstraintViolation);
    require_keys_eq!(*treasury_owner, *vault_authority, ErrorCode::ConstraintViolation);
    Ok(())
}
