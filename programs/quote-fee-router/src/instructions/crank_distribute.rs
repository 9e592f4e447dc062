use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};
use crate::adapters::{parse_investor_page, CpAmmClaimAccounts, CpAmmFeeClaimer, StreamHeaderReader, VaultTreasury};
use crate::constants::{FEE_POS_OWNER_SEED, POLICY_SEED, POSITION_SEED, PROGRESS_SEED, VAULT_SEED};
use crate::distribution::{run_crank, CrankRequest};
use crate::errors::ErrorCode;
use crate::states::{HonoraryPosition, Policy, Progress};

/// Permissionless crank: claims quote fees and pays one page of investors.
/// Remaining accounts are `(investor quote ATA, eligibility reference)` pairs.
#[derive(Accounts)]
pub struct CrankDistribute<'info> {
    /// Anyone; pays rent for the progress account on first use
    #[account(mut)]
    pub payer: Signer<'info>,

    /// CHECK: cp-amm pool, owner checked against the policy's fee program
    #[account(mut)]
    pub pool: UncheckedAccount<'info>,

    #[account(
        seeds = [POLICY_SEED, pool.key().as_ref()],
        bump = policy.bump
    )]
    pub policy: Box<Account<'info, Policy>>,

    /// Per-day progress, created on the first crank for the pool
    #[account(
        init_if_needed,
        payer = payer,
        space = Progress::DISCRIMINATOR.len() + Progress::INIT_SPACE,
        seeds = [PROGRESS_SEED, pool.key().as_ref()],
        bump
    )]
    pub progress: Box<Account<'info, Progress>>,

    #[account(
        seeds = [POSITION_SEED, position.key().as_ref()],
        bump = honorary_position.bump,
        constraint = honorary_position.policy == policy.key() @ ErrorCode::ConstraintViolation
    )]
    pub honorary_position: Box<Account<'info, HonoraryPosition>>,

    /// CHECK: Bound fee position
    #[account(
        mut,
        address = policy.honorary_position @ ErrorCode::ConstraintViolation
    )]
    pub position: UncheckedAccount<'info>,

    /// CHECK: Position owner PDA, signs the fee claim
    #[account(
        seeds = [VAULT_SEED, policy.key().as_ref(), FEE_POS_OWNER_SEED],
        bump,
        address = honorary_position.owner_pda @ ErrorCode::ConstraintViolation
    )]
    pub position_owner: UncheckedAccount<'info>,

    /// CHECK: Vault authority PDA, signs treasury transfers
    #[account(
        seeds = [VAULT_SEED, policy.key().as_ref()],
        bump = policy.vault_bump
    )]
    pub vault_authority: UncheckedAccount<'info>,

    /// Treasury receiving the claimed quote and funding payouts
    #[account(
        mut,
        address = policy.treasury_quote_ata @ ErrorCode::ConstraintViolation
    )]
    pub treasury_quote_ata: Box<Account<'info, TokenAccount>>,

    /// Base-side claim destination; any inflow here aborts the crank
    #[account(
        mut,
        token::authority = vault_authority,
        constraint = base_fee_ata.mint != policy.quote_mint @ ErrorCode::ConstraintViolation
    )]
    pub base_fee_ata: Box<Account<'info, TokenAccount>>,

    /// Creator destination for the day-end remainder
    #[account(
        mut,
        address = policy.creator_quote_ata @ ErrorCode::ConstraintViolation
    )]
    pub creator_quote_ata: Box<Account<'info, TokenAccount>>,

    /// CHECK: cp-amm program
    #[account(address = policy.fee_program @ ErrorCode::ConstraintViolation)]
    pub cp_amm_program: UncheckedAccount<'info>,

    /// CHECK: cp-amm pool authority
    pub pool_authority: UncheckedAccount<'info>,

    /// CHECK: Pool token A vault
    #[account(mut)]
    pub token_a_vault: UncheckedAccount<'info>,

    /// CHECK: Pool token B vault
    #[account(mut)]
    pub token_b_vault: UncheckedAccount<'info>,

    /// CHECK: Pool token A mint
    pub token_a_mint: UncheckedAccount<'info>,

    /// CHECK: Pool token B mint
    pub token_b_mint: UncheckedAccount<'info>,

    /// CHECK: Position NFT account held by the position owner
    pub position_nft_account: UncheckedAccount<'info>,

    /// CHECK: cp-amm event authority
    pub event_authority: UncheckedAccount<'info>,

    pub token_program: Program<'info, Token>,

    pub system_program: Program<'info, System>,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct CrankArgs {
    /// Caller-chosen page cursor, validated per the policy's cursor mode
    pub page_cursor: u64,
    /// Flushes the carry to the creator and closes the day
    pub is_last_page: bool,
}

impl<'info> CrankDistribute<'info> {
    pub fn handle(
        ctx: Context<'_, '_, 'info, 'info, CrankDistribute<'info>>,
        args: CrankArgs,
    ) -> Result<()> {
        let now = Clock::get()?.unix_timestamp;
        let pool_key = ctx.accounts.pool.key();
        let policy_key = ctx.accounts.policy.key();
        let position_key = ctx.accounts.position.key();
        let policy: Policy = (**ctx.accounts.policy).clone();

        msg!("Crank for pool: {} - Page cursor: {}", pool_key, args.page_cursor);
        msg!("Day {} state: {:?}", ctx.accounts.progress.current_day, ctx.accounts.progress.day_state());

        require_keys_eq!(
            *ctx.accounts.pool.owner,
            policy.fee_program,
            ErrorCode::QuoteOnlyViolation
        );

        let progress = &mut ctx.accounts.progress;
        if progress.pool == Pubkey::default() {
            progress.pool = pool_key;
            progress.bump = ctx.bumps.progress;
            msg!("Progress account initialized for pool");
        }
        require_keys_eq!(progress.pool, pool_key, ErrorCode::ConstraintViolation);

        let page = parse_investor_page(ctx.remaining_accounts, &policy.quote_mint, &StreamHeaderReader)?;
        msg!("Investors in page: {}", page.weights.len());
        let request = CrankRequest {
            now,
            page_cursor: args.page_cursor,
            is_last_page: args.is_last_page,
            weights: page.weights,
        };

        let pool = ctx.accounts.pool.to_account_info();
        let position = ctx.accounts.position.to_account_info();
        let position_owner = ctx.accounts.position_owner.to_account_info();
        let vault_authority = ctx.accounts.vault_authority.to_account_info();
        let treasury = ctx.accounts.treasury_quote_ata.to_account_info();
        let base_fee_ata = ctx.accounts.base_fee_ata.to_account_info();
        let creator = ctx.accounts.creator_quote_ata.to_account_info();
        let cp_amm_program = ctx.accounts.cp_amm_program.to_account_info();
        let pool_authority = ctx.accounts.pool_authority.to_account_info();
        let token_a_vault = ctx.accounts.token_a_vault.to_account_info();
        let token_b_vault = ctx.accounts.token_b_vault.to_account_info();
        let token_a_mint = ctx.accounts.token_a_mint.to_account_info();
        let token_b_mint = ctx.accounts.token_b_mint.to_account_info();
        let position_nft_account = ctx.accounts.position_nft_account.to_account_info();
        let event_authority = ctx.accounts.event_authority.to_account_info();
        let token_program = ctx.accounts.token_program.to_account_info();

        let mut claimer = CpAmmFeeClaimer {
            accounts: CpAmmClaimAccounts {
                cp_amm_program: &cp_amm_program,
                pool_authority: &pool_authority,
                pool: &pool,
                position: &position,
                quote_destination: &treasury,
                base_destination: &base_fee_ata,
                token_a_vault: &token_a_vault,
                token_b_vault: &token_b_vault,
                token_a_mint: &token_a_mint,
                token_b_mint: &token_b_mint,
                position_nft_account: &position_nft_account,
                owner: &position_owner,
                token_a_program: &token_program,
                token_b_program: &token_program,
                event_authority: &event_authority,
            },
            policy: policy_key,
            quote_mint: policy.quote_mint,
            owner_bump: ctx.bumps.position_owner,
        };
        let mut vault = VaultTreasury {
            token_program: &token_program,
            treasury: &treasury,
            vault_authority: &vault_authority,
            creator: &creator,
            investors: page.destinations,
            policy: policy_key,
            vault_bump: policy.vault_bump,
        };

        let plan = run_crank(
            &policy,
            progress,
            &position_key,
            &mut claimer,
            &mut vault,
            &request,
        )?;

        if let Some(stale) = plan.rolled_over {
            msg!("Day {} rolled over unclosed - Creator remainder: {}", stale.day, stale.remainder);
            emit!(crate::events::CreatorPayoutDayClosed {
                pool: pool_key,
                day: stale.day,
                remainder: stale.remainder,
                distributed_today: stale.distributed_today,
                claimed_today: stale.claimed_today,
            });
        }

        if plan.page.quote_claimed > 0 {
            emit!(crate::events::QuoteFeesClaimed {
                pool: pool_key,
                position: position_key,
                quote_claimed: plan.page.quote_claimed,
                claimed_today: plan.next.claimed_quote_today,
                day: plan.page.day,
            });
        }

        msg!("Page paid: {} - Dust: {} - Carry: {}", plan.page.paid_total, plan.page.dust_total, plan.page.carry_after);
        emit!(crate::events::InvestorPayoutPage {
            pool: pool_key,
            day: plan.page.day,
            page_cursor: plan.page.page_cursor,
            investor_count: plan.page.investor_count,
            paid_total: plan.page.paid_total,
            dust_total: plan.page.dust_total,
            carry_after: plan.page.carry_after,
        });

        if let Some(close) = plan.day_close {
            msg!("Day {} closed - Creator remainder: {}", close.day, close.remainder);
            msg!("Distributed today: {} of {} claimed", close.distributed_today, close.claimed_today);
            emit!(crate::events::CreatorPayoutDayClosed {
                pool: pool_key,
                day: close.day,
                remainder: close.remainder,
                distributed_today: close.distributed_today,
                claimed_today: close.claimed_today,
            });
        }

        Ok(())
    }
}
