use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::{AccountMeta, Instruction};
use anchor_lang::solana_program::program::invoke_signed;
use anchor_spl::token::accessor;
use crate::constants::{CLAIM_POSITION_FEE_DISCRIMINATOR, FEE_POS_OWNER_SEED, VAULT_SEED};
use crate::distribution::{ClaimedFees, FeeClaimAdapter};
use crate::errors::ErrorCode;

/// Accounts of the cp-amm `claim_position_fee` instruction
pub struct CpAmmClaimAccounts<'a, 'info> {
    pub cp_amm_program: &'a AccountInfo<'info>,
    pub pool_authority: &'a AccountInfo<'info>,
    pub pool: &'a AccountInfo<'info>,
    pub position: &'a AccountInfo<'info>,
    /// Treasury quote account receiving the quote side
    pub quote_destination: &'a AccountInfo<'info>,
    /// Token account receiving the base side; any inflow fails the crank
    pub base_destination: &'a AccountInfo<'info>,
    pub token_a_vault: &'a AccountInfo<'info>,
    pub token_b_vault: &'a AccountInfo<'info>,
    pub token_a_mint: &'a AccountInfo<'info>,
    pub token_b_mint: &'a AccountInfo<'info>,
    pub position_nft_account: &'a AccountInfo<'info>,
    /// Position owner PDA signing the claim
    pub owner: &'a AccountInfo<'info>,
    pub token_a_program: &'a AccountInfo<'info>,
    pub token_b_program: &'a AccountInfo<'info>,
    pub event_authority: &'a AccountInfo<'info>,
}

/// Claims position fees through cp-amm and reports them as balance deltas
pub struct CpAmmFeeClaimer<'a, 'info> {
    pub accounts: CpAmmClaimAccounts<'a, 'info>,
    pub policy: Pubkey,
    pub quote_mint: Pubkey,
    pub owner_bump: u8,
}

impl<'a, 'info> CpAmmFeeClaimer<'a, 'info> {
    /// True when the quote mint is the pool's token B
    fn quote_is_token_b(&self) -> Result<bool> {
        if *self.accounts.token_b_mint.key == self.quote_mint {
            Ok(true)
        } else if *self.accounts.token_a_mint.key == self.quote_mint {
            Ok(false)
        } else {
            err!(ErrorCode::QuoteOnlyViolation)
        }
    }

    fn invoke_claim(&self, quote_is_b: bool) -> Result<()> {
        let accounts = &self.accounts;
        let (token_a_account, token_b_account) = if quote_is_b {
            (accounts.base_destination, accounts.quote_destination)
        } else {
            (accounts.quote_destination, accounts.base_destination)
        };

        let metas = vec![
            AccountMeta::new_readonly(*accounts.pool_authority.key, false),
            AccountMeta::new(*accounts.pool.key, false),
            AccountMeta::new(*accounts.position.key, false),
            AccountMeta::new(*token_a_account.key, false),
            AccountMeta::new(*token_b_account.key, false),
            AccountMeta::new(*accounts.token_a_vault.key, false),
            AccountMeta::new(*accounts.token_b_vault.key, false),
            AccountMeta::new_readonly(*accounts.token_a_mint.key, false),
            AccountMeta::new_readonly(*accounts.token_b_mint.key, false),
            AccountMeta::new_readonly(*accounts.position_nft_account.key, false),
            AccountMeta::new_readonly(*accounts.owner.key, true),
            AccountMeta::new_readonly(*accounts.token_a_program.key, false),
            AccountMeta::new_readonly(*accounts.token_b_program.key, false),
            AccountMeta::new_readonly(*accounts.event_authority.key, false),
            AccountMeta::new_readonly(*accounts.cp_amm_program.key, false),
        ];

        let ix = Instruction {
            program_id: *accounts.cp_amm_program.key,
            accounts: metas,
            data: CLAIM_POSITION_FEE_DISCRIMINATOR.to_vec(),
        };

        let account_infos = [
            accounts.pool_authority.clone(),
            accounts.pool.clone(),
            accounts.position.clone(),
            token_a_account.clone(),
            token_b_account.clone(),
            accounts.token_a_vault.clone(),
            accounts.token_b_vault.clone(),
            accounts.token_a_mint.clone(),
            accounts.token_b_mint.clone(),
            accounts.position_nft_account.clone(),
            accounts.owner.clone(),
            accounts.token_a_program.clone(),
            accounts.token_b_program.clone(),
            accounts.event_authority.clone(),
            accounts.cp_amm_program.clone(),
        ];

        let bump = [self.owner_bump];
        let seeds: &[&[u8]] = &[VAULT_SEED, self.policy.as_ref(), FEE_POS_OWNER_SEED, &bump];
        invoke_signed(&ix, &account_infos, &[seeds])?;
        Ok(())
    }
}

impl<'a, 'info> FeeClaimAdapter for CpAmmFeeClaimer<'a, 'info> {
    fn claim(&mut self, position: &Pubkey) -> Result<ClaimedFees> {
        require_keys_eq!(*self.accounts.position.key, *position, ErrorCode::ConstraintViolation);
        let quote_is_b = self.quote_is_token_b()?;

        let quote_before = accessor::amount(self.accounts.quote_destination)?;
        let base_before = accessor::amount(self.accounts.base_destination)?;

        msg!("Claiming position fees via cp-amm for position: {}", position);
        self.invoke_claim(quote_is_b)?;

        let quote_after = accessor::amount(self.accounts.quote_destination)?;
        let base_after = accessor::amount(self.accounts.base_destination)?;

        Ok(ClaimedFees {
            quote: quote_after
                .checked_sub(quote_before)
                .ok_or(ErrorCode::ArithmeticOverflow)?,
            base: base_after
                .checked_sub(base_before)
                .ok_or(ErrorCode::ArithmeticOverflow)?,
        })
    }
}
