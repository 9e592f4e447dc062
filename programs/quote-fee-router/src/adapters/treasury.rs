use anchor_lang::prelude::*;
use anchor_spl::token::{self, accessor, Transfer};
use crate::constants::VAULT_SEED;
use crate::distribution::{PayoutTarget, QuoteTreasury};
use crate::errors::ErrorCode;

/// Treasury quote account spent by the vault authority PDA
pub struct VaultTreasury<'a, 'info> {
    pub token_program: &'a AccountInfo<'info>,
    pub treasury: &'a AccountInfo<'info>,
    pub vault_authority: &'a AccountInfo<'info>,
    pub creator: &'a AccountInfo<'info>,
    /// Investor payout destinations in page order
    pub investors: Vec<AccountInfo<'info>>,
    pub policy: Pubkey,
    pub vault_bump: u8,
}

impl<'a, 'info> VaultTreasury<'a, 'info> {
    fn destination(&self, target: PayoutTarget) -> Result<&AccountInfo<'info>> {
        match target {
            PayoutTarget::Investor(index) => self
                .investors
                .get(index)
                .ok_or(ErrorCode::InvalidInvestorPage.into()),
            PayoutTarget::Creator => Ok(self.creator),
        }
    }
}

impl<'a, 'info> QuoteTreasury for VaultTreasury<'a, 'info> {
    fn balance(&self) -> Result<u64> {
        accessor::amount(self.treasury)
    }

    fn transfer(&mut self, target: PayoutTarget, amount: u64) -> Result<()> {
        if amount == 0 {
            return Ok(());
        }
        let destination = self.destination(target)?.clone();
        let bump = [self.vault_bump];
        let seeds: &[&[u8]] = &[VAULT_SEED, self.policy.as_ref(), &bump];

        token::transfer(
            CpiContext::new_with_signer(
                self.token_program.clone(),
                Transfer {
                    from: self.treasury.clone(),
                    to: destination.clone(),
                    authority: self.vault_authority.clone(),
                },
                &[seeds],
            ),
            amount,
        )?;

        msg!("Transferred {} quote to {}", amount, destination.key);
        Ok(())
    }
}
