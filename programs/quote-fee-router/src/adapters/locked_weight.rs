use anchor_lang::prelude::*;
use anchor_spl::token::{accessor, ID as TOKEN_PROGRAM_ID};
use bytemuck::{Pod, Zeroable};
use crate::constants::{ACCOUNTS_PER_INVESTOR, MAX_PAGE_SIZE};
use crate::errors::ErrorCode;

/// Leading bytes of a stream account: the still-locked amount
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct LockedHeader {
    pub locked: u64,
}

/// Reads an investor's locked weight from its eligibility reference
pub trait LockedWeightReader {
    fn locked_weight(&self, reference: &AccountInfo) -> Result<u64>;
}

/// Reads the little-endian locked amount at the start of the account data
#[derive(Clone, Copy, Debug, Default)]
pub struct StreamHeaderReader;

impl LockedWeightReader for StreamHeaderReader {
    fn locked_weight(&self, reference: &AccountInfo) -> Result<u64> {
        let data = reference.try_borrow_data()?;
        Ok(decode_locked_weight(&data))
    }
}

/// Locked amount in `data`, or 0 when the header is missing
pub fn decode_locked_weight(data: &[u8]) -> u64 {
    let size = std::mem::size_of::<LockedHeader>();
    if data.len() < size {
        return 0;
    }
    match bytemuck::try_pod_read_unaligned::<LockedHeader>(&data[..size]) {
        Ok(header) => u64::from_le(header.locked),
        Err(_) => 0,
    }
}

/// One page of investors taken from the remaining accounts
#[derive(Debug)]
pub struct InvestorPage<'info> {
    /// Quote token accounts to pay, in page order
    pub destinations: Vec<AccountInfo<'info>>,
    /// Locked weight per destination
    pub weights: Vec<u64>,
}

/// Splits `(destination, eligibility)` pairs and reads each weight
pub fn parse_investor_page<'info, R: LockedWeightReader>(
    remaining: &[AccountInfo<'info>],
    quote_mint: &Pubkey,
    reader: &R,
) -> Result<InvestorPage<'info>> {
    require!(
        remaining.len() % ACCOUNTS_PER_INVESTOR == 0,
        ErrorCode::InvalidInvestorPage
    );
    let investor_count = remaining.len() / ACCOUNTS_PER_INVESTOR;
    require!(investor_count <= MAX_PAGE_SIZE, ErrorCode::InvalidInvestorPage);

    let mut destinations = Vec::with_capacity(investor_count);
    let mut weights = Vec::with_capacity(investor_count);
    for pair in remaining.chunks_exact(ACCOUNTS_PER_INVESTOR) {
        let destination = &pair[0];
        let eligibility = &pair[1];

        require!(destination.is_writable, ErrorCode::ConstraintViolation);
        require_keys_eq!(*destination.owner, TOKEN_PROGRAM_ID, ErrorCode::ConstraintViolation);
        require_keys_eq!(accessor::mint(destination)?, *quote_mint, ErrorCode::ConstraintViolation);

        weights.push(reader.locked_weight(eligibility)?);
        destinations.push(destination.clone());
    }

    Ok(InvestorPage {
        destinations,
        weights,
    })
}
