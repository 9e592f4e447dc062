use std::cell::RefCell;
use std::rc::Rc;

use anchor_lang::prelude::*;
use quote_fee_router::distribution::{
    run_crank, ClaimedFees, CrankRequest, FeeClaimAdapter, PayoutTarget, QuoteTreasury,
};
use quote_fee_router::errors::ErrorCode;
use quote_fee_router::states::{Policy, Progress};

const DAY: i64 = 86_400;
const START: i64 = 19_675 * DAY + 600;

/// In-memory token balances shared by the mock position and treasury
#[derive(Debug, Default)]
struct Ledger {
    accrued_quote: u64,
    accrued_base: u64,
    /// Quote the position reports without moving it to the treasury
    phantom_quote: u64,
    treasury: u64,
    base_account: u64,
    creator: u64,
    investors: Vec<u64>,
    /// Ledger index of the first investor in the page being paid
    page_offset: usize,
    transfers: Vec<(PayoutTarget, u64)>,
    claims: u32,
}

struct MockPosition(Rc<RefCell<Ledger>>);

impl FeeClaimAdapter for MockPosition {
    fn claim(&mut self, _position: &Pubkey) -> Result<ClaimedFees> {
        let mut ledger = self.0.borrow_mut();
        ledger.claims += 1;
        let quote = ledger.accrued_quote;
        let base = ledger.accrued_base;
        ledger.treasury += quote;
        ledger.base_account += base;
        ledger.accrued_quote = 0;
        ledger.accrued_base = 0;
        Ok(ClaimedFees {
            quote: quote + std::mem::take(&mut ledger.phantom_quote),
            base,
        })
    }
}

struct MockTreasury(Rc<RefCell<Ledger>>);

impl QuoteTreasury for MockTreasury {
    fn balance(&self) -> Result<u64> {
        Ok(self.0.borrow().treasury)
    }

    fn transfer(&mut self, target: PayoutTarget, amount: u64) -> Result<()> {
        let mut ledger = self.0.borrow_mut();
        require!(
            ledger.treasury >= amount,
            ErrorCode::InsufficientTreasuryBalance
        );
        ledger.treasury -= amount;
        match target {
            PayoutTarget::Investor(index) => {
                let slot = ledger.page_offset + index;
                ledger.investors[slot] += amount
            }
            PayoutTarget::Creator => ledger.creator += amount,
        }
        ledger.transfers.push((target, amount));
        Ok(())
    }
}

struct Harness {
    policy: Policy,
    progress: Progress,
    ledger: Rc<RefCell<Ledger>>,
    claimer: MockPosition,
    treasury: MockTreasury,
}

impl Harness {
    fn new(bps: u16, y0: u64, cap: u64, min_payout: u64, investors: usize) -> Self {
        let pool = Pubkey::new_unique();
        let policy = Policy {
            authority: Pubkey::new_unique(),
            pool,
            quote_mint: Pubkey::new_unique(),
            creator_quote_ata: Pubkey::new_unique(),
            treasury_quote_ata: Pubkey::new_unique(),
            honorary_position: Pubkey::new_unique(),
            investor_fee_share_bps: bps,
            y0_total: y0,
            daily_cap_quote: cap,
            min_payout_lamports: min_payout,
            initialized: true,
            ..Policy::default()
        };
        let ledger = Rc::new(RefCell::new(Ledger {
            investors: vec![0; investors],
            ..Ledger::default()
        }));
        Self {
            policy,
            progress: Progress {
                pool,
                ..Progress::default()
            },
            claimer: MockPosition(ledger.clone()),
            treasury: MockTreasury(ledger.clone()),
            ledger,
        }
    }

    fn accrue(&self, quote: u64, base: u64) {
        let mut ledger = self.ledger.borrow_mut();
        ledger.accrued_quote += quote;
        ledger.accrued_base += base;
    }

    fn crank(&mut self, now: i64, cursor: u64, last: bool, weights: Vec<u64>) -> Result<()> {
        self.crank_page(now, cursor, last, 0, weights)
    }

    /// Cranks a page whose first investor sits at `first_investor` in the ledger
    fn crank_page(
        &mut self,
        now: i64,
        cursor: u64,
        last: bool,
        first_investor: usize,
        weights: Vec<u64>,
    ) -> Result<()> {
        self.ledger.borrow_mut().page_offset = first_investor;
        let position = self.policy.honorary_position;
        run_crank(
            &self.policy,
            &mut self.progress,
            &position,
            &mut self.claimer,
            &mut self.treasury,
            &CrankRequest {
                now,
                page_cursor: cursor,
                is_last_page: last,
                weights,
            },
        )
        .map(|_| ())
    }
}

#[test]
fn full_weight_investor_and_creator_remainder() {
    let mut harness = Harness::new(2_000, 1_000_000, 0, 0, 1);
    harness.accrue(500_000, 0);

    harness.crank(START, 0, true, vec![1_000_000]).unwrap();

    let ledger = harness.ledger.borrow();
    assert_eq!(ledger.investors[0], 100_000);
    assert_eq!(ledger.creator, 400_000);
    assert_eq!(ledger.treasury, 0);
    assert_eq!(harness.progress.distributed_quote_today, 100_000);
    assert_eq!(harness.progress.carry_quote_today, 0);
    assert!(harness.progress.day_closed);
}

#[test]
fn unmatched_first_page_flushes_everything_on_last_page() {
    let mut harness = Harness::new(2_000, 1_000_000, 0, 0, 1);
    harness.accrue(500_000, 0);

    harness.crank(START, 0, false, vec![0]).unwrap();
    assert_eq!(harness.progress.carry_quote_today, 500_000);
    assert_eq!(harness.progress.distributed_quote_today, 0);
    assert!(!harness.progress.day_closed);
    assert_eq!(harness.ledger.borrow().treasury, 500_000);

    harness.crank(START + 60, 1, true, vec![]).unwrap();
    assert_eq!(harness.progress.carry_quote_today, 0);
    assert!(harness.progress.day_closed);
    let ledger = harness.ledger.borrow();
    assert_eq!(ledger.creator, 500_000);
    assert_eq!(ledger.investors[0], 0);
    assert_eq!(ledger.treasury, 0);
}

#[test]
fn replayed_page_changes_nothing() {
    let mut harness = Harness::new(5_000, 100, 0, 0, 2);
    harness.accrue(10_000, 0);
    harness.crank(START, 4, false, vec![50, 50]).unwrap();

    let progress_before = harness.progress.clone();
    let transfers_before = harness.ledger.borrow().transfers.len();
    let claims_before = harness.ledger.borrow().claims;
    harness.accrue(2_000, 0);

    for cursor in [0, 4] {
        let err = harness.crank(START + 5, cursor, false, vec![50, 50]).unwrap_err();
        assert_eq!(err, ErrorCode::InvalidInvestorPage.into());
    }

    assert_eq!(harness.progress, progress_before);
    let ledger = harness.ledger.borrow();
    assert_eq!(ledger.transfers.len(), transfers_before);
    assert_eq!(ledger.claims, claims_before);
    assert_eq!(ledger.accrued_quote, 2_000);
}

#[test]
fn base_accrual_aborts_without_transfers() {
    let mut harness = Harness::new(2_000, 1_000_000, 0, 0, 1);
    harness.accrue(500_000, 1);

    let err = harness.crank(START, 0, true, vec![1_000_000]).unwrap_err();
    assert_eq!(err, ErrorCode::QuoteOnlyViolation.into());
    assert_eq!(harness.progress.claimed_quote_today, 0);
    assert_eq!(harness.progress.pages_processed_today, 0);
    assert!(harness.ledger.borrow().transfers.is_empty());
}

#[test]
fn unfunded_claim_is_rejected_before_any_transfer() {
    let mut harness = Harness::new(10_000, 10, 0, 0, 2);
    harness.accrue(100, 0);
    harness.ledger.borrow_mut().phantom_quote = 1_000;

    let err = harness.crank(START, 0, true, vec![5, 5]).unwrap_err();
    assert_eq!(err, ErrorCode::InsufficientTreasuryBalance.into());
    assert!(harness.ledger.borrow().transfers.is_empty());
    assert_eq!(harness.ledger.borrow().treasury, 100);
    assert_eq!(harness.progress.claimed_quote_today, 0);
}

#[test]
fn position_must_match_the_bound_one() {
    let mut harness = Harness::new(2_000, 1_000_000, 0, 0, 0);
    let request = CrankRequest {
        now: START,
        ..CrankRequest::default()
    };

    let err = run_crank(
        &harness.policy,
        &mut harness.progress,
        &Pubkey::new_unique(),
        &mut harness.claimer,
        &mut harness.treasury,
        &request,
    )
    .unwrap_err();
    assert_eq!(err, ErrorCode::ConstraintViolation.into());

    harness.policy.honorary_position = Pubkey::default();
    assert!(harness.crank(START, 0, false, vec![]).is_err());
    assert_eq!(harness.ledger.borrow().claims, 0);
}

#[test]
fn investors_on_separate_pages_split_the_day_pro_rata() {
    let mut harness = Harness::new(10_000, 100, 0, 0, 2);
    harness.accrue(1_000, 0);

    harness.crank_page(START, 0, false, 0, vec![50]).unwrap();
    harness.crank_page(START + 30, 1, true, 1, vec![50]).unwrap();

    let ledger = harness.ledger.borrow();
    assert_eq!(ledger.investors, vec![500, 500]);
    assert_eq!(ledger.creator, 0);
    assert_eq!(ledger.treasury, 0);
    assert_eq!(harness.progress.distributed_quote_today, 1_000);
}

#[test]
fn three_investors_over_two_pages_leave_excluded_share_to_creator() {
    let mut harness = Harness::new(6_000, 1_000, 0, 0, 3);
    harness.accrue(10_000, 0);

    harness.crank_page(START, 0, false, 0, vec![300]).unwrap();
    assert_eq!(harness.progress.carry_quote_today, 8_200);
    harness.crank_page(START + 30, 1, true, 1, vec![200, 500]).unwrap();

    let ledger = harness.ledger.borrow();
    assert_eq!(ledger.investors, vec![1_800, 1_200, 3_000]);
    assert_eq!(ledger.creator, 4_000);
    assert_eq!(ledger.treasury, 0);
}

#[test]
fn unclosed_day_carry_goes_to_creator_on_rollover() {
    let mut harness = Harness::new(2_000, 1_000_000, 0, 0, 1);
    harness.accrue(500_000, 0);

    harness.crank(START, 0, false, vec![1_000_000]).unwrap();
    assert_eq!(harness.progress.carry_quote_today, 400_000);
    assert!(!harness.progress.day_closed);

    harness.crank(START + DAY, 0, true, vec![]).unwrap();

    let ledger = harness.ledger.borrow();
    assert_eq!(ledger.investors[0], 100_000);
    assert_eq!(ledger.creator, 400_000);
    assert_eq!(ledger.treasury, 0);
    assert_eq!(harness.progress.current_day, Progress::day_of(START) + 1);
    assert_eq!(harness.progress.claimed_quote_today, 0);
    assert!(harness.progress.day_closed);
}

#[test]
fn capped_days_conserve_value_across_rollover() {
    let mut harness = Harness::new(4_000, 1_000, 300, 10, 3);
    let mut creator_by_day = Vec::new();
    let pages: [(u64, usize, Vec<u64>); 3] = [(900, 0, vec![500]), (35, 1, vec![20]), (2_500, 2, vec![480])];

    for day in 0..3i64 {
        let now = START + day * DAY;
        let creator_before = harness.ledger.borrow().creator;
        let mut claimed = 0;

        for (cursor, (accrued, first_investor, weights)) in pages.iter().cloned().enumerate() {
            harness.accrue(accrued, 0);
            claimed += accrued;
            let last = cursor == 2;
            harness
                .crank_page(now + cursor as i64, cursor as u64, last, first_investor, weights)
                .unwrap();
            assert!(harness.progress.distributed_quote_today <= 300);
            assert!(
                harness.progress.distributed_quote_today + harness.progress.carry_quote_today
                    <= harness.progress.claimed_quote_today
            );
        }

        let remainder = harness.ledger.borrow().creator - creator_before;
        assert_eq!(harness.progress.claimed_quote_today, claimed);
        assert_eq!(harness.progress.distributed_quote_today, 294);
        assert_eq!(
            harness.progress.distributed_quote_today + remainder,
            claimed
        );
        assert!(harness.progress.day_closed);
        creator_by_day.push(remainder);

        let err = harness.crank(now + 100, 3, false, vec![]).unwrap_err();
        assert_eq!(err, ErrorCode::DailyWindowNotReady.into());
    }

    let ledger = harness.ledger.borrow();
    assert_eq!(ledger.treasury, 0);
    // the 20-weight share is dust every day
    assert_eq!(ledger.investors, vec![3 * 150, 0, 3 * 144]);
    let investors: u64 = ledger.investors.iter().sum();
    assert_eq!(investors + ledger.creator, 3 * (900 + 35 + 2_500));
    assert_eq!(creator_by_day, vec![3_141; 3]);
    assert_eq!(harness.progress.current_day, Progress::day_of(START) + 2);
}
