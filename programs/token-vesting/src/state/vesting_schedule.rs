use anchor_lang::prelude::*;

use crate::{ledger::Ledger, utils::ScheduleTerms, VestingError};

#[account]
#[derive(InitSpace, Default)]
pub struct VestingSchedule {
    /// Creator of the schedule, the only key allowed to revoke it
    pub funder: Pubkey,
    /// The only key allowed to claim unlocked tokens
    pub beneficiary: Pubkey,
    pub mint: Pubkey,
    pub total_amount: u64,
    pub claimed_amount: u64,
    pub start_time: i64,
    pub cliff_duration: i64,
    pub vesting_duration: i64,
    pub revocable: bool,
    pub is_revoked: bool,
    /// Unlocked amount frozen at revocation; only meaningful once `is_revoked` is set
    pub unlocked_at_revocation: u64,
    pub revoked_at: i64,
    pub last_claimed_at: i64,
    pub bump: u8,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScheduleStatus {
    Active,
    Revoked,
    Completed,
}

/// Which stored key an operation requires the caller to hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Capability {
    Fund,
    Claim,
}

/// Snapshot of a schedule plus the amounts derived from it at `now`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct ScheduleView {
    pub funder: Pubkey,
    pub beneficiary: Pubkey,
    pub mint: Pubkey,
    pub total_amount: u64,
    pub claimed_amount: u64,
    pub start_time: i64,
    pub cliff_end: i64,
    pub vesting_end: i64,
    pub revocable: bool,
    pub is_revoked: bool,
    pub revoked_at: i64,
    pub now: i64,
    pub unlocked_amount: u64,
    pub claimable_amount: u64,
    /// Balance the vault is expected to hold
    pub locked_amount: u64,
    pub status: ScheduleStatus,
}

/// Keys and bumps fixed when a schedule is opened.
#[derive(Clone, Copy, Debug)]
pub struct ScheduleParties {
    pub funder: Pubkey,
    pub beneficiary: Pubkey,
    pub mint: Pubkey,
    pub bump: u8,
}

impl VestingSchedule {
    pub fn is_initialized(&self) -> bool {
        self.total_amount > 0
    }

    pub fn terms(&self) -> ScheduleTerms {
        ScheduleTerms {
            total_amount: self.total_amount,
            start_time: self.start_time,
            cliff_duration: self.cliff_duration,
            vesting_duration: self.vesting_duration,
        }
    }

    pub fn authorize(&self, caller: &Pubkey, capability: Capability) -> Result<()> {
        let holder = match capability {
            Capability::Fund => self.funder,
            Capability::Claim => self.beneficiary,
        };
        require_keys_eq!(*caller, holder, VestingError::Unauthorized);
        Ok(())
    }

    pub fn status(&self) -> ScheduleStatus {
        if self.claimed_amount == self.total_amount {
            ScheduleStatus::Completed
        } else if self.is_revoked {
            ScheduleStatus::Revoked
        } else {
            ScheduleStatus::Active
        }
    }

    /// Unlocked amount at `now`, frozen at the revocation ceiling once revoked.
    pub fn unlocked_amount(&self, now: i64) -> Result<u64> {
        if self.is_revoked {
            return Ok(self.unlocked_at_revocation);
        }
        self.terms().unlocked_amount(now)
    }

    pub fn claimable_amount(&self, now: i64) -> Result<u64> {
        Ok(self
            .unlocked_amount(now)?
            .saturating_sub(self.claimed_amount))
    }

    /// What the vault should still hold: everything not yet paid out, minus
    /// the part returned to the funder on revocation.
    pub fn locked_amount(&self) -> u64 {
        let ceiling = if self.is_revoked {
            self.unlocked_at_revocation
        } else {
            self.total_amount
        };
        ceiling.saturating_sub(self.claimed_amount)
    }

    /// Initializes a blank record and locks `terms.total_amount` in the vault.
    pub fn open(
        &mut self,
        parties: ScheduleParties,
        terms: ScheduleTerms,
        revocable: bool,
        ledger: &impl Ledger,
    ) -> Result<()> {
        terms.validate()?;
        require!(!self.is_initialized(), VestingError::DuplicateSchedule);

        ledger.hold(terms.total_amount)?;

        self.funder = parties.funder;
        self.beneficiary = parties.beneficiary;
        self.mint = parties.mint;
        self.total_amount = terms.total_amount;
        self.claimed_amount = 0;
        self.start_time = terms.start_time;
        self.cliff_duration = terms.cliff_duration;
        self.vesting_duration = terms.vesting_duration;
        self.revocable = revocable;
        self.is_revoked = false;
        self.unlocked_at_revocation = 0;
        self.revoked_at = 0;
        self.last_claimed_at = 0;
        self.bump = parties.bump;
        Ok(())
    }

    /// Pays the beneficiary everything unlocked and not yet claimed at `now`.
    ///
    /// The claimable amount is recomputed from the stored `claimed_amount`,
    /// and the record only changes after the ledger transfer succeeded.
    pub fn claim(&mut self, caller: &Pubkey, now: i64, ledger: &impl Ledger) -> Result<u64> {
        require!(self.is_initialized(), VestingError::NotFound);
        self.authorize(caller, Capability::Claim)?;

        let claimable = self.claimable_amount(now)?;
        require!(claimable > 0, VestingError::NothingToClaim);

        let claimed_amount = self
            .claimed_amount
            .checked_add(claimable)
            .ok_or(VestingError::MathOverflow)?;
        require!(
            claimed_amount <= self.total_amount,
            VestingError::MathOverflow
        );

        ledger.transfer(claimable)?;

        self.claimed_amount = claimed_amount;
        self.last_claimed_at = now;
        Ok(claimable)
    }

    /// Freezes the schedule at `now` and returns the never-to-vest remainder
    /// to the funder. Returns the refunded amount.
    pub fn revoke(&mut self, caller: &Pubkey, now: i64, ledger: &impl Ledger) -> Result<u64> {
        require!(self.is_initialized(), VestingError::NotFound);
        self.authorize(caller, Capability::Fund)?;
        require!(self.revocable, VestingError::NotRevocable);
        require!(!self.is_revoked, VestingError::AlreadyRevoked);

        // never freeze below what was already paid out
        let ceiling = self.terms().unlocked_amount(now)?.max(self.claimed_amount);
        let refund = self
            .total_amount
            .checked_sub(ceiling)
            .ok_or(VestingError::MathOverflow)?;

        if refund > 0 {
            ledger.transfer(refund)?;
        }

        self.is_revoked = true;
        self.unlocked_at_revocation = ceiling;
        self.revoked_at = now;
        Ok(refund)
    }

    pub fn view(&self, now: i64) -> Result<ScheduleView> {
        require!(self.is_initialized(), VestingError::NotFound);
        let terms = self.terms();

        Ok(ScheduleView {
            funder: self.funder,
            beneficiary: self.beneficiary,
            mint: self.mint,
            total_amount: self.total_amount,
            claimed_amount: self.claimed_amount,
            start_time: self.start_time,
            cliff_end: terms.cliff_end()?,
            vesting_end: terms.vesting_end()?,
            revocable: self.revocable,
            is_revoked: self.is_revoked,
            revoked_at: self.revoked_at,
            now,
            unlocked_amount: self.unlocked_amount(now)?,
            claimable_amount: self.claimable_amount(now)?,
            locked_amount: self.locked_amount(),
            status: self.status(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    const DAY: i64 = 86_400;
    const START: i64 = 1_700_000_000;

    #[derive(Default)]
    struct MockLedger {
        held: RefCell<Vec<u64>>,
        transferred: RefCell<Vec<u64>>,
        fail: bool,
    }

    impl MockLedger {
        fn failing() -> Self {
            Self {
                fail: true,
                ..Default::default()
            }
        }

        fn transferred(&self) -> Vec<u64> {
            self.transferred.borrow().clone()
        }
    }

    impl Ledger for MockLedger {
        fn hold(&self, amount: u64) -> Result<()> {
            if self.fail {
                return Err(ProgramError::InsufficientFunds.into());
            }
            self.held.borrow_mut().push(amount);
            Ok(())
        }

        fn transfer(&self, amount: u64) -> Result<()> {
            if self.fail {
                return Err(ProgramError::InsufficientFunds.into());
            }
            self.transferred.borrow_mut().push(amount);
            Ok(())
        }
    }

    fn parties() -> ScheduleParties {
        ScheduleParties {
            funder: Pubkey::new_unique(),
            beneficiary: Pubkey::new_unique(),
            mint: Pubkey::new_unique(),
            bump: 254,
        }
    }

    fn terms(cliff_duration: i64, vesting_duration: i64) -> ScheduleTerms {
        ScheduleTerms {
            total_amount: 1000,
            start_time: START,
            cliff_duration,
            vesting_duration,
        }
    }

    fn open_schedule(cliff_duration: i64, vesting_duration: i64, revocable: bool) -> VestingSchedule {
        let mut schedule = VestingSchedule::default();
        schedule
            .open(
                parties(),
                terms(cliff_duration, vesting_duration),
                revocable,
                &MockLedger::default(),
            )
            .unwrap();
        schedule
    }

    #[test]
    fn test_open_locks_total_amount() {
        let ledger = MockLedger::default();
        let parties = parties();
        let mut schedule = VestingSchedule::default();
        schedule
            .open(parties, terms(30 * DAY, 365 * DAY), true, &ledger)
            .unwrap();

        assert_eq!(*ledger.held.borrow(), vec![1000]);
        assert_eq!(schedule.funder, parties.funder);
        assert_eq!(schedule.beneficiary, parties.beneficiary);
        assert_eq!(schedule.claimed_amount, 0);
        assert_eq!(schedule.bump, 254);
        assert_eq!(schedule.status(), ScheduleStatus::Active);
        assert_eq!(schedule.locked_amount(), 1000);
    }

    #[test]
    fn test_open_twice_is_duplicate() {
        let mut schedule = open_schedule(0, 100, true);
        let ledger = MockLedger::default();

        let err = schedule
            .open(parties(), terms(0, 100), true, &ledger)
            .unwrap_err();
        assert_eq!(err, VestingError::DuplicateSchedule.into());
        assert!(ledger.held.borrow().is_empty());
    }

    #[test]
    fn test_open_rejects_invalid_terms_without_funding() {
        let ledger = MockLedger::default();
        let mut schedule = VestingSchedule::default();

        let err = schedule
            .open(parties(), terms(200, 100), true, &ledger)
            .unwrap_err();
        assert_eq!(err, VestingError::InvalidSchedule.into());
        assert!(ledger.held.borrow().is_empty());
        assert!(!schedule.is_initialized());
    }

    #[test]
    fn test_open_leaves_record_blank_when_funding_fails() {
        let mut schedule = VestingSchedule::default();
        let result = schedule.open(parties(), terms(0, 100), true, &MockLedger::failing());

        assert!(result.is_err());
        assert!(!schedule.is_initialized());
    }

    #[test]
    fn test_claim_requires_beneficiary() {
        let mut schedule = open_schedule(0, 100, true);
        let ledger = MockLedger::default();

        for caller in [schedule.funder, Pubkey::new_unique()] {
            let err = schedule.claim(&caller, START + 50, &ledger).unwrap_err();
            assert_eq!(err, VestingError::Unauthorized.into());
        }
        assert!(ledger.transferred().is_empty());
        assert_eq!(schedule.claimed_amount, 0);
    }

    #[test]
    fn test_claim_on_blank_record_is_not_found() {
        let mut schedule = VestingSchedule::default();
        let err = schedule
            .claim(&Pubkey::default(), START, &MockLedger::default())
            .unwrap_err();
        assert_eq!(err, VestingError::NotFound.into());
    }

    #[test]
    fn test_claim_before_cliff_is_nothing_to_claim() {
        let mut schedule = open_schedule(30 * DAY, 365 * DAY, true);
        let ledger = MockLedger::default();
        let beneficiary = schedule.beneficiary;

        let err = schedule
            .claim(&beneficiary, START + 30 * DAY - 1, &ledger)
            .unwrap_err();
        assert_eq!(err, VestingError::NothingToClaim.into());
        assert!(ledger.transferred().is_empty());
    }

    #[test]
    fn test_claims_accumulate_to_unlocked_amount() {
        let mut schedule = open_schedule(30 * DAY, 365 * DAY, true);
        let ledger = MockLedger::default();
        let beneficiary = schedule.beneficiary;

        assert_eq!(schedule.claim(&beneficiary, START + 30 * DAY, &ledger).unwrap(), 82);
        assert_eq!(schedule.claimed_amount, 82);
        assert_eq!(schedule.last_claimed_at, START + 30 * DAY);

        let half = START + 365 * DAY / 2;
        let expected = schedule.terms().unlocked_amount(half).unwrap() - 82;
        assert_eq!(schedule.claim(&beneficiary, half, &ledger).unwrap(), expected);
        assert_eq!(schedule.claimed_amount, 82 + expected);

        schedule.claim(&beneficiary, START + 400 * DAY, &ledger).unwrap();
        assert_eq!(schedule.claimed_amount, 1000);
        assert_eq!(ledger.transferred().iter().sum::<u64>(), 1000);
        assert_eq!(schedule.status(), ScheduleStatus::Completed);
        assert_eq!(schedule.locked_amount(), 0);

        let err = schedule
            .claim(&beneficiary, START + 500 * DAY, &ledger)
            .unwrap_err();
        assert_eq!(err, VestingError::NothingToClaim.into());
    }

    #[test]
    fn test_repeated_claim_at_same_time_pays_once() {
        let mut schedule = open_schedule(0, 1000, true);
        let ledger = MockLedger::default();
        let beneficiary = schedule.beneficiary;

        assert_eq!(schedule.claim(&beneficiary, START + 400, &ledger).unwrap(), 400);
        let err = schedule.claim(&beneficiary, START + 400, &ledger).unwrap_err();
        assert_eq!(err, VestingError::NothingToClaim.into());

        assert_eq!(schedule.claim(&beneficiary, START + 600, &ledger).unwrap(), 200);
        assert_eq!(ledger.transferred(), vec![400, 200]);
        assert_eq!(
            schedule.claimed_amount,
            schedule.terms().unlocked_amount(START + 600).unwrap()
        );
    }

    #[test]
    fn test_clock_behind_last_claim_pays_nothing() {
        let mut schedule = open_schedule(0, 1000, true);
        let ledger = MockLedger::default();
        let beneficiary = schedule.beneficiary;

        schedule.claim(&beneficiary, START + 700, &ledger).unwrap();
        let err = schedule.claim(&beneficiary, START + 300, &ledger).unwrap_err();
        assert_eq!(err, VestingError::NothingToClaim.into());
        assert_eq!(schedule.claimed_amount, 700);
    }

    #[test]
    fn test_failed_transfer_leaves_claim_state_untouched() {
        let mut schedule = open_schedule(0, 1000, true);
        let beneficiary = schedule.beneficiary;

        let result = schedule.claim(&beneficiary, START + 500, &MockLedger::failing());
        assert!(result.is_err());
        assert_eq!(schedule.claimed_amount, 0);
        assert_eq!(schedule.last_claimed_at, 0);

        let ledger = MockLedger::default();
        assert_eq!(schedule.claim(&beneficiary, START + 500, &ledger).unwrap(), 500);
    }

    #[test]
    fn test_revoke_requires_funder() {
        let mut schedule = open_schedule(0, 1000, true);
        let beneficiary = schedule.beneficiary;

        let err = schedule
            .revoke(&beneficiary, START + 10, &MockLedger::default())
            .unwrap_err();
        assert_eq!(err, VestingError::Unauthorized.into());
        assert!(!schedule.is_revoked);
    }

    #[test]
    fn test_revoke_non_revocable() {
        let mut schedule = open_schedule(0, 1000, false);
        let ledger = MockLedger::default();
        let (funder, beneficiary) = (schedule.funder, schedule.beneficiary);
        schedule.claim(&beneficiary, START + 100, &ledger).unwrap();

        let err = schedule.revoke(&funder, START + 200, &ledger).unwrap_err();
        assert_eq!(err, VestingError::NotRevocable.into());
        assert_eq!(schedule.claimed_amount, 100);
        assert!(!schedule.is_revoked);
        assert_eq!(ledger.transferred(), vec![100]);
    }

    #[test]
    fn test_revoke_refunds_unvested_and_freezes_claims() {
        let mut schedule = open_schedule(0, 1000, true);
        let ledger = MockLedger::default();
        let (funder, beneficiary) = (schedule.funder, schedule.beneficiary);

        schedule.claim(&beneficiary, START + 100, &ledger).unwrap();
        assert_eq!(schedule.revoke(&funder, START + 250, &ledger).unwrap(), 750);
        assert!(schedule.is_revoked);
        assert_eq!(schedule.revoked_at, START + 250);
        assert_eq!(schedule.unlocked_at_revocation, 250);
        assert_eq!(schedule.status(), ScheduleStatus::Revoked);
        assert_eq!(schedule.locked_amount(), 150);

        for now in [START + 250, START + 999, START + 10_000] {
            assert_eq!(schedule.claimable_amount(now).unwrap(), 150);
        }

        assert_eq!(schedule.claim(&beneficiary, START + 10_000, &ledger).unwrap(), 150);
        assert_eq!(schedule.claimed_amount, 250);
        assert_eq!(schedule.locked_amount(), 0);

        let err = schedule
            .claim(&beneficiary, START + 20_000, &ledger)
            .unwrap_err();
        assert_eq!(err, VestingError::NothingToClaim.into());
        assert_eq!(ledger.transferred(), vec![100, 750, 150]);
    }

    #[test]
    fn test_revoke_twice() {
        let mut schedule = open_schedule(0, 1000, true);
        let ledger = MockLedger::default();
        let funder = schedule.funder;

        schedule.revoke(&funder, START + 10, &ledger).unwrap();
        let err = schedule.revoke(&funder, START + 20, &ledger).unwrap_err();
        assert_eq!(err, VestingError::AlreadyRevoked.into());
        assert_eq!(schedule.unlocked_at_revocation, 10);
    }

    #[test]
    fn test_revoke_before_cliff_returns_everything() {
        let mut schedule = open_schedule(100, 1000, true);
        let ledger = MockLedger::default();
        let (funder, beneficiary) = (schedule.funder, schedule.beneficiary);

        assert_eq!(schedule.revoke(&funder, START + 50, &ledger).unwrap(), 1000);
        assert_eq!(schedule.locked_amount(), 0);
        let err = schedule
            .claim(&beneficiary, START + 5_000, &ledger)
            .unwrap_err();
        assert_eq!(err, VestingError::NothingToClaim.into());
    }

    #[test]
    fn test_revoke_after_full_vesting_moves_nothing() {
        let mut schedule = open_schedule(0, 1000, true);
        let ledger = MockLedger::default();
        let (funder, beneficiary) = (schedule.funder, schedule.beneficiary);

        assert_eq!(schedule.revoke(&funder, START + 2_000, &ledger).unwrap(), 0);
        assert!(ledger.transferred().is_empty());
        assert_eq!(schedule.claim(&beneficiary, START + 2_001, &ledger).unwrap(), 1000);
        assert_eq!(schedule.status(), ScheduleStatus::Completed);
    }

    #[test]
    fn test_revoke_with_clock_behind_last_claim_keeps_vault_solvent() {
        let mut schedule = open_schedule(0, 1000, true);
        let ledger = MockLedger::default();
        let (funder, beneficiary) = (schedule.funder, schedule.beneficiary);

        schedule.claim(&beneficiary, START + 600, &ledger).unwrap();
        assert_eq!(schedule.revoke(&funder, START + 400, &ledger).unwrap(), 400);
        assert_eq!(schedule.unlocked_at_revocation, 600);
        assert_eq!(schedule.locked_amount(), 0);
    }

    #[test]
    fn test_failed_refund_leaves_schedule_unrevoked() {
        let mut schedule = open_schedule(0, 1000, true);
        let funder = schedule.funder;

        assert!(schedule
            .revoke(&funder, START + 10, &MockLedger::failing())
            .is_err());
        assert!(!schedule.is_revoked);
        assert_eq!(schedule.unlocked_at_revocation, 0);
    }

    #[test]
    fn test_view_reports_derived_amounts() {
        let mut schedule = open_schedule(30 * DAY, 365 * DAY, true);
        let beneficiary = schedule.beneficiary;
        schedule
            .claim(&beneficiary, START + 30 * DAY, &MockLedger::default())
            .unwrap();

        let now = START + 365 * DAY;
        let view = schedule.view(now).unwrap();
        assert_eq!(view, schedule.view(now).unwrap());
        assert_eq!(view.cliff_end, START + 30 * DAY);
        assert_eq!(view.vesting_end, START + 365 * DAY);
        assert_eq!(view.unlocked_amount, 1000);
        assert_eq!(view.claimable_amount, 918);
        assert_eq!(view.locked_amount, 918);
        assert_eq!(view.status, ScheduleStatus::Active);
        assert_eq!(schedule.claimed_amount, 82);
    }

    #[test]
    fn test_view_of_blank_record_is_not_found() {
        let err = VestingSchedule::default().view(START).unwrap_err();
        assert_eq!(err, VestingError::NotFound.into());
    }
}
