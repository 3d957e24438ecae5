use anchor_lang::prelude::*;

use crate::VestingError;

/// Immutable parameters of a schedule, fixed at creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScheduleTerms {
    pub total_amount: u64,
    pub start_time: i64,
    pub cliff_duration: i64,
    pub vesting_duration: i64,
}

impl ScheduleTerms {
    pub fn validate(&self) -> Result<()> {
        require!(self.total_amount > 0, VestingError::InvalidSchedule);
        require!(self.vesting_duration > 0, VestingError::InvalidSchedule);
        require!(self.cliff_duration >= 0, VestingError::InvalidSchedule);
        require!(
            self.cliff_duration <= self.vesting_duration,
            VestingError::InvalidSchedule
        );
        require!(
            self.start_time.checked_add(self.vesting_duration).is_some(),
            VestingError::InvalidSchedule
        );
        Ok(())
    }

    pub fn cliff_end(&self) -> Result<i64> {
        self.start_time
            .checked_add(self.cliff_duration)
            .ok_or(error!(VestingError::MathOverflow))
    }

    pub fn vesting_end(&self) -> Result<i64> {
        self.start_time
            .checked_add(self.vesting_duration)
            .ok_or(error!(VestingError::MathOverflow))
    }

    pub fn unlocked_amount(&self, now: i64) -> Result<u64> {
        unlocked_amount(
            self.total_amount,
            self.start_time,
            self.cliff_duration,
            self.vesting_duration,
            now,
        )
    }
}

/// Cumulative amount released by a cliff + linear schedule at `now`.
///
/// Nothing unlocks before `start_time + cliff_duration`; after that the amount
/// is `floor(total_amount * (now - start_time) / vesting_duration)`, reaching
/// `total_amount` at `start_time + vesting_duration`. The multiplication is
/// done in u128 so it cannot overflow for any u64 amount.
pub fn unlocked_amount(
    total_amount: u64,
    start_time: i64,
    cliff_duration: i64,
    vesting_duration: i64,
    now: i64,
) -> Result<u64> {
    require!(
        vesting_duration > 0 && cliff_duration >= 0,
        VestingError::InvalidSchedule
    );

    let cliff_end = start_time
        .checked_add(cliff_duration)
        .ok_or(VestingError::MathOverflow)?;
    if now < cliff_end {
        return Ok(0);
    }

    let vesting_end = start_time
        .checked_add(vesting_duration)
        .ok_or(VestingError::MathOverflow)?;
    if now >= vesting_end {
        return Ok(total_amount);
    }

    // start_time <= cliff_end <= now < vesting_end
    let elapsed = now
        .checked_sub(start_time)
        .ok_or(VestingError::MathOverflow)? as u128;

    let unlocked = (total_amount as u128)
        .checked_mul(elapsed)
        .ok_or(VestingError::MathOverflow)?
        .checked_div(vesting_duration as u128)
        .ok_or(VestingError::MathOverflow)?;

    u64::try_from(unlocked).map_err(|_| error!(VestingError::MathOverflow))
}
