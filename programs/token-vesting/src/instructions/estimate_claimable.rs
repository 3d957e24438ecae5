use anchor_lang::prelude::*;

use crate::ReadSchedule;

pub fn estimate_claimable_handler(ctx: Context<ReadSchedule>) -> Result<u64> {
    let vesting = &ctx.accounts.vesting_schedule;
    let clock = Clock::get()?;
    let now = clock.unix_timestamp;

    let claimable_amount = vesting.claimable_amount(now)?;
    Ok(claimable_amount)
}
