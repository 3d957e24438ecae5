use anchor_lang::prelude::*;

use crate::{ScheduleView, VestingSchedule};

#[derive(Accounts)]
pub struct ReadSchedule<'info> {
    #[account()]
    pub vesting_schedule: Account<'info, VestingSchedule>,
}

pub fn get_schedule_handler(ctx: Context<ReadSchedule>) -> Result<ScheduleView> {
    let now = Clock::get()?.unix_timestamp;
    ctx.accounts.vesting_schedule.view(now)
}
