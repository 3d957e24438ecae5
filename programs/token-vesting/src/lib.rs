#![allow(unexpected_cfgs)]

pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod ledger;
pub mod state;
pub mod utils;

use anchor_lang::prelude::*;

pub use constants::*;
pub use error::*;
pub use instructions::*;
pub use state::*;

declare_id!("YX7NekYqBdajibeV4uvToKjsNtgxCPQxJpPX2dJyS9X");

#[program]
pub mod token_vesting {
    use super::*;

    /// Locks `total_amount` of `mint` for `beneficiary`, unlocking linearly
    /// over `vesting_duration` seconds from `start_time` once the cliff passed.
    pub fn create_vesting(
        ctx: Context<CreateVesting>,
        total_amount: u64,
        start_time: i64,
        cliff_duration: i64,
        vesting_duration: i64,
        revocable: bool,
    ) -> Result<()> {
        create_vesting::create_vesting_handler(
            ctx,
            total_amount,
            start_time,
            cliff_duration,
            vesting_duration,
            revocable,
        )
    }

    pub fn claim(ctx: Context<Claim>) -> Result<()> {
        claim::claim_handler(ctx)
    }

    pub fn revoke(ctx: Context<Revoke>) -> Result<()> {
        revoke::revoke_handler(ctx)
    }

    pub fn get_schedule(ctx: Context<ReadSchedule>) -> Result<ScheduleView> {
        get_schedule::get_schedule_handler(ctx)
    }

    pub fn estimate_claimable(ctx: Context<ReadSchedule>) -> Result<u64> {
        estimate_claimable::estimate_claimable_handler(ctx)
    }
}
