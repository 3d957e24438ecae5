use anchor_lang::prelude::*;

#[event]
pub struct VestingClaimed {
    pub vesting_schedule: Pubkey,
    pub amount: u64,
    pub claimed_amount: u64,
    pub time: i64,
}
