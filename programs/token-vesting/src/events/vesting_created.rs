use anchor_lang::prelude::*;

#[event]
pub struct VestingCreated {
    pub vesting_schedule: Pubkey,
    pub funder: Pubkey,
    pub beneficiary: Pubkey,
    pub mint: Pubkey,
    pub total_amount: u64,
    pub start_time: i64,
    pub cliff_duration: i64,
    pub vesting_duration: i64,
    pub revocable: bool,
}
