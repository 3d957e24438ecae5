use anchor_lang::prelude::*;

#[event]
pub struct VestingRevoked {
    /// The vesting schedule that was revoked
    pub vesting_schedule: Pubkey,
    /// Amount of tokens returned to the funder
    pub refunded: u64,
    /// Ceiling for all future claims
    pub unlocked_at_revocation: u64,
    /// When the revocation occurred
    pub timestamp: i64,
}
