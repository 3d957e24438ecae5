use anchor_lang::prelude::*;

#[error_code]
pub enum VestingError {
    #[msg("Invalid schedule: amount and vesting duration must be positive and the cliff must fit inside the vesting duration.")]
    InvalidSchedule,
    #[msg("A vesting schedule already exists for this funder, beneficiary and mint.")]
    DuplicateSchedule,
    #[msg("Vesting schedule not found.")]
    NotFound,
    #[msg("Caller is not allowed to perform this action on the schedule.")]
    Unauthorized,
    #[msg("Vesting is not revocable.")]
    NotRevocable,
    #[msg("Vesting has already been revoked.")]
    AlreadyRevoked,
    #[msg("Nothing to claim.")]
    NothingToClaim,
    #[msg("Math overflow.")]
    MathOverflow,
    #[msg("Mint does not match the token locked in the schedule.")]
    MintMismatch,
}
