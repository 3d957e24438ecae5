use anchor_lang::prelude::*;
use anchor_spl::associated_token::get_associated_token_address_with_program_id;

use crate::VESTING_SEED;

/// Address and bump of the schedule record for a (funder, beneficiary, mint) triple.
///
/// The triple is the whole seed, so each triple has exactly one schedule and
/// anyone can recompute its address from public keys alone.
pub fn vesting_schedule_address(
    funder: &Pubkey,
    beneficiary: &Pubkey,
    mint: &Pubkey,
    program_id: &Pubkey,
) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[
            VESTING_SEED,
            funder.as_ref(),
            beneficiary.as_ref(),
            mint.as_ref(),
        ],
        program_id,
    )
}

/// Token account holding the locked funds of a schedule: the schedule PDA's
/// associated token account for `mint` under `token_program`.
pub fn vault_address(vesting_schedule: &Pubkey, mint: &Pubkey, token_program: &Pubkey) -> Pubkey {
    get_associated_token_address_with_program_id(vesting_schedule, mint, token_program)
}

/// Seeds the program signs with when moving funds out of the vault.
pub fn vesting_schedule_signer_seeds<'a>(
    funder: &'a Pubkey,
    beneficiary: &'a Pubkey,
    mint: &'a Pubkey,
    bump: &'a [u8; 1],
) -> [&'a [u8]; 5] {
    [
        VESTING_SEED,
        funder.as_ref(),
        beneficiary.as_ref(),
        mint.as_ref(),
        &bump[..],
    ]
}
