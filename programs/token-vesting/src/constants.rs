use anchor_lang::prelude::*;

#[constant]
pub const VESTING_SEED: &[u8] = b"vesting";
