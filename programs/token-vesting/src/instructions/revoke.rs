use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::error::*;
use crate::{
    constants::*, events::VestingRevoked, ledger::TokenLedger,
    state::VestingSchedule, utils::vesting_schedule_signer_seeds,
};

#[derive(Accounts)]
pub struct Revoke<'info> {
    #[account(
        mut,
        seeds = [
            VESTING_SEED,
            vesting_schedule.funder.as_ref(),
            vesting_schedule.beneficiary.as_ref(),
            vesting_schedule.mint.as_ref(),
        ],
        bump = vesting_schedule.bump,
        has_one = mint @ VestingError::MintMismatch,
    )]
    pub vesting_schedule: Account<'info, VestingSchedule>,
    #[account(
        mut,
        associated_token::mint = mint,
        associated_token::authority = vesting_schedule,
        associated_token::token_program = token_program,
    )]
    pub vault: InterfaceAccount<'info, TokenAccount>,

    /// Where unvested tokens go back to
    #[account(mut,
        token::mint = mint,
        token::token_program = token_program,
        token::authority = funder,
    )]
    pub funder_token_account: InterfaceAccount<'info, TokenAccount>,

    /// Authority allowed to revoke (the original funder)
    pub funder: Signer<'info>,
    pub mint: InterfaceAccount<'info, Mint>,

    pub token_program: Interface<'info, TokenInterface>,
}

pub fn revoke_handler(ctx: Context<Revoke>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let accounts = &mut *ctx.accounts;

    let vesting_key = accounts.vesting_schedule.key();
    let (funder, beneficiary, mint) = (
        accounts.vesting_schedule.funder,
        accounts.vesting_schedule.beneficiary,
        accounts.vesting_schedule.mint,
    );
    let bump = [accounts.vesting_schedule.bump];
    let seeds = vesting_schedule_signer_seeds(&funder, &beneficiary, &mint, &bump);
    let signer_seeds: &[&[&[u8]]] = &[&seeds[..]];

    let ledger = TokenLedger {
        token_program: accounts.token_program.to_account_info(),
        mint: accounts.mint.to_account_info(),
        decimals: accounts.mint.decimals,
        vault: accounts.vault.to_account_info(),
        counterparty: accounts.funder_token_account.to_account_info(),
        authority: accounts.vesting_schedule.to_account_info(),
        signer_seeds,
    };

    let caller = accounts.funder.key();
    let refunded = accounts.vesting_schedule.revoke(&caller, now, &ledger)?;

    let vesting = &accounts.vesting_schedule;
    msg!(
        "Revoked schedule {}: refunded {}, {} left claimable",
        vesting_key,
        refunded,
        vesting.locked_amount()
    );
    emit!(VestingRevoked {
        vesting_schedule: vesting_key,
        refunded,
        unlocked_at_revocation: vesting.unlocked_at_revocation,
        timestamp: vesting.revoked_at,
    });

    Ok(())
}
