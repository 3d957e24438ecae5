use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{Mint, TokenAccount, TokenInterface},
};

use crate::{
    constants::*, error::*, events::VestingClaimed, ledger::TokenLedger,
    utils::vesting_schedule_signer_seeds, VestingSchedule,
};

#[derive(Accounts)]
pub struct Claim<'info> {
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

    #[account(
        init_if_needed,
        payer = beneficiary,
        associated_token::authority = beneficiary,
        associated_token::mint = mint,
        associated_token::token_program = token_program,
    )]
    pub beneficiary_token_account: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,

    pub mint: InterfaceAccount<'info, Mint>,

    #[account(mut)]
    pub beneficiary: Signer<'info>,
    pub system_program: Program<'info, System>,
    pub associated_token_program: Program<'info, AssociatedToken>,
}

pub fn claim_handler(ctx: Context<Claim>) -> Result<()> {
    let clock = Clock::get()?;
    let now = clock.unix_timestamp;
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
        counterparty: accounts.beneficiary_token_account.to_account_info(),
        authority: accounts.vesting_schedule.to_account_info(),
        signer_seeds,
    };

    let caller = accounts.beneficiary.key();
    let amount = accounts.vesting_schedule.claim(&caller, now, &ledger)?;
    let claimed_amount = accounts.vesting_schedule.claimed_amount;

    msg!(
        "Claimed {} tokens. Total claimed: {}/{}",
        amount,
        claimed_amount,
        accounts.vesting_schedule.total_amount,
    );
    emit!(VestingClaimed {
        vesting_schedule: vesting_key,
        amount,
        claimed_amount,
        time: now,
    });

    Ok(())
}
