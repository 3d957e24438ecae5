use crate::constants::*;
use crate::events::*;
use crate::ledger::TokenLedger;
use crate::state::*;
use crate::utils::ScheduleTerms;
use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{Mint, TokenAccount, TokenInterface},
};

#[derive(Accounts)]
pub struct CreateVesting<'info> {
    #[account(
        init_if_needed,
        seeds = [VESTING_SEED, funder.key().as_ref(), beneficiary.key().as_ref(), mint.key().as_ref()],
        bump,
        payer = funder,
        space = 8 + VestingSchedule::INIT_SPACE,
    )]
    pub vesting_schedule: Account<'info, VestingSchedule>,

    #[account(
        init_if_needed,
        payer = funder,
        associated_token::mint = mint,
        associated_token::authority = vesting_schedule,
        associated_token::token_program = token_program,
    )]
    pub vault: InterfaceAccount<'info, TokenAccount>,

    #[account(mut)]
    pub funder: Signer<'info>,

    #[account(mut, token::mint = mint, token::authority = funder, token::token_program = token_program,)]
    pub funder_token_account: InterfaceAccount<'info, TokenAccount>,

    /// CHECK: Only used as a key
    pub beneficiary: UncheckedAccount<'info>,
    pub mint: InterfaceAccount<'info, Mint>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
    pub associated_token_program: Program<'info, AssociatedToken>,
}

pub fn create_vesting_handler(
    ctx: Context<CreateVesting>,
    total_amount: u64,
    start_time: i64,
    cliff_duration: i64,
    vesting_duration: i64,
    revocable: bool,
) -> Result<()> {
    let terms = ScheduleTerms {
        total_amount,
        start_time,
        cliff_duration,
        vesting_duration,
    };
    let parties = ScheduleParties {
        funder: ctx.accounts.funder.key(),
        beneficiary: ctx.accounts.beneficiary.key(),
        mint: ctx.accounts.mint.key(),
        bump: ctx.bumps.vesting_schedule,
    };

    let accounts = &mut *ctx.accounts;
    let vesting_key = accounts.vesting_schedule.key();
    let ledger = TokenLedger {
        token_program: accounts.token_program.to_account_info(),
        mint: accounts.mint.to_account_info(),
        decimals: accounts.mint.decimals,
        vault: accounts.vault.to_account_info(),
        counterparty: accounts.funder_token_account.to_account_info(),
        authority: accounts.funder.to_account_info(),
        signer_seeds: &[],
    };

    accounts
        .vesting_schedule
        .open(parties, terms, revocable, &ledger)?;

    msg!(
        "Locked {} tokens for {} until {}",
        total_amount,
        parties.beneficiary,
        terms.vesting_end()?
    );
    emit!(VestingCreated {
        vesting_schedule: vesting_key,
        funder: parties.funder,
        beneficiary: parties.beneficiary,
        mint: parties.mint,
        total_amount,
        start_time,
        cliff_duration,
        vesting_duration,
        revocable,
    });

    Ok(())
}
