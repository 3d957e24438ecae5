use anchor_lang::prelude::*;
use anchor_spl::token_interface::{self, TransferChecked};

/// Token movements the schedule state machine delegates to.
///
/// Every call is atomic: it either moves the full amount or fails without
/// moving anything. The state machine calls each method at most once per
/// operation and only after all of its own checks passed.
pub trait Ledger {
    /// Locks `amount` from the funder into the schedule vault.
    fn hold(&self, amount: u64) -> Result<()>;

    /// Releases `amount` from the schedule vault to the operation's recipient.
    fn transfer(&self, amount: u64) -> Result<()>;
}

/// `Ledger` backed by `transfer_checked` CPIs into the SPL Token or Token-2022 program.
pub struct TokenLedger<'a, 'info> {
    pub token_program: AccountInfo<'info>,
    pub mint: AccountInfo<'info>,
    pub decimals: u8,
    pub vault: AccountInfo<'info>,
    /// Source token account for `hold`, destination token account for `transfer`.
    pub counterparty: AccountInfo<'info>,
    /// Owner of `counterparty` for `hold`, the schedule PDA for `transfer`.
    pub authority: AccountInfo<'info>,
    /// Schedule PDA seeds; unused by `hold`.
    pub signer_seeds: &'a [&'a [&'a [u8]]],
}

impl Ledger for TokenLedger<'_, '_> {
    fn hold(&self, amount: u64) -> Result<()> {
        let cpi_accounts = TransferChecked {
            from: self.counterparty.clone(),
            to: self.vault.clone(),
            mint: self.mint.clone(),
            authority: self.authority.clone(),
        };
        let cpi_ctx = CpiContext::new(self.token_program.clone(), cpi_accounts);
        token_interface::transfer_checked(cpi_ctx, amount, self.decimals).map_err(|err| {
            msg!("Funding the vault with {} failed", amount);
            err
        })
    }

    fn transfer(&self, amount: u64) -> Result<()> {
        let cpi_accounts = TransferChecked {
            from: self.vault.clone(),
            to: self.counterparty.clone(),
            mint: self.mint.clone(),
            authority: self.authority.clone(),
        };
        let cpi_ctx = CpiContext::new_with_signer(
            self.token_program.clone(),
            cpi_accounts,
            self.signer_seeds,
        );
        token_interface::transfer_checked(cpi_ctx, amount, self.decimals).map_err(|err| {
            msg!("Releasing {} from the vault failed", amount);
            err
        })
    }
}
