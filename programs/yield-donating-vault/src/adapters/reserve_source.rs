use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::{errors::*, state::*, yield_source::YieldSource};

use super::transfer_from_vault;

/// Yield source backed by a vault-owned position token account
///
/// Deployed assets sit in the position account; whatever the external
/// market credits to it is yield. Capacity is bounded by the
/// `ReservePosition` deposit limit.
pub struct ReserveYieldSource<'info> {
    token_program: AccountInfo<'info>,
    vault_token_account: AccountInfo<'info>,
    position_token_account: AccountInfo<'info>,
    vault_authority: AccountInfo<'info>,
    asset_mint: Pubkey,
    authority_bump: u8,
    deposit_limit: u64,
    /// Position balance as of load, kept current across this instruction's transfers
    balance: u64,
}

impl<'info> ReserveYieldSource<'info> {
    pub fn new(
        vault_state: &VaultState,
        position: &ReservePosition,
        token_program: &Program<'info, Token>,
        vault_token_account: &Account<'info, TokenAccount>,
        position_token_account: &Account<'info, TokenAccount>,
        vault_authority: &AccountInfo<'info>,
    ) -> Self {
        Self {
            token_program: token_program.to_account_info(),
            vault_token_account: vault_token_account.to_account_info(),
            position_token_account: position_token_account.to_account_info(),
            vault_authority: vault_authority.clone(),
            asset_mint: vault_state.asset_mint,
            authority_bump: vault_state.authority_bump,
            deposit_limit: position.deposit_limit,
            balance: position_token_account.amount,
        }
    }

    fn transfer(&self, from: &AccountInfo<'info>, to: &AccountInfo<'info>, amount: u64) -> Result<()> {
        transfer_from_vault(
            &self.token_program,
            from,
            to,
            &self.vault_authority,
            &self.asset_mint,
            self.authority_bump,
            amount,
        )
    }
}

impl<'info> YieldSource for ReserveYieldSource<'info> {
    fn deployable_capacity(&self) -> Result<u64> {
        Ok(self.deposit_limit.saturating_sub(self.balance))
    }

    fn withdrawable_capacity(&self) -> Result<u64> {
        Ok(self.balance)
    }

    fn current_value(&self) -> Result<u64> {
        Ok(self.balance)
    }

    fn deposit(&mut self, amount: u64) -> Result<()> {
        require!(
            amount <= self.deployable_capacity()?,
            VaultError::DepositLimitExceeded
        );

        self.transfer(&self.vault_token_account, &self.position_token_account, amount)?;
        self.balance = self.balance.checked_add(amount).ok_or(VaultError::MathOverflow)?;
        Ok(())
    }

    fn withdraw(&mut self, amount: u64) -> Result<u64> {
        let freed = amount.min(self.balance);
        if freed == 0 {
            return Ok(0);
        }

        self.transfer(&self.position_token_account, &self.vault_token_account, freed)?;
        self.balance -= freed;
        Ok(freed)
    }
}
