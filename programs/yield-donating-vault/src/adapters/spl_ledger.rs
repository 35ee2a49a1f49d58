use anchor_lang::prelude::*;
use anchor_spl::token::{self, Burn, Mint, MintTo, Token, TokenAccount};

use crate::{constants::*, errors::*, events::*, ledger::ShareLedger};

/// A share token account passed to the current instruction
pub struct ShareHolder<'info> {
    /// Ledger identity of the holder
    pub owner: Pubkey,
    pub token_account: AccountInfo<'info>,
    /// Signs burns: the owner, or the vault authority for escrowed shares
    pub burn_authority: AccountInfo<'info>,
    pub balance: u64,
}

/// Share ledger backed by the SPL share mint
///
/// Only the holders registered for the current instruction can be minted
/// to or burned from. The mint supply is the total; the vault authority PDA
/// is its only mint authority.
pub struct SplShareLedger<'info> {
    vault: Pubkey,
    token_program: AccountInfo<'info>,
    share_mint: AccountInfo<'info>,
    vault_authority: AccountInfo<'info>,
    asset_mint: Pubkey,
    authority_bump: u8,
    supply: u64,
    holders: Vec<ShareHolder<'info>>,
}

impl<'info> SplShareLedger<'info> {
    pub fn new(
        vault: Pubkey,
        asset_mint: Pubkey,
        authority_bump: u8,
        token_program: &Program<'info, Token>,
        share_mint: &Account<'info, Mint>,
        vault_authority: &AccountInfo<'info>,
    ) -> Self {
        Self {
            vault,
            token_program: token_program.to_account_info(),
            share_mint: share_mint.to_account_info(),
            vault_authority: vault_authority.clone(),
            asset_mint,
            authority_bump,
            supply: share_mint.supply,
            holders: Vec::new(),
        }
    }

    /// Register `token_account` as the share account of `owner`
    pub fn with_holder(
        mut self,
        owner: Pubkey,
        token_account: &Account<'info, TokenAccount>,
        burn_authority: AccountInfo<'info>,
    ) -> Self {
        self.holders.push(ShareHolder {
            owner,
            token_account: token_account.to_account_info(),
            burn_authority,
            balance: token_account.amount,
        });
        self
    }

    fn holder_index(&self, owner: &Pubkey) -> Result<usize> {
        self.holders
            .iter()
            .position(|holder| holder.owner == *owner)
            .ok_or(error!(VaultError::UnknownShareHolder))
    }
}

impl<'info> ShareLedger for SplShareLedger<'info> {
    fn mint(&mut self, account: &Pubkey, shares: u64) -> Result<()> {
        if shares == 0 {
            return Ok(());
        }

        let index = self.holder_index(account)?;
        let supply = self.supply.checked_add(shares).ok_or(VaultError::MathOverflow)?;
        let balance = self.holders[index]
            .balance
            .checked_add(shares)
            .ok_or(VaultError::MathOverflow)?;

        let bump = [self.authority_bump];
        let authority_seeds: &[&[u8]] = &[VAULT_AUTHORITY_SEED, self.asset_mint.as_ref(), &bump];
        let signer_seeds = &[authority_seeds];

        let mint_ctx = CpiContext::new_with_signer(
            self.token_program.clone(),
            MintTo {
                mint: self.share_mint.clone(),
                to: self.holders[index].token_account.clone(),
                authority: self.vault_authority.clone(),
            },
            signer_seeds,
        );
        token::mint_to(mint_ctx, shares)?;

        self.holders[index].balance = balance;
        self.supply = supply;

        emit!(SharesMinted {
            vault: self.vault,
            account: *account,
            shares,
            total_shares: supply,
        });
        Ok(())
    }

    fn burn(&mut self, account: &Pubkey, shares: u64) -> Result<()> {
        if shares == 0 {
            return Ok(());
        }

        let index = self.holder_index(account)?;
        let holder = &self.holders[index];
        require!(shares <= holder.balance, VaultError::InsufficientBalance);

        let accounts = Burn {
            mint: self.share_mint.clone(),
            from: holder.token_account.clone(),
            authority: holder.burn_authority.clone(),
        };

        if holder.burn_authority.key() == self.vault_authority.key() {
            let bump = [self.authority_bump];
            let authority_seeds: &[&[u8]] =
                &[VAULT_AUTHORITY_SEED, self.asset_mint.as_ref(), &bump];
            let signer_seeds = &[authority_seeds];
            token::burn(
                CpiContext::new_with_signer(self.token_program.clone(), accounts, signer_seeds),
                shares,
            )?;
        } else {
            token::burn(CpiContext::new(self.token_program.clone(), accounts), shares)?;
        }

        self.holders[index].balance -= shares;
        // supply >= any single balance
        self.supply -= shares;

        emit!(SharesBurned {
            vault: self.vault,
            account: *account,
            shares,
            total_shares: self.supply,
        });
        Ok(())
    }

    fn balance_of(&self, account: &Pubkey) -> u64 {
        self.holders
            .iter()
            .find(|holder| holder.owner == *account)
            .map(|holder| holder.balance)
            .unwrap_or(0)
    }

    fn total_shares(&self) -> u64 {
        self.supply
    }
}
