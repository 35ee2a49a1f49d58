use std::collections::BTreeMap;

use anchor_lang::prelude::*;

use crate::errors::VaultError;

/// Share bookkeeping used by the report engine and the lifecycle controller
///
/// Implementations keep `sum(balance_of(*)) == total_shares()`.
pub trait ShareLedger {
    /// Credit `shares` to `account`. Minting zero is a no-op.
    fn mint(&mut self, account: &Pubkey, shares: u64) -> Result<()>;

    /// Debit `shares` from `account`, failing with `InsufficientBalance`
    /// when the account holds less.
    fn burn(&mut self, account: &Pubkey, shares: u64) -> Result<()>;

    fn balance_of(&self, account: &Pubkey) -> u64;

    fn total_shares(&self) -> u64;
}

/// In-memory ledger for off-chain simulation and tests
#[derive(Clone, Debug, Default)]
pub struct MemoryLedger {
    balances: BTreeMap<Pubkey, u64>,
    total_shares: u64,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Iterate over holders with a non-zero balance
    pub fn holders(&self) -> impl Iterator<Item = (&Pubkey, &u64)> {
        self.balances.iter()
    }

    /// Move shares between holders; the total is untouched
    pub fn transfer(&mut self, from: &Pubkey, to: &Pubkey, shares: u64) -> Result<()> {
        self.burn(from, shares)?;
        self.mint(to, shares)
    }
}

impl ShareLedger for MemoryLedger {
    fn mint(&mut self, account: &Pubkey, shares: u64) -> Result<()> {
        if shares == 0 {
            return Ok(());
        }

        let total_shares = self
            .total_shares
            .checked_add(shares)
            .ok_or(VaultError::MathOverflow)?;
        let balance = self.balances.entry(*account).or_insert(0);
        *balance = balance.checked_add(shares).ok_or(VaultError::MathOverflow)?;
        self.total_shares = total_shares;
        Ok(())
    }

    fn burn(&mut self, account: &Pubkey, shares: u64) -> Result<()> {
        if shares == 0 {
            return Ok(());
        }

        let balance = self.balance_of(account);
        require!(shares <= balance, VaultError::InsufficientBalance);

        if balance == shares {
            self.balances.remove(account);
        } else {
            self.balances.insert(*account, balance - shares);
        }
        // total >= balance by construction
        self.total_shares -= shares;
        Ok(())
    }

    fn balance_of(&self, account: &Pubkey) -> u64 {
        self.balances.get(account).copied().unwrap_or(0)
    }

    fn total_shares(&self) -> u64 {
        self.total_shares
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_conserved(ledger: &MemoryLedger) {
        let sum: u64 = ledger.holders().map(|(_, balance)| *balance).sum();
        assert_eq!(sum, ledger.total_shares());
    }

    #[test]
    fn test_mint_and_burn() {
        let mut ledger = MemoryLedger::new();
        let alice = Pubkey::new_unique();
        let bob = Pubkey::new_unique();

        ledger.mint(&alice, 1000).unwrap();
        ledger.mint(&bob, 500).unwrap();
        ledger.burn(&alice, 300).unwrap();

        assert_eq!(ledger.balance_of(&alice), 700);
        assert_eq!(ledger.balance_of(&bob), 500);
        assert_eq!(ledger.total_shares(), 1200);
        assert_conserved(&ledger);
    }

    #[test]
    fn test_zero_mint_is_noop() {
        let mut ledger = MemoryLedger::new();
        let alice = Pubkey::new_unique();

        ledger.mint(&alice, 0).unwrap();

        assert_eq!(ledger.total_shares(), 0);
        assert_eq!(ledger.holders().count(), 0);
    }

    #[test]
    fn test_burn_more_than_balance_fails() {
        let mut ledger = MemoryLedger::new();
        let alice = Pubkey::new_unique();
        ledger.mint(&alice, 10).unwrap();

        assert!(ledger.burn(&alice, 11).is_err());
        // Failed burn leaves state untouched
        assert_eq!(ledger.balance_of(&alice), 10);
        assert_eq!(ledger.total_shares(), 10);
    }

    #[test]
    fn test_burn_unknown_account_fails() {
        let mut ledger = MemoryLedger::new();
        assert!(ledger.burn(&Pubkey::new_unique(), 1).is_err());
    }

    #[test]
    fn test_mint_overflow_leaves_state_untouched() {
        let mut ledger = MemoryLedger::new();
        let alice = Pubkey::new_unique();
        let bob = Pubkey::new_unique();
        ledger.mint(&alice, u64::MAX).unwrap();

        assert!(ledger.mint(&bob, 1).is_err());
        assert_eq!(ledger.balance_of(&bob), 0);
        assert_eq!(ledger.total_shares(), u64::MAX);
    }

    #[test]
    fn test_transfer_conserves_total() {
        let mut ledger = MemoryLedger::new();
        let alice = Pubkey::new_unique();
        let bob = Pubkey::new_unique();
        ledger.mint(&alice, 100).unwrap();

        ledger.transfer(&alice, &bob, 100).unwrap();

        assert_eq!(ledger.balance_of(&alice), 0);
        assert_eq!(ledger.balance_of(&bob), 100);
        assert_eq!(ledger.total_shares(), 100);
        assert_conserved(&ledger);
    }
}
