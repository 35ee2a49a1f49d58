use anchor_lang::prelude::*;

use crate::constants::MAX_BPS;
use crate::errors::VaultError;
use crate::ledger::ShareLedger;
use crate::math::{mul_div, Rounding};
use crate::position::PositionManager;
use crate::report::{self, ReportOutcome};
use crate::state::{VaultState, WithdrawPolicy};
use crate::yield_source::YieldSource;

/// Result of a withdrawal
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WithdrawOutcome {
    /// Assets handed to the receiver
    pub assets: u64,
    /// Assets owed but not freed by the yield source, charged to the withdrawer
    pub loss: u64,
}

/// Read-only view of the vault
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VaultSnapshot {
    pub total_managed_value: u64,
    pub price_per_share: u64,
    pub available_deposit_limit: u64,
    pub available_withdraw_limit: u64,
    pub total_shares: u64,
    pub last_recorded_value: u64,
    pub shutdown: bool,
}

/// Entry points of the vault, wiring state, ledger and position together.
///
/// Every mutating operation runs under the vault's non-reentrancy latch and
/// talks to the yield source before touching the ledger or the snapshot, so
/// a failed adapter call leaves both unchanged.
pub struct VaultContext<'a, L: ShareLedger, Y: YieldSource> {
    pub state: &'a mut VaultState,
    pub ledger: &'a mut L,
    pub position: &'a mut PositionManager<Y>,
}

impl<'a, L: ShareLedger, Y: YieldSource> VaultContext<'a, L, Y> {
    pub fn new(
        state: &'a mut VaultState,
        ledger: &'a mut L,
        position: &'a mut PositionManager<Y>,
    ) -> Self {
        Self {
            state,
            ledger,
            position,
        }
    }

    fn non_reentrant<T>(&mut self, op: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        self.state.acquire_lock()?;
        let result = op(self);
        self.state.release_lock();
        result
    }

    /// Deposit `amount` assets already received into idle and mint shares
    /// to `depositor` at the current price.
    pub fn deposit(&mut self, amount: u64, depositor: &Pubkey) -> Result<u64> {
        self.non_reentrant(|vault| {
            require!(!vault.state.shutdown, VaultError::VaultShutdown);
            require!(amount > 0, VaultError::InvalidAmount);
            require!(
                amount <= vault.available_deposit_limit()?,
                VaultError::DepositLimitExceeded
            );

            let shares = vault.state.convert_to_shares(
                amount,
                vault.ledger.total_shares(),
                Rounding::Down,
            )?;
            require!(shares > 0, VaultError::ZeroShares);

            // Nothing may fail once the assets are in the source
            vault
                .ledger
                .total_shares()
                .checked_add(shares)
                .ok_or(VaultError::MathOverflow)?;
            vault
                .state
                .last_recorded_value
                .checked_add(amount)
                .ok_or(VaultError::MathOverflow)?;

            vault.position.credit_idle(amount)?;
            if let Err(err) = vault.position.deploy_idle(amount) {
                vault.position.debit_idle(amount)?;
                return Err(err);
            }

            vault.ledger.mint(depositor, shares)?;
            vault.state.record_deposit(amount)?;
            Ok(shares)
        })
    }

    /// Burn `shares` from `owner` and pay out their recorded value.
    ///
    /// Idle assets cover the payout first, the rest is freed from the yield
    /// source. What the source cannot free is a loss to this withdrawer,
    /// bounded by `max_loss_bps` of the assets owed. That bound is checked
    /// against the source's advertised capacity before any funds move; a
    /// source that then frees less than it advertised still charges the
    /// difference to this withdrawer, and the withdrawal completes. The
    /// caller moves `assets` to `receiver`.
    pub fn withdraw(
        &mut self,
        shares: u64,
        owner: &Pubkey,
        receiver: &Pubkey,
        max_loss_bps: u16,
    ) -> Result<WithdrawOutcome> {
        self.non_reentrant(|vault| {
            require!(shares > 0, VaultError::InvalidAmount);
            require!(max_loss_bps <= MAX_BPS, VaultError::InvalidLossTolerance);
            require!(
                shares <= vault.ledger.balance_of(owner),
                VaultError::InsufficientShares
            );

            let total_shares = vault.ledger.total_shares();
            let assets_owed = vault
                .state
                .convert_to_assets(shares, total_shares, Rounding::Down)?;
            require!(assets_owed > 0, VaultError::ZeroAssets);

            let idle = vault.position.idle();
            let mut to_free = assets_owed.saturating_sub(idle);
            if to_free > 0 {
                let capacity = vault.position.source().withdrawable_capacity()?;
                if to_free > capacity {
                    match vault.state.withdraw_policy {
                        WithdrawPolicy::Revert => {
                            return err!(VaultError::WithdrawLimitExceeded);
                        }
                        WithdrawPolicy::RealizeShortfall => to_free = capacity,
                    }
                }
            }

            let expected = assets_owed.min(idle.saturating_add(to_free));
            let expected_loss = assets_owed - expected;
            if expected_loss > 0 {
                let tolerated = mul_div(
                    assets_owed,
                    max_loss_bps as u64,
                    MAX_BPS as u64,
                    Rounding::Down,
                )?;
                require!(expected_loss <= tolerated, VaultError::TooMuchLoss);
            }

            // From here on nothing fails after the source has moved funds
            vault.position.free_funds(to_free)?;

            let assets = assets_owed.min(vault.position.idle());
            let loss = assets_owed - assets;

            vault.ledger.burn(owner, shares)?;
            vault.position.debit_idle(assets)?;
            vault.state.record_withdrawal(assets_owed)?;

            if loss > expected_loss {
                msg!("yield source freed {} less than advertised", loss - expected_loss);
            }
            msg!("withdraw {} shares for {} to {}", shares, assets, receiver);
            Ok(WithdrawOutcome { assets, loss })
        })
    }

    /// Deploy idle assets when the vault is live, then reconcile the valuation.
    ///
    /// After shutdown idle assets stay in the vault.
    pub fn report(&mut self) -> Result<ReportOutcome> {
        self.non_reentrant(|vault| {
            if !vault.state.shutdown {
                let deployable = vault.position.deployable_idle()?;
                vault.position.deploy_idle(deployable)?;
            }
            report::report(vault.state, vault.ledger, vault.position)
        })
    }

    /// Pull `amount` out of the yield source after shutdown.
    ///
    /// No capacity pre-check, no share or snapshot changes; the next report
    /// realizes whatever value moved.
    pub fn emergency_withdraw(&mut self, amount: u64) -> Result<u64> {
        self.non_reentrant(|vault| {
            require!(vault.state.shutdown, VaultError::VaultNotShutdown);
            vault.position.free_funds(amount)
        })
    }

    /// Latch the vault shut. Returns false when it already was.
    pub fn shutdown(&mut self) -> bool {
        self.state.shutdown()
    }

    pub fn total_managed_value(&self) -> Result<u64> {
        self.position.total_managed_value()
    }

    pub fn price_per_share(&self) -> Result<u64> {
        self.state.price_per_share(self.ledger.total_shares())
    }

    /// Zero once shut down, otherwise what the yield source will accept
    pub fn available_deposit_limit(&self) -> Result<u64> {
        if self.state.shutdown {
            return Ok(0);
        }
        self.position.source().deployable_capacity()
    }

    /// Idle assets plus what the yield source can release
    pub fn available_withdraw_limit(&self) -> Result<u64> {
        let withdrawable = self.position.source().withdrawable_capacity()?;
        Ok(self.position.idle().saturating_add(withdrawable))
    }

    pub fn convert_to_shares(&self, assets: u64) -> Result<u64> {
        self.state
            .convert_to_shares(assets, self.ledger.total_shares(), Rounding::Down)
    }

    pub fn convert_to_assets(&self, shares: u64) -> Result<u64> {
        self.state
            .convert_to_assets(shares, self.ledger.total_shares(), Rounding::Down)
    }

    /// Shares `owner` can redeem without hitting the withdraw limit
    pub fn max_redeem(&self, owner: &Pubkey) -> Result<u64> {
        let balance = self.ledger.balance_of(owner);
        if self.state.withdraw_policy == WithdrawPolicy::RealizeShortfall {
            return Ok(balance);
        }
        let redeemable = self.convert_to_shares(self.available_withdraw_limit()?)?;
        Ok(balance.min(redeemable))
    }

    pub fn snapshot(&self) -> Result<VaultSnapshot> {
        Ok(VaultSnapshot {
            total_managed_value: self.total_managed_value()?,
            price_per_share: self.price_per_share()?,
            available_deposit_limit: self.available_deposit_limit()?,
            available_withdraw_limit: self.available_withdraw_limit()?,
            total_shares: self.ledger.total_shares(),
            last_recorded_value: self.state.last_recorded_value,
            shutdown: self.state.shutdown,
        })
    }
}
