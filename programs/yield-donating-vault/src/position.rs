use anchor_lang::prelude::*;

use crate::errors::VaultError;
use crate::yield_source::YieldSource;

/// Tracks idle assets held by the vault and moves them in and out of the
/// yield source
pub struct PositionManager<Y: YieldSource> {
    source: Y,
    idle: u64,
}

impl<Y: YieldSource> PositionManager<Y> {
    pub fn new(source: Y, idle: u64) -> Self {
        Self { source, idle }
    }

    pub fn source(&self) -> &Y {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut Y {
        &mut self.source
    }

    /// Assets sitting in the vault, not deployed
    pub fn idle(&self) -> u64 {
        self.idle
    }

    /// Account for assets that arrived in the vault
    pub fn credit_idle(&mut self, amount: u64) -> Result<()> {
        self.idle = self.idle.checked_add(amount).ok_or(VaultError::MathOverflow)?;
        Ok(())
    }

    /// Account for assets leaving the vault
    pub fn debit_idle(&mut self, amount: u64) -> Result<()> {
        self.idle = self
            .idle
            .checked_sub(amount)
            .ok_or(VaultError::InsufficientIdleAssets)?;
        Ok(())
    }

    /// Deploy `amount` idle assets into the yield source
    ///
    /// The source is trusted to take the full amount. Anything it leaves in
    /// the vault token account is seen as idle again the next time the
    /// vault balance is loaded.
    pub fn deploy_idle(&mut self, amount: u64) -> Result<()> {
        if amount == 0 {
            return Ok(());
        }
        require!(amount <= self.idle, VaultError::InsufficientIdleAssets);

        self.source.deposit(amount).map_err(source_unavailable)?;
        self.idle -= amount;
        Ok(())
    }

    /// Pull up to `amount` out of the yield source into idle.
    ///
    /// Returns the amount actually freed, which may fall short of the
    /// request. The shortfall is never retried here.
    pub fn free_funds(&mut self, amount: u64) -> Result<u64> {
        if amount == 0 {
            return Ok(0);
        }

        let freed = self.source.withdraw(amount).map_err(source_unavailable)?;
        self.credit_idle(freed)?;
        Ok(freed)
    }

    /// Idle assets plus the position's current value, read fresh every call
    pub fn total_managed_value(&self) -> Result<u64> {
        let deployed = self.source.current_value()?;
        self.idle
            .checked_add(deployed)
            .ok_or(error!(VaultError::MathOverflow))
    }

    /// Idle assets the source would accept right now
    pub fn deployable_idle(&self) -> Result<u64> {
        Ok(self.idle.min(self.source.deployable_capacity()?))
    }
}

fn source_unavailable(err: anchor_lang::error::Error) -> anchor_lang::error::Error {
    msg!("yield source call failed: {}", err);
    error!(VaultError::YieldSourceUnavailable)
}
