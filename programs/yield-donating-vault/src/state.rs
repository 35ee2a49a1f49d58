use anchor_lang::prelude::*;

use crate::errors::VaultError;
use crate::math::{mul_div, one_unit, Rounding};

/// What `withdraw` does when the yield source cannot free enough assets
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WithdrawPolicy {
    /// Reject the withdrawal with `WithdrawLimitExceeded`
    #[default]
    Revert,
    /// Free what is available and charge the shortfall to the withdrawer
    RealizeShortfall,
}

/// Global vault state: roles, the valuation snapshot and lifecycle flags
///
/// Total shares are not stored here. The share mint supply is the ledger's
/// total and only the vault authority PDA can change it.
#[account]
#[derive(Debug, Default)]
pub struct VaultState {
    /// Management role: configures the position and may act as keeper
    pub authority: Pubkey,          // 32 bytes

    /// May trigger reports
    pub keeper: Pubkey,             // 32 bytes

    /// May shut the vault down and pull funds out of the yield source
    pub emergency_admin: Pubkey,    // 32 bytes

    /// Receives profit shares and absorbs losses; fixed at initialization
    pub beneficiary: Pubkey,        // 32 bytes

    /// Vault-owned share account holding the beneficiary's loss buffer
    pub beneficiary_escrow: Pubkey, // 32 bytes

    /// Mint of the underlying asset token
    pub asset_mint: Pubkey,         // 32 bytes

    /// Mint of the vault share token
    pub share_mint: Pubkey,         // 32 bytes

    /// Vault-owned account holding idle assets; its balance is valued as idle
    pub vault_token_account: Pubkey, // 32 bytes

    /// Total managed value as of the last report, moved by deposits and withdrawals
    pub last_recorded_value: u64,   // 8 bytes

    /// Unix timestamp of the last report
    pub last_report: i64,           // 8 bytes

    /// One-way latch; no deposits once set
    pub shutdown: bool,             // 1 byte

    /// Burn beneficiary shares to cover losses
    pub loss_absorption_enabled: bool, // 1 byte

    /// Behavior on withdraw capacity shortfall
    pub withdraw_policy: WithdrawPolicy, // 1 byte

    /// Held for the duration of each lifecycle operation
    pub locked: bool,               // 1 byte

    /// Asset decimals, shared by the share mint
    pub decimals: u8,               // 1 byte

    /// Bump seed for vault state PDA
    pub bump: u8,                   // 1 byte

    /// Bump seed for share mint PDA
    pub share_bump: u8,             // 1 byte

    /// Bump seed for vault authority PDA
    pub authority_bump: u8,         // 1 byte

    // Padding for future upgrades
    pub _reserved: [u8; 32],        // 32 bytes
}

impl VaultState {
    /// Keeper or management
    pub fn can_report(&self, caller: &Pubkey) -> bool {
        *caller == self.keeper || *caller == self.authority
    }

    /// Emergency admin or management
    pub fn can_act_in_emergency(&self, caller: &Pubkey) -> bool {
        *caller == self.emergency_admin || *caller == self.authority
    }

    /// Latch the vault shut. Returns false when it already was.
    pub fn shutdown(&mut self) -> bool {
        let changed = !self.shutdown;
        self.shutdown = true;
        changed
    }

    /// Take the non-reentrancy latch
    pub fn acquire_lock(&mut self) -> Result<()> {
        require!(!self.locked, VaultError::VaultLocked);
        self.locked = true;
        Ok(())
    }

    pub fn release_lock(&mut self) {
        self.locked = false;
    }

    /// Shares worth `assets` at the recorded price
    ///
    /// - No shares outstanding: 1:1
    /// - Shares outstanding but nothing recorded: 0, the vault is worthless
    /// - Otherwise: assets * total_shares / last_recorded_value
    pub fn convert_to_shares(&self, assets: u64, total_shares: u64, rounding: Rounding) -> Result<u64> {
        if total_shares == 0 {
            return Ok(assets);
        }
        if self.last_recorded_value == 0 {
            return Ok(0);
        }
        mul_div(assets, total_shares, self.last_recorded_value, rounding)
    }

    /// Assets claimed by `shares` at the recorded price
    ///
    /// ERC-4626 formula: assets = shares * last_recorded_value / total_shares,
    /// 1:1 before the first share exists.
    pub fn convert_to_assets(&self, shares: u64, total_shares: u64, rounding: Rounding) -> Result<u64> {
        if total_shares == 0 {
            return Ok(shares);
        }
        mul_div(shares, self.last_recorded_value, total_shares, rounding)
    }

    /// Assets backing one whole share (10^decimals base units)
    pub fn price_per_share(&self, total_shares: u64) -> Result<u64> {
        self.convert_to_assets(one_unit(self.decimals)?, total_shares, Rounding::Down)
    }

    pub fn record_deposit(&mut self, assets: u64) -> Result<()> {
        self.last_recorded_value = self
            .last_recorded_value
            .checked_add(assets)
            .ok_or(VaultError::MathOverflow)?;
        Ok(())
    }

    pub fn record_withdrawal(&mut self, assets: u64) -> Result<()> {
        self.last_recorded_value = self
            .last_recorded_value
            .checked_sub(assets)
            .ok_or(VaultError::MathOverflow)?;
        Ok(())
    }
}

/// Configuration of the reserve yield source backing a vault
///
/// The position token account is owned by the vault authority PDA. Yield
/// shows up as tokens credited to it from outside the vault.
#[account]
#[derive(Debug, Default)]
pub struct ReservePosition {
    /// Vault this position belongs to
    pub vault: Pubkey,              // 32 bytes

    /// Token account holding deployed assets
    pub token_account: Pubkey,      // 32 bytes

    /// Maximum balance the position accepts
    pub deposit_limit: u64,         // 8 bytes

    /// Bump seed for PDA
    pub bump: u8,                   // 1 byte

    // Padding for future upgrades
    pub _reserved: [u8; 32],        // 32 bytes
}
