use anchor_lang::prelude::*;

/// Event emitted when a new vault is initialized
#[event]
pub struct VaultInitialized {
    pub vault: Pubkey,
    pub authority: Pubkey,
    pub beneficiary: Pubkey,
    pub asset_mint: Pubkey,
    pub share_mint: Pubkey,
    pub loss_absorption_enabled: bool,
    pub timestamp: i64,
}

/// Event emitted when the reserve position and beneficiary escrow are created
#[event]
pub struct PositionInitialized {
    pub vault: Pubkey,
    pub position_token_account: Pubkey,
    pub beneficiary_escrow: Pubkey,
    pub deposit_limit: u64,
    pub timestamp: i64,
}

/// Event emitted when management changes the position's deposit limit
#[event]
pub struct DepositLimitUpdated {
    pub vault: Pubkey,
    pub old_limit: u64,
    pub new_limit: u64,
    pub timestamp: i64,
}

/// Event emitted when assets are deposited
#[event]
pub struct Deposited {
    pub vault: Pubkey,
    pub user: Pubkey,
    pub asset_amount: u64,
    pub shares_minted: u64,
    pub last_recorded_value: u64,
    pub timestamp: i64,
}

/// Event emitted when shares are redeemed
#[event]
pub struct Withdrawn {
    pub vault: Pubkey,
    pub owner: Pubkey,
    pub receiver: Pubkey,
    pub shares_burned: u64,
    pub asset_amount: u64,
    pub realized_loss: u64,
    pub last_recorded_value: u64,
    pub timestamp: i64,
}

/// Event emitted after every report
#[event]
pub struct Reported {
    pub vault: Pubkey,
    pub profit: u64,
    pub loss: u64,
    pub shares_minted: u64,
    pub shares_burned: u64,
    pub unabsorbed_loss: u64,
    pub total_managed_value: u64,
    pub timestamp: i64,
}

/// Event emitted by the share ledger on every mint
#[event]
pub struct SharesMinted {
    pub vault: Pubkey,
    pub account: Pubkey,
    pub shares: u64,
    pub total_shares: u64,
}

/// Event emitted by the share ledger on every burn
#[event]
pub struct SharesBurned {
    pub vault: Pubkey,
    pub account: Pubkey,
    pub shares: u64,
    pub total_shares: u64,
}

/// Event emitted the first time the vault is shut down
#[event]
pub struct ShutdownActivated {
    pub vault: Pubkey,
    pub caller: Pubkey,
    pub timestamp: i64,
}

/// Event emitted when funds are pulled out of the position after shutdown
#[event]
pub struct EmergencyWithdrawn {
    pub vault: Pubkey,
    pub requested: u64,
    pub freed: u64,
    pub timestamp: i64,
}
