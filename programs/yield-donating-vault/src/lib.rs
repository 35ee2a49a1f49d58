// Yield-donating vault: share-based accounting where realized profit is
// minted as shares to a beneficiary and losses burn those shares first.
// Architecture: one reserve yield source per vault behind a trait seam

use anchor_lang::prelude::*;

pub mod adapters;
pub mod constants;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod ledger;
pub mod lifecycle;
pub mod math;
pub mod position;
pub mod report;
pub mod state;
pub mod yield_source;

use instructions::*;
use lifecycle::VaultSnapshot;

declare_id!("A3em3Jnxx7kZuHNcymRSugVyNH784yT4CnPsUDY55jmT");

#[program]
pub mod yield_donating_vault {
    use super::*;

    /// Initialize a new vault for a given asset token
    ///
    /// Security considerations:
    /// - Validates authority is signer
    /// - Beneficiary is fixed here and cannot change
    /// - Creates share mint with the vault authority PDA as mint authority
    pub fn initialize(ctx: Context<Initialize>, params: InitializeParams) -> Result<()> {
        instructions::initialize::handler(ctx, params)
    }

    /// Create the reserve position and the beneficiary's share escrow
    pub fn initialize_position(ctx: Context<InitializePosition>, deposit_limit: u64) -> Result<()> {
        instructions::initialize_position::handler(ctx, deposit_limit)
    }

    /// Change how much the reserve position accepts
    pub fn set_deposit_limit(ctx: Context<SetDepositLimit>, deposit_limit: u64) -> Result<()> {
        instructions::set_deposit_limit::handler(ctx, deposit_limit)
    }

    /// Deposit assets into the vault and receive shares
    ///
    /// Security considerations:
    /// - Validates user token accounts (mint, owner)
    /// - Rejected once the vault is shut down
    /// - Assets are deployed before shares are minted
    pub fn deposit(ctx: Context<Deposit>, amount: u64) -> Result<()> {
        instructions::deposit::handler(ctx, amount)
    }

    /// Redeem shares for assets at the recorded price
    ///
    /// Security considerations:
    /// - Owner must sign; the beneficiary redeems from the escrow
    /// - Realized shortfall is bounded by `max_loss_bps`
    /// - Allowed after shutdown
    pub fn withdraw(ctx: Context<Withdraw>, shares: u64, max_loss_bps: u16) -> Result<()> {
        instructions::withdraw::handler(ctx, shares, max_loss_bps)
    }

    /// Recognize profit or loss since the last report
    ///
    /// Keeper or management only. Profit mints shares to the beneficiary,
    /// loss burns them first.
    pub fn report(ctx: Context<ProcessReport>) -> Result<()> {
        instructions::process_report::handler(ctx)
    }

    /// Stop deposits permanently
    pub fn shutdown(ctx: Context<Shutdown>) -> Result<()> {
        instructions::shutdown::handler(ctx)
    }

    /// Free assets from the reserve position into idle after shutdown
    pub fn emergency_withdraw(ctx: Context<EmergencyWithdraw>, amount: u64) -> Result<()> {
        instructions::emergency_withdraw::handler(ctx, amount)
    }

    /// Valuation, price per share and current limits
    pub fn snapshot(ctx: Context<Snapshot>) -> Result<VaultSnapshot> {
        instructions::snapshot::handler(ctx)
    }
}
