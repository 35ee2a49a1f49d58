use anchor_lang::prelude::*;

use crate::{constants::*, errors::*, events::*, state::*};

/// Change how much the reserve position accepts
///
/// Security checklist:
/// ✅ 1. SIGNER VALIDATION: Authority must be signer
/// ✅ 4. AUTHORIZATION: has_one = authority
/// ✅ 10. EVENTS: Emits DepositLimitUpdated event
#[derive(Accounts)]
pub struct SetDepositLimit<'info> {
    /// Vault management
    /// Security: Must be signer and match vault_state.authority
    pub authority: Signer<'info>,

    /// Vault state PDA
    /// Security: Validated by seeds
    #[account(
        seeds = [VAULT_SEED, vault_state.asset_mint.as_ref()],
        bump = vault_state.bump,
        has_one = authority @ VaultError::Unauthorized,
    )]
    pub vault_state: Account<'info, VaultState>,

    /// Reserve position config
    /// Security: Validated by seeds derived from vault_state
    #[account(
        mut,
        seeds = [POSITION_SEED, vault_state.key().as_ref()],
        bump = reserve_position.bump,
    )]
    pub reserve_position: Account<'info, ReservePosition>,
}

pub fn handler(ctx: Context<SetDepositLimit>, deposit_limit: u64) -> Result<()> {
    let position = &mut ctx.accounts.reserve_position;
    let old_limit = position.deposit_limit;
    position.deposit_limit = deposit_limit;

    emit!(DepositLimitUpdated {
        vault: position.vault,
        old_limit,
        new_limit: deposit_limit,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
