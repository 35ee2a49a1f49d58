use anchor_lang::prelude::*;

use crate::{constants::*, errors::*, events::*, state::*};

/// Permanently stop deposits. Calling again is a no-op.
///
/// Security checklist:
/// ✅ 1. SIGNER VALIDATION: Caller must be signer
/// ✅ 4. AUTHORIZATION: Emergency admin or management only
/// ✅ 10. EVENTS: Emits ShutdownActivated on the first call only
#[derive(Accounts)]
pub struct Shutdown<'info> {
    /// Emergency admin or management
    /// Security: Must be signer holding an emergency role
    #[account(constraint = vault_state.can_act_in_emergency(&caller.key()) @ VaultError::Unauthorized)]
    pub caller: Signer<'info>,

    /// Vault state PDA
    /// Security: Validated by seeds
    #[account(
        mut,
        seeds = [VAULT_SEED, vault_state.asset_mint.as_ref()],
        bump = vault_state.bump,
    )]
    pub vault_state: Account<'info, VaultState>,
}

pub fn handler(ctx: Context<Shutdown>) -> Result<()> {
    let vault_state = &mut ctx.accounts.vault_state;

    if vault_state.shutdown() {
        emit!(ShutdownActivated {
            vault: vault_state.key(),
            caller: ctx.accounts.caller.key(),
            timestamp: Clock::get()?.unix_timestamp,
        });
    }

    Ok(())
}
