use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::{
    adapters::*, constants::*, errors::*, events::*, lifecycle::VaultContext,
    position::PositionManager, state::*,
};

/// Pull assets out of the reserve position after shutdown
///
/// Security checklist:
/// ✅ 1. SIGNER VALIDATION: Caller must be signer
/// ✅ 3. LIFECYCLE: Only after shutdown
/// ✅ 4. AUTHORIZATION: Emergency admin or management only
/// ✅ 7. TOKEN ACCOUNT VALIDATION: Idle and position accounts pinned by address
/// ✅ 10. EVENTS: Emits EmergencyWithdrawn event
#[derive(Accounts)]
pub struct EmergencyWithdraw<'info> {
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

    /// Reserve position config
    /// Security: Validated by seeds derived from vault_state
    #[account(
        seeds = [POSITION_SEED, vault_state.key().as_ref()],
        bump = reserve_position.bump,
    )]
    pub reserve_position: Account<'info, ReservePosition>,

    /// Read for the share total only
    /// Security: Must match vault_state.share_mint
    #[account(address = vault_state.share_mint @ VaultError::InvalidMint)]
    pub share_mint: Box<Account<'info, Mint>>,

    /// Vault authority PDA
    /// Security: Validated by seeds
    /// CHECK: PDA used as authority, validated by seeds
    #[account(
        seeds = [VAULT_AUTHORITY_SEED, vault_state.asset_mint.as_ref()],
        bump = vault_state.authority_bump,
    )]
    pub vault_authority: UncheckedAccount<'info>,

    /// Vault's idle asset account
    /// Security: Must be the account recorded in vault_state
    #[account(
        mut,
        address = vault_state.vault_token_account @ VaultError::InvalidTokenAccount,
    )]
    pub vault_token_account: Box<Account<'info, TokenAccount>>,

    /// Position token account holding deployed assets
    /// Security: Must be the account recorded in reserve_position
    #[account(
        mut,
        address = reserve_position.token_account @ VaultError::InvalidTokenAccount,
    )]
    pub position_token_account: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<EmergencyWithdraw>, amount: u64) -> Result<()> {
    let accounts = &mut *ctx.accounts;
    let idle = accounts.vault_token_account.amount;

    let vault_authority = accounts.vault_authority.to_account_info();
    let mut ledger = SplShareLedger::new(
        accounts.vault_state.key(),
        accounts.vault_state.asset_mint,
        accounts.vault_state.authority_bump,
        &accounts.token_program,
        &accounts.share_mint,
        &vault_authority,
    );
    let source = ReserveYieldSource::new(
        &accounts.vault_state,
        &accounts.reserve_position,
        &accounts.token_program,
        &accounts.vault_token_account,
        &accounts.position_token_account,
        &vault_authority,
    );
    let mut position = PositionManager::new(source, idle);

    let vault_state = &mut accounts.vault_state;
    let freed = VaultContext::new(vault_state, &mut ledger, &mut position).emergency_withdraw(amount)?;

    emit!(EmergencyWithdrawn {
        vault: vault_state.key(),
        requested: amount,
        freed,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
