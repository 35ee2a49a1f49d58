use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::{
    adapters::*, constants::*, errors::*, events::*, lifecycle::VaultContext,
    position::PositionManager, state::*,
};

/// Keeper harvest: deploy idle assets and recognize profit or loss
///
/// Security checklist:
/// ✅ 1. SIGNER VALIDATION: Caller must be signer
/// ✅ 2. ACCOUNT OWNERSHIP: Vault state and position PDAs validated with seeds
/// ✅ 4. AUTHORIZATION: Keeper or management only
/// ✅ 7. TOKEN ACCOUNT VALIDATION: Idle, position and escrow accounts pinned by address
/// ✅ 10. EVENTS: Emits Reported event
#[derive(Accounts)]
pub struct ProcessReport<'info> {
    /// Keeper or management
    /// Security: Must be signer holding a reporting role
    #[account(constraint = vault_state.can_report(&caller.key()) @ VaultError::Unauthorized)]
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

    /// Share mint
    /// Security: Must match vault_state.share_mint
    #[account(
        mut,
        address = vault_state.share_mint @ VaultError::InvalidMint,
    )]
    pub share_mint: Box<Account<'info, Mint>>,

    /// Vault authority PDA
    /// Security: Validated by seeds
    /// CHECK: PDA used as authority, validated by seeds
    #[account(
        seeds = [VAULT_AUTHORITY_SEED, vault_state.asset_mint.as_ref()],
        bump = vault_state.authority_bump,
    )]
    pub vault_authority: UncheckedAccount<'info>,

    /// Beneficiary's share buffer
    /// Security: Must be the escrow recorded in vault_state
    #[account(
        mut,
        address = vault_state.beneficiary_escrow @ VaultError::InvalidOwner,
    )]
    pub beneficiary_escrow: Box<Account<'info, TokenAccount>>,

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

pub fn handler(ctx: Context<ProcessReport>) -> Result<()> {
    let accounts = &mut *ctx.accounts;
    let idle = accounts.vault_token_account.amount;
    let beneficiary = accounts.vault_state.beneficiary;

    let vault_authority = accounts.vault_authority.to_account_info();
    let mut ledger = SplShareLedger::new(
        accounts.vault_state.key(),
        accounts.vault_state.asset_mint,
        accounts.vault_state.authority_bump,
        &accounts.token_program,
        &accounts.share_mint,
        &vault_authority,
    )
    .with_holder(
        beneficiary,
        &accounts.beneficiary_escrow,
        vault_authority.clone(),
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
    let outcome = VaultContext::new(vault_state, &mut ledger, &mut position).report()?;

    let timestamp = Clock::get()?.unix_timestamp;
    vault_state.last_report = timestamp;

    emit!(Reported {
        vault: vault_state.key(),
        profit: outcome.profit,
        loss: outcome.loss,
        shares_minted: outcome.shares_minted,
        shares_burned: outcome.shares_burned,
        unabsorbed_loss: outcome.unabsorbed_loss,
        total_managed_value: outcome.total_managed_value,
        timestamp,
    });

    Ok(())
}
