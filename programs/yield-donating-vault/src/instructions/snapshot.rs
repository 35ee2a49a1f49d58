use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::{
    adapters::*, constants::*, errors::*, lifecycle::{VaultContext, VaultSnapshot},
    position::PositionManager, state::*,
};

/// Read-only valuation and limits, returned as instruction return data
///
/// Security checklist:
/// ✅ 2. ACCOUNT OWNERSHIP: Vault state and position PDAs validated with seeds
/// ✅ 7. TOKEN ACCOUNT VALIDATION: Idle and position accounts pinned by address
#[derive(Accounts)]
pub struct Snapshot<'info> {
    /// Vault state PDA
    /// Security: Validated by seeds
    #[account(
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
    #[account(address = vault_state.share_mint @ VaultError::InvalidMint)]
    pub share_mint: Box<Account<'info, Mint>>,

    /// Vault authority PDA
    /// Security: Validated by seeds
    /// CHECK: PDA, validated by seeds
    #[account(
        seeds = [VAULT_AUTHORITY_SEED, vault_state.asset_mint.as_ref()],
        bump = vault_state.authority_bump,
    )]
    pub vault_authority: UncheckedAccount<'info>,

    /// Vault's idle asset account
    /// Security: Must be the account recorded in vault_state
    #[account(
        address = vault_state.vault_token_account @ VaultError::InvalidTokenAccount,
    )]
    pub vault_token_account: Box<Account<'info, TokenAccount>>,

    /// Position token account holding deployed assets
    /// Security: Must be the account recorded in reserve_position
    #[account(address = reserve_position.token_account @ VaultError::InvalidTokenAccount)]
    pub position_token_account: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<Snapshot>) -> Result<VaultSnapshot> {
    let accounts = &ctx.accounts;
    // Views never persist; work on a copy of the state
    let mut vault_state: VaultState = (*accounts.vault_state).clone();

    let vault_authority = accounts.vault_authority.to_account_info();
    let mut ledger = SplShareLedger::new(
        accounts.vault_state.key(),
        vault_state.asset_mint,
        vault_state.authority_bump,
        &accounts.token_program,
        &accounts.share_mint,
        &vault_authority,
    );
    let source = ReserveYieldSource::new(
        &vault_state,
        &accounts.reserve_position,
        &accounts.token_program,
        &accounts.vault_token_account,
        &accounts.position_token_account,
        &vault_authority,
    );
    let mut position = PositionManager::new(source, accounts.vault_token_account.amount);

    VaultContext::new(&mut vault_state, &mut ledger, &mut position).snapshot()
}
