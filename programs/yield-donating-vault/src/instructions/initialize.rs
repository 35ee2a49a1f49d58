use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token::{Mint, Token, TokenAccount},
};

use crate::{constants::*, errors::*, events::*, state::*};

/// Construction-time configuration of a vault
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct InitializeParams {
    pub keeper: Pubkey,
    pub emergency_admin: Pubkey,
    pub beneficiary: Pubkey,
    pub loss_absorption_enabled: bool,
    pub withdraw_policy: WithdrawPolicy,
}

/// Initialize a new vault for a given asset token
///
/// Security checklist:
/// ✅ 1. SIGNER VALIDATION: Authority must be signer
/// ✅ 5. PDA SECURITY: Vault state, share mint and authority derived from the asset mint
/// ✅ 9. INITIALIZATION: Beneficiary must be a real account and is fixed here
/// ✅ 10. EVENTS: Emits VaultInitialized event
#[derive(Accounts)]
pub struct Initialize<'info> {
    /// Management role, stored in state
    /// Security: Must be signer, pays for account creation
    #[account(mut)]
    pub authority: Signer<'info>,

    /// Vault state PDA
    /// Security: Initialized once per asset mint
    #[account(
        init,
        payer = authority,
        space = VAULT_STATE_SIZE,
        seeds = [VAULT_SEED, asset_mint.key().as_ref()],
        bump
    )]
    pub vault_state: Account<'info, VaultState>,

    /// Asset token mint (the underlying token users deposit)
    pub asset_mint: Box<Account<'info, Mint>>,

    /// Share token mint PDA, minted only by the vault authority
    /// Security: Mint authority is vault_authority
    #[account(
        init,
        payer = authority,
        seeds = [SHARE_MINT_SEED, asset_mint.key().as_ref()],
        bump,
        mint::decimals = asset_mint.decimals,
        mint::authority = vault_authority,
    )]
    pub share_mint: Box<Account<'info, Mint>>,

    /// Vault authority PDA
    /// Security: Validated by seeds
    /// CHECK: PDA used as mint and token authority, validated by seeds
    #[account(
        seeds = [VAULT_AUTHORITY_SEED, asset_mint.key().as_ref()],
        bump
    )]
    pub vault_authority: UncheckedAccount<'info>,

    /// Vault's idle asset account
    /// Security: Associated token account of vault_authority, recorded in vault_state
    #[account(
        init,
        payer = authority,
        associated_token::mint = asset_mint,
        associated_token::authority = vault_authority,
    )]
    pub vault_token_account: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<Initialize>, params: InitializeParams) -> Result<()> {
    require!(
        params.beneficiary != Pubkey::default(),
        VaultError::InvalidBeneficiary
    );

    let vault_state = &mut ctx.accounts.vault_state;

    vault_state.authority = ctx.accounts.authority.key();
    vault_state.keeper = params.keeper;
    vault_state.emergency_admin = params.emergency_admin;
    vault_state.beneficiary = params.beneficiary;
    vault_state.beneficiary_escrow = Pubkey::default();
    vault_state.asset_mint = ctx.accounts.asset_mint.key();
    vault_state.share_mint = ctx.accounts.share_mint.key();
    vault_state.vault_token_account = ctx.accounts.vault_token_account.key();
    vault_state.last_recorded_value = 0;
    vault_state.last_report = Clock::get()?.unix_timestamp;
    vault_state.shutdown = false;
    vault_state.loss_absorption_enabled = params.loss_absorption_enabled;
    vault_state.withdraw_policy = params.withdraw_policy;
    vault_state.locked = false;
    vault_state.decimals = ctx.accounts.asset_mint.decimals;
    vault_state.bump = ctx.bumps.vault_state;
    vault_state.share_bump = ctx.bumps.share_mint;
    vault_state.authority_bump = ctx.bumps.vault_authority;
    vault_state._reserved = [0; 32];

    emit!(VaultInitialized {
        vault: vault_state.key(),
        authority: vault_state.authority,
        beneficiary: vault_state.beneficiary,
        asset_mint: vault_state.asset_mint,
        share_mint: vault_state.share_mint,
        loss_absorption_enabled: vault_state.loss_absorption_enabled,
        timestamp: vault_state.last_report,
    });

    Ok(())
}
