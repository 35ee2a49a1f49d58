use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::{constants::*, errors::*, events::*, state::*};

/// Create the reserve position the vault deploys into, and the escrow that
/// holds the beneficiary's shares
///
/// Security checklist:
/// ✅ 1. SIGNER VALIDATION: Authority must be signer
/// ✅ 4. AUTHORIZATION: has_one = authority
/// ✅ 5. PDA SECURITY: Position and escrow accounts derived from vault_state and owned by the vault authority
/// ✅ 10. EVENTS: Emits PositionInitialized event
#[derive(Accounts)]
pub struct InitializePosition<'info> {
    /// Vault management, pays for the new accounts
    /// Security: Must be signer and match vault_state.authority
    #[account(mut)]
    pub authority: Signer<'info>,

    /// Vault state PDA
    /// Security: Validated by seeds
    #[account(
        mut,
        seeds = [VAULT_SEED, vault_state.asset_mint.as_ref()],
        bump = vault_state.bump,
        has_one = authority @ VaultError::Unauthorized,
    )]
    pub vault_state: Account<'info, VaultState>,

    /// Asset mint
    /// Security: Must match vault_state.asset_mint
    #[account(address = vault_state.asset_mint @ VaultError::InvalidMint)]
    pub asset_mint: Box<Account<'info, Mint>>,

    /// Share mint
    /// Security: Must match vault_state.share_mint
    #[account(address = vault_state.share_mint @ VaultError::InvalidMint)]
    pub share_mint: Box<Account<'info, Mint>>,

    /// Vault authority PDA
    /// Security: Validated by seeds
    /// CHECK: PDA used as token authority, validated by seeds
    #[account(
        seeds = [VAULT_AUTHORITY_SEED, vault_state.asset_mint.as_ref()],
        bump = vault_state.authority_bump,
    )]
    pub vault_authority: UncheckedAccount<'info>,

    /// Reserve position config PDA
    #[account(
        init,
        payer = authority,
        space = RESERVE_POSITION_SIZE,
        seeds = [POSITION_SEED, vault_state.key().as_ref()],
        bump
    )]
    pub reserve_position: Account<'info, ReservePosition>,

    /// Holds deployed assets
    /// Security: PDA token account owned by vault_authority
    #[account(
        init,
        payer = authority,
        seeds = [POSITION_TOKEN_SEED, vault_state.key().as_ref()],
        bump,
        token::mint = asset_mint,
        token::authority = vault_authority,
    )]
    pub position_token_account: Box<Account<'info, TokenAccount>>,

    /// Holds the beneficiary's shares so losses can burn them
    /// Security: PDA token account owned by vault_authority
    #[account(
        init,
        payer = authority,
        seeds = [BENEFICIARY_ESCROW_SEED, vault_state.key().as_ref()],
        bump,
        token::mint = share_mint,
        token::authority = vault_authority,
    )]
    pub beneficiary_escrow: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<InitializePosition>, deposit_limit: u64) -> Result<()> {
    let vault_key = ctx.accounts.vault_state.key();

    let position = &mut ctx.accounts.reserve_position;
    position.vault = vault_key;
    position.token_account = ctx.accounts.position_token_account.key();
    position.deposit_limit = deposit_limit;
    position.bump = ctx.bumps.reserve_position;
    position._reserved = [0; 32];

    ctx.accounts.vault_state.beneficiary_escrow = ctx.accounts.beneficiary_escrow.key();

    emit!(PositionInitialized {
        vault: vault_key,
        position_token_account: position.token_account,
        beneficiary_escrow: ctx.accounts.beneficiary_escrow.key(),
        deposit_limit,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
