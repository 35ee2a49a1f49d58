use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::{
    adapters::*, constants::*, errors::*, events::*, lifecycle::VaultContext,
    position::PositionManager, state::*,
};

/// Burn shares and receive their recorded value in assets
///
/// The beneficiary redeems from the escrow by passing it as
/// `owner_share_account`; the vault authority signs that burn.
///
/// Security checklist:
/// ✅ 1. SIGNER VALIDATION: Owner must be signer
/// ✅ 2. ACCOUNT OWNERSHIP: Vault state and position PDAs validated with seeds
/// ✅ 4. AUTHORIZATION: Escrowed shares only burnable by the beneficiary
/// ✅ 6. MATH SAFETY: Loss tolerance checked before funds leave the source
/// ✅ 7. TOKEN ACCOUNT VALIDATION: Idle and position accounts pinned by address
/// ✅ 10. EVENTS: Emits Withdrawn event
#[derive(Accounts)]
pub struct Withdraw<'info> {
    /// Share owner
    /// Security: Must be signer
    pub owner: Signer<'info>,

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

    /// Shares to burn: the owner's own account, or the escrow for the beneficiary
    /// Security: Share mint, owned by the signer unless it is the beneficiary's escrow
    #[account(
        mut,
        constraint = owner_share_account.mint == vault_state.share_mint @ VaultError::InvalidMint,
        constraint = owner_share_account.owner == owner.key()
            || (owner.key() == vault_state.beneficiary
                && owner_share_account.key() == vault_state.beneficiary_escrow)
            @ VaultError::InvalidOwner,
    )]
    pub owner_share_account: Box<Account<'info, TokenAccount>>,

    /// Receives the assets
    /// Security: Must be the asset mint
    #[account(
        mut,
        constraint = receiver_asset_account.mint == vault_state.asset_mint @ VaultError::InvalidMint,
    )]
    pub receiver_asset_account: Box<Account<'info, TokenAccount>>,

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

pub fn handler(ctx: Context<Withdraw>, shares: u64, max_loss_bps: u16) -> Result<()> {
    let accounts = &mut *ctx.accounts;
    let idle = accounts.vault_token_account.amount;
    let owner = accounts.owner.key();
    let receiver = accounts.receiver_asset_account.key();

    let vault_authority = accounts.vault_authority.to_account_info();
    let burn_authority = if accounts.owner_share_account.owner == vault_authority.key() {
        vault_authority.clone()
    } else {
        accounts.owner.to_account_info()
    };

    let mut ledger = SplShareLedger::new(
        accounts.vault_state.key(),
        accounts.vault_state.asset_mint,
        accounts.vault_state.authority_bump,
        &accounts.token_program,
        &accounts.share_mint,
        &vault_authority,
    )
    .with_holder(owner, &accounts.owner_share_account, burn_authority);
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
    let outcome = VaultContext::new(vault_state, &mut ledger, &mut position).withdraw(
        shares,
        &owner,
        &receiver,
        max_loss_bps,
    )?;

    transfer_from_vault(
        &accounts.token_program.to_account_info(),
        &accounts.vault_token_account.to_account_info(),
        &accounts.receiver_asset_account.to_account_info(),
        &vault_authority,
        &vault_state.asset_mint,
        vault_state.authority_bump,
        outcome.assets,
    )?;

    emit!(Withdrawn {
        vault: vault_state.key(),
        owner,
        receiver,
        shares_burned: shares,
        asset_amount: outcome.assets,
        realized_loss: outcome.loss,
        last_recorded_value: vault_state.last_recorded_value,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
