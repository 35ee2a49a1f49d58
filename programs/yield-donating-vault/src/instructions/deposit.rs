use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token::{self, Mint, Token, TokenAccount, Transfer},
};

use crate::{
    adapters::*, constants::*, errors::*, events::*, lifecycle::VaultContext,
    position::PositionManager, state::*,
};

/// Deposit assets into the vault and receive shares
///
/// Security checklist:
/// ✅ 1. SIGNER VALIDATION: User must be signer
/// ✅ 2. ACCOUNT OWNERSHIP: Vault state and position PDAs validated with seeds
/// ✅ 3. LIFECYCLE: Rejected once the vault is shut down
/// ✅ 6. MATH SAFETY: Share and value overflow checked before assets are deployed
/// ✅ 7. TOKEN ACCOUNT VALIDATION: Idle and position accounts pinned by address
/// ✅ 10. EVENTS: Emits Deposited event
#[derive(Accounts)]
pub struct Deposit<'info> {
    /// User depositing assets
    /// Security: Must be signer
    #[account(mut)]
    pub user: Signer<'info>,

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

    /// User's asset token account (source)
    /// Security: Must be owned by user and correct mint
    #[account(
        mut,
        constraint = user_asset_account.mint == vault_state.asset_mint @ VaultError::InvalidMint,
        constraint = user_asset_account.owner == user.key() @ VaultError::InvalidOwner,
    )]
    pub user_asset_account: Box<Account<'info, TokenAccount>>,

    /// User's share token account (destination), created on first deposit
    /// Security: Associated token account of user for the share mint
    #[account(
        init_if_needed,
        payer = user,
        associated_token::mint = share_mint,
        associated_token::authority = user,
    )]
    pub user_share_account: Box<Account<'info, TokenAccount>>,

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
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<Deposit>, amount: u64) -> Result<()> {
    let accounts = &mut *ctx.accounts;
    let idle = accounts.vault_token_account.amount;
    let user = accounts.user.key();

    // Assets land in idle before the engine prices and deploys them
    let transfer_ctx = CpiContext::new(
        accounts.token_program.to_account_info(),
        Transfer {
            from: accounts.user_asset_account.to_account_info(),
            to: accounts.vault_token_account.to_account_info(),
            authority: accounts.user.to_account_info(),
        },
    );
    token::transfer(transfer_ctx, amount)?;

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
        user,
        &accounts.user_share_account,
        accounts.user.to_account_info(),
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
    let shares = VaultContext::new(vault_state, &mut ledger, &mut position).deposit(amount, &user)?;

    emit!(Deposited {
        vault: vault_state.key(),
        user,
        asset_amount: amount,
        shares_minted: shares,
        last_recorded_value: vault_state.last_recorded_value,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
