//! On-chain implementations of the engine's ledger and yield source seams

pub mod reserve_source;
pub mod spl_ledger;

pub use reserve_source::*;
pub use spl_ledger::*;

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Transfer};

use crate::constants::VAULT_AUTHORITY_SEED;

/// Move assets out of a vault-owned token account, signed by the vault authority PDA
pub fn transfer_from_vault<'info>(
    token_program: &AccountInfo<'info>,
    from: &AccountInfo<'info>,
    to: &AccountInfo<'info>,
    vault_authority: &AccountInfo<'info>,
    asset_mint: &Pubkey,
    authority_bump: u8,
    amount: u64,
) -> Result<()> {
    let bump = [authority_bump];
    let authority_seeds: &[&[u8]] = &[VAULT_AUTHORITY_SEED, asset_mint.as_ref(), &bump];
    let signer_seeds = &[authority_seeds];

    let transfer_ctx = CpiContext::new_with_signer(
        token_program.clone(),
        Transfer {
            from: from.clone(),
            to: to.clone(),
            authority: vault_authority.clone(),
        },
        signer_seeds,
    );
    token::transfer(transfer_ctx, amount)
}
