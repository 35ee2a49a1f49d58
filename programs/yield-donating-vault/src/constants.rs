// Constants for the Yield-Donating Vault program

/// Seed for vault state PDA
pub const VAULT_SEED: &[u8] = b"vault";

/// Seed for share mint PDA
pub const SHARE_MINT_SEED: &[u8] = b"shares";

/// Seed for vault authority PDA (owns every vault token account and mints shares)
pub const VAULT_AUTHORITY_SEED: &[u8] = b"vault_authority";

/// Seed for the reserve position config PDA
pub const POSITION_SEED: &[u8] = b"position";

/// Seed for the token account holding deployed assets
pub const POSITION_TOKEN_SEED: &[u8] = b"position_tokens";

/// Seed for the share account escrowing the beneficiary's buffer
pub const BENEFICIARY_ESCROW_SEED: &[u8] = b"beneficiary_escrow";

/// Basis points denominator for loss tolerances
pub const MAX_BPS: u16 = 10_000;

/// Space for VaultState account (8 discriminator + 8 * 32 pubkeys +
/// 8 last_recorded_value + 8 last_report + 5 flag/policy/decimals bytes +
/// 3 bumps + 32 padding)
pub const VAULT_STATE_SIZE: usize = 8 + (8 * 32) + 8 + 8 + 5 + 3 + 32;

/// Space for ReservePosition account (8 discriminator + 32 vault +
/// 32 token_account + 8 deposit_limit + 1 bump + 32 padding)
pub const RESERVE_POSITION_SIZE: usize = 8 + 32 + 32 + 8 + 1 + 32;
