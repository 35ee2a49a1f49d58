use anchor_lang::prelude::*;

/// Custom error codes for the Yield-Donating Vault program
#[error_code]
pub enum VaultError {
    #[msg("Amount must be greater than zero")]
    InvalidAmount,

    #[msg("Vault is shut down - deposits are permanently disabled")]
    VaultShutdown,

    #[msg("Vault is not shut down")]
    VaultNotShutdown,

    #[msg("Deposit exceeds the yield source's deployable capacity")]
    DepositLimitExceeded,

    #[msg("Withdrawal exceeds the assets that can currently be freed")]
    WithdrawLimitExceeded,

    #[msg("Owner does not hold enough shares")]
    InsufficientShares,

    #[msg("Share balance too low for burn")]
    InsufficientBalance,

    #[msg("Not enough idle assets in the vault")]
    InsufficientIdleAssets,

    #[msg("Yield source rejected the call")]
    YieldSourceUnavailable,

    #[msg("Deposit would mint zero shares")]
    ZeroShares,

    #[msg("Shares are worth zero assets")]
    ZeroAssets,

    #[msg("Realized withdrawal loss exceeds the caller's tolerance")]
    TooMuchLoss,

    #[msg("Loss tolerance must not exceed 10000 basis points")]
    InvalidLossTolerance,

    #[msg("Vault operation already in progress")]
    VaultLocked,

    #[msg("Share holder account was not supplied to this instruction")]
    UnknownShareHolder,

    #[msg("Math overflow occurred during calculation")]
    MathOverflow,

    #[msg("Cannot divide by zero")]
    DivisionByZero,

    #[msg("Invalid token mint - does not match vault")]
    InvalidMint,

    #[msg("Invalid token account owner")]
    InvalidOwner,

    #[msg("Unauthorized - caller lacks the required vault role")]
    Unauthorized,

    #[msg("Beneficiary must be a non-default account")]
    InvalidBeneficiary,

    #[msg("Token account does not match the account recorded by the vault")]
    InvalidTokenAccount,
}

/// Assert that `result` failed with the given vault error code
#[cfg(test)]
pub(crate) fn assert_vault_error<T: std::fmt::Debug>(result: Result<T>, expected: VaultError) {
    let code = anchor_lang::error::ERROR_CODE_OFFSET + expected as u32;
    match result {
        Err(anchor_lang::error::Error::AnchorError(err)) => {
            assert_eq!(err.error_code_number, code, "{}", err.error_msg)
        }
        other => panic!("expected error code {code}, got {other:?}"),
    }
}
