use anchor_lang::prelude::*;

/// Capability interface to the external yield-bearing position
///
/// The vault trusts whatever the implementation reports and never looks at
/// the source's own accounting. Capacities can change between a query and
/// the following `deposit`/`withdraw`, so either call may fail.
pub trait YieldSource {
    /// Assets the source will accept right now
    fn deployable_capacity(&self) -> Result<u64>;

    /// Assets the source can release right now
    fn withdrawable_capacity(&self) -> Result<u64>;

    /// Value of the vault's position in asset units
    fn current_value(&self) -> Result<u64>;

    /// Move `amount` idle assets into the position
    fn deposit(&mut self, amount: u64) -> Result<()>;

    /// Release up to `amount` assets back to the vault, returning what was freed
    fn withdraw(&mut self, amount: u64) -> Result<u64>;
}

#[cfg(test)]
pub(crate) mod mock {
    use super::*;
    use crate::errors::VaultError;

    /// Lending-market stand-in with adjustable liquidity
    #[derive(Debug, Default)]
    pub struct MockYieldSource {
        pub value: u64,
        pub deposit_limit: u64,
        /// Upper bound on what `withdraw` can free, None means the whole value
        pub liquidity: Option<u64>,
        /// Assets silently lost on each withdraw (slippage)
        pub withdraw_haircut: u64,
        pub fail_calls: bool,
    }

    impl MockYieldSource {
        pub fn with_limit(deposit_limit: u64) -> Self {
            Self {
                deposit_limit,
                ..Default::default()
            }
        }
    }

    impl YieldSource for MockYieldSource {
        fn deployable_capacity(&self) -> Result<u64> {
            Ok(self.deposit_limit.saturating_sub(self.value))
        }

        fn withdrawable_capacity(&self) -> Result<u64> {
            Ok(self.liquidity.unwrap_or(self.value).min(self.value))
        }

        fn current_value(&self) -> Result<u64> {
            Ok(self.value)
        }

        fn deposit(&mut self, amount: u64) -> Result<()> {
            require!(!self.fail_calls, VaultError::InvalidAmount);
            self.value += amount;
            Ok(())
        }

        fn withdraw(&mut self, amount: u64) -> Result<u64> {
            require!(!self.fail_calls, VaultError::InvalidAmount);
            let taken = amount.min(self.withdrawable_capacity()?);
            self.value -= taken;
            if let Some(liquidity) = self.liquidity.as_mut() {
                *liquidity -= taken;
            }
            Ok(taken.saturating_sub(self.withdraw_haircut))
        }
    }
}
