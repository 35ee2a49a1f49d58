#![allow(dead_code)]

use anchor_lang::error::ERROR_CODE_OFFSET;
use anchor_lang::prelude::*;
use yield_donating_vault::{
    errors::VaultError,
    ledger::MemoryLedger,
    lifecycle::VaultContext,
    position::PositionManager,
    state::{VaultState, WithdrawPolicy},
    yield_source::YieldSource,
};

/// Yield source whose value is moved by hand to simulate the market
#[derive(Debug, Default)]
pub struct ManualSource {
    pub value: u64,
    pub deposit_limit: u64,
    /// Cap on what can be released, None means everything
    pub liquidity: Option<u64>,
}

impl YieldSource for ManualSource {
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
        require!(
            amount <= self.deployable_capacity()?,
            VaultError::DepositLimitExceeded
        );
        self.value += amount;
        Ok(())
    }

    fn withdraw(&mut self, amount: u64) -> Result<u64> {
        let freed = amount.min(self.withdrawable_capacity()?);
        self.value -= freed;
        if let Some(liquidity) = self.liquidity.as_mut() {
            *liquidity -= freed;
        }
        Ok(freed)
    }
}

/// Vault engine wired to an in-memory ledger
pub struct Harness {
    pub state: VaultState,
    pub ledger: MemoryLedger,
    pub position: PositionManager<ManualSource>,
    pub beneficiary: Pubkey,
}

impl Harness {
    pub fn new(deposit_limit: u64) -> Self {
        Self::with_policy(deposit_limit, WithdrawPolicy::Revert)
    }

    pub fn with_policy(deposit_limit: u64, withdraw_policy: WithdrawPolicy) -> Self {
        let beneficiary = Pubkey::new_unique();
        let source = ManualSource {
            deposit_limit,
            ..Default::default()
        };
        Self {
            state: VaultState {
                beneficiary,
                loss_absorption_enabled: true,
                withdraw_policy,
                ..Default::default()
            },
            ledger: MemoryLedger::new(),
            position: PositionManager::new(source, 0),
            beneficiary,
        }
    }

    pub fn vault(&mut self) -> VaultContext<'_, MemoryLedger, ManualSource> {
        VaultContext::new(&mut self.state, &mut self.ledger, &mut self.position)
    }

    pub fn market(&mut self) -> &mut ManualSource {
        self.position.source_mut()
    }

    pub fn assets_of(&mut self, holder: &Pubkey) -> u64 {
        use yield_donating_vault::ledger::ShareLedger;
        let shares = self.ledger.balance_of(holder);
        self.vault().convert_to_assets(shares).unwrap()
    }
}

pub fn assert_vault_error<T: std::fmt::Debug>(result: Result<T>, expected: VaultError) {
    let code = ERROR_CODE_OFFSET + expected as u32;
    match result {
        Err(anchor_lang::error::Error::AnchorError(err)) => {
            assert_eq!(err.error_code_number, code, "{}", err.error_msg)
        }
        other => panic!("expected error code {code}, got {other:?}"),
    }
}
