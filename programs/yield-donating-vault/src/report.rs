use anchor_lang::prelude::*;

use crate::ledger::ShareLedger;
use crate::math::Rounding;
use crate::position::PositionManager;
use crate::state::VaultState;
use crate::yield_source::YieldSource;

/// Realized result of one report
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReportOutcome {
    /// Value gained since the last snapshot
    pub profit: u64,
    /// Value lost since the last snapshot
    pub loss: u64,
    /// Shares issued to the beneficiary for `profit`
    pub shares_minted: u64,
    /// Beneficiary shares burned against `loss`
    pub shares_burned: u64,
    /// Part of `loss` the beneficiary buffer did not cover; diluted across holders
    pub unabsorbed_loss: u64,
    /// Fresh valuation that became the new snapshot
    pub total_managed_value: u64,
}

/// Reconcile the vault's valuation against `last_recorded_value`.
///
/// Profit mints shares to the beneficiary and loss burns them, both priced
/// with the share total and snapshot as they stood before this report, so
/// ordinary holders keep their price-per-share. Losses beyond the
/// beneficiary's balance are not reverted; they dilute every holder and come
/// back as `unabsorbed_loss`.
///
/// Callers serialize this against every other vault operation.
pub fn report<L, Y>(
    state: &mut VaultState,
    ledger: &mut L,
    position: &PositionManager<Y>,
) -> Result<ReportOutcome>
where
    L: ShareLedger,
    Y: YieldSource,
{
    let current = position.total_managed_value()?;
    let previous = state.last_recorded_value;
    let total_shares = ledger.total_shares();

    let mut outcome = ReportOutcome {
        total_managed_value: current,
        ..Default::default()
    };

    if current > previous {
        let profit = current - previous;

        // No price to preserve: mint 1:1. After a total wipe-out the old
        // holders keep their shares, so they share the recovery with the
        // beneficiary pro rata instead of forfeiting it.
        let shares = if total_shares == 0 || previous == 0 {
            profit
        } else {
            state.convert_to_shares(profit, total_shares, Rounding::Down)?
        };

        ledger.mint(&state.beneficiary, shares)?;
        outcome.profit = profit;
        outcome.shares_minted = shares;
    } else if current < previous {
        let loss = previous - current;
        outcome.loss = loss;

        if state.loss_absorption_enabled {
            let buffer = ledger.balance_of(&state.beneficiary);
            let loss_shares = state.convert_to_shares(loss, total_shares, Rounding::Up)?;
            let burned = loss_shares.min(buffer);

            ledger.burn(&state.beneficiary, burned)?;
            outcome.shares_burned = burned;

            if burned < loss_shares {
                let absorbed = state.convert_to_assets(burned, total_shares, Rounding::Down)?;
                outcome.unabsorbed_loss = loss.saturating_sub(absorbed);
            }
        } else {
            outcome.unabsorbed_loss = loss;
        }
    }

    state.last_recorded_value = current;

    Ok(outcome)
}
