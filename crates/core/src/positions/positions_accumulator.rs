//! Single-pass weighted-average position accumulation.

use log::debug;
use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::ledger::{TradeRecord, TradeSide};

use super::positions_model::Position;

/// Folds sorted trade records into the current open-position set.
///
/// Expects canonical ordering
/// ([`sort_chronological`](crate::ledger::sort_chronological)). Sells
/// beyond the held quantity are clamped, never an error. Pure with respect
/// to the caller; the per-symbol state is private to the pass. This is a
/// different bookkeeping model from FIFO lot matching and must run on its
/// own copy of the records -- the two analyses never share mutable state.
///
/// Returns only positions with `quantity > 0`, sorted by symbol for
/// deterministic output.
pub fn accumulate(records: &[TradeRecord]) -> Vec<Position> {
    let mut by_symbol: HashMap<String, Position> = HashMap::new();

    for record in records {
        let position = by_symbol
            .entry(record.symbol.clone())
            .or_insert_with(|| Position::new(record.symbol.clone()));

        match record.side {
            TradeSide::Buy => position.apply_buy(record.quantity, record.price),
            TradeSide::Sell => {
                let (sold, _) = position.apply_sell(record.quantity);
                if sold < record.quantity {
                    debug!(
                        "Sell {} clamped from {} to held quantity {}",
                        record.id, record.quantity, sold
                    );
                }
            }
            // Non-trade sides never reach the core, but tolerate them.
            _ => {}
        }
    }

    let mut positions: Vec<Position> = by_symbol
        .into_values()
        .filter(|p| p.quantity > Decimal::ZERO)
        .collect();
    positions.sort_by(|a, b| a.symbol.cmp(&b.symbol));
    positions
}
