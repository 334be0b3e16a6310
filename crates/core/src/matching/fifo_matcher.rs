//! FIFO matching of sells against prior buy lots.

use chrono::NaiveDate;
use log::warn;
use rust_decimal::Decimal;

use crate::ledger::{TradeRecord, TradeSide};

use super::matching_model::{Lot, TradePair, VirtualBuy};

/// Quantity taken from one lot while matching a single sell.
struct Contribution {
    quantity: Decimal,
    price: Decimal,
    lot_date: NaiveDate,
}

/// Matches each sell against the oldest prior buy lots of the same symbol.
///
/// `records` must already be in canonical order
/// ([`sort_chronological`](crate::ledger::sort_chronological)); lot
/// consumption then respects that order, oldest eligible buy first. The
/// caller's slice is never mutated -- lots are a private working copy that
/// lives only for this pass.
///
/// A sell whose quantity exceeds the available buy history is dropped with
/// a warning and emits no pair; the quantities it consumed while scanning
/// stay consumed. This component never errors.
pub fn match_fifo(records: &[TradeRecord]) -> Vec<TradePair> {
    let mut lots: Vec<Lot> = records
        .iter()
        .filter(|r| r.side == TradeSide::Buy)
        .map(Lot::from_buy)
        .collect();

    records
        .iter()
        .filter(|r| r.side == TradeSide::Sell)
        .filter_map(|sell| match_single_sell(sell, &mut lots))
        .collect()
}

fn match_single_sell(sell: &TradeRecord, lots: &mut [Lot]) -> Option<TradePair> {
    let mut remaining = sell.quantity;
    let mut contributions: Vec<Contribution> = Vec::new();

    for lot in lots.iter_mut() {
        if remaining <= Decimal::ZERO {
            break;
        }
        if lot.symbol != sell.symbol || lot.remaining_quantity <= Decimal::ZERO {
            continue;
        }
        let taken = remaining.min(lot.remaining_quantity);
        lot.remaining_quantity -= taken;
        remaining -= taken;
        contributions.push(Contribution {
            quantity: taken,
            price: lot.price,
            lot_date: lot.date,
        });
    }

    if remaining > Decimal::ZERO || contributions.is_empty() {
        warn!(
            "Sell {} ({} x {}) exceeds available buy history by {}; dropped from realized P&L",
            sell.id, sell.symbol, sell.quantity, remaining
        );
        return None;
    }

    let consumed: Decimal = contributions.iter().map(|c| c.quantity).sum();
    let consumed_cost: Decimal = contributions.iter().map(|c| c.price * c.quantity).sum();
    let weighted_avg_price = consumed_cost / consumed;

    let realized_pnl = (sell.price - weighted_avg_price) * sell.quantity;
    let realized_pnl_percent = if weighted_avg_price > Decimal::ZERO {
        realized_pnl / (weighted_avg_price * sell.quantity) * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    };

    // Holding period runs from the first consumed lot, not a blended date.
    let first_lot_date = contributions[0].lot_date;
    let holding_period_days = (sell.date - first_lot_date).num_days();

    Some(TradePair {
        virtual_buy: VirtualBuy {
            symbol: sell.symbol.clone(),
            date: first_lot_date,
            quantity: sell.quantity,
            weighted_avg_price,
        },
        sell_trade: sell.clone(),
        realized_pnl,
        realized_pnl_percent,
        holding_period_days,
    })
}
