//! Canonical ordering for trade records.

use std::cmp::Ordering;

use super::ledger_model::{TradeRecord, TradeSide};

/// Sorts records into the canonical total order required by both the FIFO
/// matcher and the position accumulator: symbol ascending, then date
/// ascending, with buys strictly before sells on the same symbol and date.
/// Equal keys keep their input order (stable sort).
pub fn sort_chronological(records: &mut [TradeRecord]) {
    records.sort_by(compare_chronological);
}

fn compare_chronological(a: &TradeRecord, b: &TradeRecord) -> Ordering {
    a.symbol
        .cmp(&b.symbol)
        .then_with(|| a.date.cmp(&b.date))
        .then_with(|| side_rank(a.side).cmp(&side_rank(b.side)))
}

fn side_rank(side: TradeSide) -> u8 {
    match side {
        TradeSide::Buy => 0,
        TradeSide::Sell => 1,
        _ => 2,
    }
}
