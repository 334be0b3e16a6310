use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::TradeRecord;

/// Mutable working view of a buy record during one matching pass.
///
/// `remaining_quantity` only ever decreases and never goes negative. Lots
/// are created when the pass starts and discarded when it ends; they are
/// never exposed to callers.
#[derive(Debug, Clone)]
pub(crate) struct Lot {
    pub symbol: String,
    pub date: NaiveDate,
    pub remaining_quantity: Decimal,
    pub price: Decimal,
}

impl Lot {
    pub fn from_buy(record: &TradeRecord) -> Self {
        Self {
            symbol: record.symbol.clone(),
            date: record.date,
            remaining_quantity: record.quantity,
            price: record.price,
        }
    }
}

/// The blended buy side of a realized pair: the consumed lots collapsed
/// into one quantity-weighted acquisition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualBuy {
    pub symbol: String,
    /// Date of the first (oldest) lot consumed.
    pub date: NaiveDate,
    pub quantity: Decimal,
    pub weighted_avg_price: Decimal,
}

/// A fully matched sell with its realized outcome. Immutable once emitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradePair {
    pub virtual_buy: VirtualBuy,
    pub sell_trade: TradeRecord,
    pub realized_pnl: Decimal,
    pub realized_pnl_percent: Decimal,
    /// Days between the first consumed lot's date and the sell date.
    pub holding_period_days: i64,
}
