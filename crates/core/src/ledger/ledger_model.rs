use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{
    COLUMN_ACTIVITY_DATE, COLUMN_AMOUNT, COLUMN_FEES, COLUMN_INSTRUMENT, COLUMN_PRICE,
    COLUMN_QUANTITY, COLUMN_TRANS_CODE,
};

/// Transaction side derived from the export's transaction code.
///
/// Only `Buy` and `Sell` enter the accounting core; the remaining variants
/// are recognized so their rows can be counted and excluded deliberately
/// rather than reported as unknown codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeSide {
    Buy,
    Sell,
    Dividend,
    Fee,
    Deposit,
    CorpAction,
}

impl TradeSide {
    /// Maps a brokerage transaction code to a side. Unrecognized codes map
    /// to `None`.
    pub fn from_trans_code(code: &str) -> Option<Self> {
        match code.trim() {
            "BUY" => Some(Self::Buy),
            "SELL" => Some(Self::Sell),
            "CDIV" => Some(Self::Dividend),
            "AFEE" | "GOLD" => Some(Self::Fee),
            "RTP" => Some(Self::Deposit),
            "SOFF" => Some(Self::CorpAction),
            _ => None,
        }
    }

    /// Whether records of this side participate in the accounting core.
    pub fn is_accounted(&self) -> bool {
        matches!(self, Self::Buy | Self::Sell)
    }
}

/// One export row with its fields pulled out by header name, before any
/// validation.
///
/// Field access happens exactly once, here; downstream code never reaches
/// back into the raw string-keyed row. `price` and `fees` are carried for
/// completeness but deliberately ignored by the normalizer: the cash
/// `amount` is authoritative for price derivation.
#[derive(Debug, Clone, Default)]
pub struct RawTradeRow {
    pub instrument: Option<String>,
    pub trans_code: Option<String>,
    pub quantity: Option<String>,
    pub amount: Option<String>,
    pub activity_date: Option<String>,
    pub price: Option<String>,
    pub fees: Option<String>,
}

impl RawTradeRow {
    /// Builds a raw row from a header list and a matching data row.
    /// Header matching is case-insensitive; blank cells become `None`.
    pub fn from_record(headers: &[String], row: &[String]) -> Self {
        let field = |name: &str| -> Option<String> {
            headers
                .iter()
                .position(|h| h.eq_ignore_ascii_case(name))
                .and_then(|i| row.get(i))
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            instrument: field(COLUMN_INSTRUMENT),
            trans_code: field(COLUMN_TRANS_CODE),
            quantity: field(COLUMN_QUANTITY),
            amount: field(COLUMN_AMOUNT),
            activity_date: field(COLUMN_ACTIVITY_DATE),
            price: field(COLUMN_PRICE),
            fees: field(COLUMN_FEES),
        }
    }
}

/// An immutable trade fact admitted into the accounting core.
///
/// Invariant: `quantity > 0` and `price > 0`; the normalizer rejects rows
/// that cannot satisfy this. `price` is always derived from the cash
/// amount, never read from the export's price column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeRecord {
    /// Stable within a batch: `{symbol}-{row index}`.
    pub id: String,
    pub symbol: String,
    pub side: TradeSide,
    pub quantity: Decimal,
    pub price: Decimal,
    pub date: NaiveDate,
    /// Always zero; fees are folded into the derived price through the cash
    /// amount and not decomposed separately.
    pub fees: Decimal,
}
