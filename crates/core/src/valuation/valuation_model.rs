use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Portfolio-level totals derived from open positions and realized pairs.
///
/// Recomputed fresh on every request and never mutated in place. All
/// percentages are relative to `total_cost` and zero when there is no cost
/// basis to measure against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub total_cost: Decimal,
    pub total_market_value: Decimal,
    pub total_unrealized_pnl: Decimal,
    pub total_unrealized_pnl_percent: Decimal,
    pub total_realized_pnl: Decimal,
    pub total_realized_pnl_percent: Decimal,
    pub total_pnl: Decimal,
    pub total_pnl_percent: Decimal,
    /// Number of open positions.
    pub position_count: usize,
    /// Count of all records that entered the core, not just matched ones.
    pub trade_count: usize,
}
