use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::constants::POSITION_COST_EPSILON;

/// One open position per symbol, costed at the weighted average of its
/// acquisitions.
///
/// Invariant: `total_cost == avg_buy_price * quantity` within
/// [`POSITION_COST_EPSILON`] after every completed update, and `quantity`
/// is never negative. The valuation fields stay `None` until the position
/// is enriched with a current price; a missing price is not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub symbol: String,
    pub quantity: Decimal,
    pub avg_buy_price: Decimal,
    pub total_cost: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_value: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unrealized_pnl: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unrealized_pnl_percent: Option<Decimal>,
}

impl Position {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            quantity: Decimal::ZERO,
            avg_buy_price: Decimal::ZERO,
            total_cost: Decimal::ZERO,
            current_price: None,
            market_value: None,
            unrealized_pnl: None,
            unrealized_pnl_percent: None,
        }
    }

    /// Folds a buy into the running weighted-average cost.
    pub(crate) fn apply_buy(&mut self, quantity: Decimal, price: Decimal) {
        self.total_cost += price * quantity;
        self.quantity += quantity;
        self.avg_buy_price = if self.quantity > Decimal::ZERO {
            self.total_cost / self.quantity
        } else {
            Decimal::ZERO
        };
    }

    /// Relieves quantity at the running average cost, clamped to the held
    /// quantity. Full liquidation resets the basis to exactly zero.
    /// Returns `(quantity_sold, cost_relieved)`.
    pub(crate) fn apply_sell(&mut self, quantity: Decimal) -> (Decimal, Decimal) {
        let sold = quantity.min(self.quantity);
        if sold <= Decimal::ZERO {
            return (Decimal::ZERO, Decimal::ZERO);
        }

        let sold_cost = self.avg_buy_price * sold;
        self.quantity -= sold;
        if self.quantity > Decimal::ZERO {
            self.total_cost -= sold_cost;
            self.avg_buy_price = self.total_cost / self.quantity;
        } else {
            self.total_cost = Decimal::ZERO;
            self.avg_buy_price = Decimal::ZERO;
        }
        (sold, sold_cost)
    }

    /// Fills the valuation fields from a current market price.
    pub fn set_current_price(&mut self, price: Decimal) {
        let market_value = price * self.quantity;
        let unrealized = market_value - self.total_cost;

        self.current_price = Some(price);
        self.market_value = Some(market_value);
        self.unrealized_pnl = Some(unrealized);
        self.unrealized_pnl_percent = Some(if self.total_cost > Decimal::ZERO {
            unrealized / self.total_cost * Decimal::ONE_HUNDRED
        } else {
            Decimal::ZERO
        });
    }

    /// Checks the cost-basis invariant within the configured tolerance.
    pub fn cost_is_consistent(&self) -> bool {
        let epsilon = Decimal::from_str(POSITION_COST_EPSILON).unwrap_or(Decimal::ZERO);
        (self.total_cost - self.avg_buy_price * self.quantity).abs() <= epsilon
    }
}
