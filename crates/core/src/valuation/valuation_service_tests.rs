use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use ledgerfolio_market_data::{MarketDataError, PriceProvider, PriceQuote};

use crate::ledger::{TradeRecord, TradeSide};
use crate::matching::{TradePair, VirtualBuy};
use crate::positions::Position;

use super::valuation_service::{enrich_positions, summarize};

/// Provider answering from a fixed table; anything else is unavailable.
struct TableProvider {
    prices: HashMap<String, Decimal>,
}

#[async_trait]
impl PriceProvider for TableProvider {
    fn id(&self) -> &'static str {
        "TABLE"
    }

    async fn latest_price(&self, symbol: &str) -> Result<PriceQuote, MarketDataError> {
        self.prices
            .get(symbol)
            .map(|price| PriceQuote::new(symbol, *price))
            .ok_or_else(|| MarketDataError::NotFound(symbol.to_string()))
    }
}

fn position(symbol: &str, qty: Decimal, avg: Decimal) -> Position {
    let mut p = Position::new(symbol);
    p.apply_buy(qty, avg);
    p
}

fn pair(symbol: &str, realized: Decimal) -> TradePair {
    let date = NaiveDate::parse_from_str("2024-01-02", "%Y-%m-%d").unwrap();
    TradePair {
        virtual_buy: VirtualBuy {
            symbol: symbol.to_string(),
            date,
            quantity: dec!(1),
            weighted_avg_price: dec!(10),
        },
        sell_trade: TradeRecord {
            id: format!("{}-sell", symbol),
            symbol: symbol.to_string(),
            side: TradeSide::Sell,
            quantity: dec!(1),
            price: dec!(10) + realized,
            date,
            fees: dec!(0),
        },
        realized_pnl: realized,
        realized_pnl_percent: dec!(0),
        holding_period_days: 1,
    }
}

#[tokio::test]
async fn enrichment_fills_valuation_fields() {
    let mut positions = vec![position("AAPL", dec!(10), dec!(150))];
    let provider = Arc::new(TableProvider {
        prices: HashMap::from([("AAPL".to_string(), dec!(160))]),
    });

    enrich_positions(&mut positions, provider).await;

    let p = &positions[0];
    assert_eq!(p.current_price, Some(dec!(160)));
    assert_eq!(p.market_value, Some(dec!(1600)));
    assert_eq!(p.unrealized_pnl, Some(dec!(100)));
    assert_eq!(
        p.unrealized_pnl_percent,
        Some(dec!(100) / dec!(1500) * dec!(100))
    );
}

#[tokio::test]
async fn missing_price_leaves_fields_unset() {
    let mut positions = vec![
        position("AAPL", dec!(10), dec!(150)),
        position("OBSCURE", dec!(5), dec!(10)),
    ];
    let provider = Arc::new(TableProvider {
        prices: HashMap::from([("AAPL".to_string(), dec!(160))]),
    });

    enrich_positions(&mut positions, provider).await;

    assert!(positions[0].market_value.is_some());
    let unpriced = &positions[1];
    assert_eq!(unpriced.current_price, None);
    assert_eq!(unpriced.market_value, None);
    assert_eq!(unpriced.unrealized_pnl, None);
    assert_eq!(unpriced.unrealized_pnl_percent, None);
}

#[test]
fn summarize_totals_and_percentages() {
    let mut enriched = position("AAPL", dec!(10), dec!(100)); // cost 1000
    enriched.set_current_price(dec!(120)); // mv 1200, unrealized 200
    let bare = position("MSFT", dec!(4), dec!(250)); // cost 1000, no price

    let positions = vec![enriched, bare];
    let pairs = vec![pair("AAPL", dec!(50)), pair("MSFT", dec!(-20))];

    let summary = summarize(&positions, &pairs, 7);

    assert_eq!(summary.total_cost, dec!(2000));
    assert_eq!(summary.total_market_value, dec!(1200));
    assert_eq!(summary.total_unrealized_pnl, dec!(200));
    assert_eq!(summary.total_realized_pnl, dec!(30));
    assert_eq!(summary.total_pnl, dec!(230));
    assert_eq!(summary.total_unrealized_pnl_percent, dec!(10));
    assert_eq!(
        summary.total_realized_pnl_percent,
        dec!(30) / dec!(2000) * dec!(100)
    );
    assert_eq!(
        summary.total_pnl_percent,
        dec!(230) / dec!(2000) * dec!(100)
    );
    assert_eq!(summary.position_count, 2);
    assert_eq!(summary.trade_count, 7);
}

#[test]
fn zero_cost_basis_guards_percentages() {
    let summary = summarize(&[], &[pair("AAPL", dec!(50))], 1);

    assert_eq!(summary.total_cost, dec!(0));
    assert_eq!(summary.total_realized_pnl, dec!(50));
    assert_eq!(summary.total_realized_pnl_percent, dec!(0));
    assert_eq!(summary.total_pnl_percent, dec!(0));
    assert_eq!(summary.position_count, 0);
}

#[test]
fn summary_serializes_camel_case() {
    let summary = summarize(&[], &[], 0);
    let json = serde_json::to_value(&summary).unwrap();

    assert!(json.get("totalCost").is_some());
    assert!(json.get("totalMarketValue").is_some());
    assert!(json.get("totalUnrealizedPnlPercent").is_some());
    assert!(json.get("tradeCount").is_some());
}
