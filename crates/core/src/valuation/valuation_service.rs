//! Price enrichment and portfolio summary computation.

use std::collections::HashMap;
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use log::warn;
use rust_decimal::Decimal;

use ledgerfolio_market_data::PriceProvider;

use crate::constants::PRICE_FETCH_CONCURRENCY;
use crate::matching::TradePair;
use crate::positions::Position;

use super::valuation_model::PortfolioSummary;

/// Fills the valuation fields of each position from the price collaborator.
///
/// One lookup per distinct symbol, issued concurrently up to
/// [`PRICE_FETCH_CONCURRENCY`] in flight. A failed lookup leaves that
/// position's valuation fields unset and is never an error; timeout and
/// staleness policy belong to the provider.
pub async fn enrich_positions(positions: &mut [Position], provider: Arc<dyn PriceProvider>) {
    if positions.is_empty() {
        return;
    }

    let symbols: Vec<String> = positions.iter().map(|p| p.symbol.clone()).collect();
    let prices: HashMap<String, Decimal> = stream::iter(symbols)
        .map(|symbol| {
            let provider = Arc::clone(&provider);
            async move {
                match provider.latest_price(&symbol).await {
                    Ok(quote) => Some((symbol, quote.price)),
                    Err(e) => {
                        warn!("No current price for {}: {}", symbol, e);
                        None
                    }
                }
            }
        })
        .buffer_unordered(PRICE_FETCH_CONCURRENCY)
        .filter_map(|result| async move { result })
        .collect()
        .await;

    for position in positions.iter_mut() {
        if let Some(price) = prices.get(&position.symbol) {
            position.set_current_price(*price);
        }
    }
}

/// Combines open positions and realized pairs into portfolio totals.
///
/// Positions missing valuation fields contribute zero to market value and
/// unrealized P&L. `trade_count` is the number of records that entered the
/// core, supplied by the caller because dropped sells and closed positions
/// are no longer visible here.
pub fn summarize(
    positions: &[Position],
    trade_pairs: &[TradePair],
    trade_count: usize,
) -> PortfolioSummary {
    let total_cost: Decimal = positions.iter().map(|p| p.total_cost).sum();
    let total_market_value: Decimal = positions.iter().filter_map(|p| p.market_value).sum();
    let total_unrealized_pnl: Decimal = positions.iter().filter_map(|p| p.unrealized_pnl).sum();
    let total_realized_pnl: Decimal = trade_pairs.iter().map(|p| p.realized_pnl).sum();
    let total_pnl = total_realized_pnl + total_unrealized_pnl;

    let percent_of_cost = |value: Decimal| {
        if total_cost > Decimal::ZERO {
            value / total_cost * Decimal::ONE_HUNDRED
        } else {
            Decimal::ZERO
        }
    };

    PortfolioSummary {
        total_cost,
        total_market_value,
        total_unrealized_pnl,
        total_unrealized_pnl_percent: percent_of_cost(total_unrealized_pnl),
        total_realized_pnl,
        total_realized_pnl_percent: percent_of_cost(total_realized_pnl),
        total_pnl,
        total_pnl_percent: percent_of_cost(total_pnl),
        position_count: positions.len(),
        trade_count,
    }
}
