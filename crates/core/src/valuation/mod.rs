//! Valuation: price enrichment and portfolio-level aggregation.

mod valuation_model;
mod valuation_service;

#[cfg(test)]
mod valuation_service_tests;

pub use valuation_model::PortfolioSummary;
pub use valuation_service::{enrich_positions, summarize};
