//! FIFO lot matching: pairs each sell against the oldest prior buy lots.

mod fifo_matcher;
mod matching_model;


pub use fifo_matcher::match_fifo;
pub use matching_model::{TradePair, VirtualBuy};
