//! Open-position bookkeeping with weighted-average cost.

mod positions_accumulator;
mod positions_model;


pub use positions_accumulator::accumulate;
pub use positions_model::Position;
