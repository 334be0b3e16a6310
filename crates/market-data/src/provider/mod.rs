//! Price provider implementations.

mod reference;
mod traits;
mod yahoo;

pub use reference::ReferencePriceProvider;
pub use traits::PriceProvider;
pub use yahoo::YahooProvider;
