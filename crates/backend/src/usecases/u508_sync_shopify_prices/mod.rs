pub mod executor;
pub mod matching;
pub mod price_source;

pub use executor::PriceSyncExecutor;
pub use price_source::PriceRow;
