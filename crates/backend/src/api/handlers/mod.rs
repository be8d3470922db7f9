pub mod health;
pub mod u508_sync_prices;
