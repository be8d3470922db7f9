pub mod request;
pub mod response;

pub use request::SyncPricesRequest;
pub use response::{RowError, SyncPricesResponse, SyncRowError, UserError};

use crate::usecases::common::UseCaseMetadata;

pub struct SyncShopifyPrices;

impl UseCaseMetadata for SyncShopifyPrices {
    fn usecase_index() -> &'static str {
        "u508"
    }

    fn usecase_name() -> &'static str {
        "sync_shopify_prices"
    }
}
