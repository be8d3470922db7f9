pub mod shopify;

use async_trait::async_trait;
use contracts::usecases::u508_sync_shopify_prices::UserError;
use serde::{Deserialize, Serialize};

use crate::shared::error::SyncError;

/// Вариант товара в каталоге маркетплейса
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogVariant {
    pub id: String,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub product: Option<CatalogProduct>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogProduct {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
}

/// Результат мутации цены: пустой `user_errors` означает успех
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariantUpdate {
    pub variant: Option<CatalogVariant>,
    pub user_errors: Vec<UserError>,
}

/// Трейт для клиента каталога маркетплейса
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Поиск вариантов по SKU. Поиск маркетплейса может вернуть
    /// похожие, а не только точные совпадения.
    async fn find_variants_by_sku(&self, sku: &str) -> Result<Vec<CatalogVariant>, SyncError>;

    /// Установить цену (и опционально compare-at цену) варианта
    async fn update_variant_price(
        &self,
        variant_id: &str,
        price: f64,
        compare_at_price: Option<f64>,
    ) -> Result<VariantUpdate, SyncError>;
}
