use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u508_sync_shopify_prices::{
    RowError, SyncPricesResponse, SyncRowError, SyncShopifyPrices, UserError,
};
use std::path::PathBuf;
use std::sync::Arc;

use super::matching::pick_exact_variant;
use super::price_source::{read_price_file, PriceRow};
use crate::shared::error::SyncError;
use crate::shared::marketplaces::CatalogClient;

/// Результат обработки одной строки
#[derive(Debug, Clone, PartialEq)]
enum RowOutcome {
    Updated,
    /// dry_run: вариант найден, мутация не отправлялась
    WouldUpdate,
    NotFound,
    Rejected(Vec<UserError>),
}

/// Executor для UseCase синхронизации цен
pub struct PriceSyncExecutor {
    catalog: Arc<dyn CatalogClient>,
}

impl PriceSyncExecutor {
    pub fn new(catalog: Arc<dyn CatalogClient>) -> Self {
        Self { catalog }
    }

    /// Прочитать файл цен и синхронизировать его с каталогом
    pub async fn sync_from_file(
        &self,
        path: PathBuf,
        dry_run: bool,
    ) -> Result<SyncPricesResponse, SyncError> {
        let rows = tokio::task::spawn_blocking(move || read_price_file(&path))
            .await
            .map_err(|e| SyncError::Internal(format!("Price file reader panicked: {}", e)))??;

        self.run(&rows, dry_run).await
    }

    /// Обработать строки по порядку, по одному запросу к каталогу за раз.
    ///
    /// Ошибка поиска или мутации на уровне транспорта прерывает весь прогон;
    /// построчно фиксируются только "не найдено" и userErrors.
    pub async fn run(
        &self,
        rows: &[PriceRow],
        dry_run: bool,
    ) -> Result<SyncPricesResponse, SyncError> {
        let started_at = std::time::Instant::now();
        tracing::info!(
            "{}: starting for {} rows (dry_run={})",
            SyncShopifyPrices::full_name(),
            rows.len(),
            dry_run
        );

        let mut result = SyncPricesResponse::new(rows.len(), dry_run);

        for (idx, row) in rows.iter().enumerate() {
            if idx > 0 && idx % 100 == 0 {
                tracing::info!("Price sync progress: {} rows processed...", idx);
            }

            match self.process_row(row, dry_run).await? {
                RowOutcome::Updated | RowOutcome::WouldUpdate => result.updated += 1,
                RowOutcome::NotFound => {
                    result.skipped += 1;
                    result.errors.push(SyncRowError {
                        sku: row.sku.clone(),
                        error: RowError::not_found(),
                    });
                }
                RowOutcome::Rejected(user_errors) => {
                    tracing::warn!("Shopify rejected price for sku '{}': {:?}", row.sku, user_errors);
                    result.skipped += 1;
                    result.errors.push(SyncRowError {
                        sku: row.sku.clone(),
                        error: RowError::UserErrors(user_errors),
                    });
                }
            }
        }

        tracing::info!(
            "Price sync finished: total_rows={}, updated={}, skipped={}, dry_run={}, elapsed_ms={}",
            result.total_rows,
            result.updated,
            result.skipped,
            dry_run,
            started_at.elapsed().as_millis()
        );

        Ok(result)
    }

    async fn process_row(&self, row: &PriceRow, dry_run: bool) -> Result<RowOutcome, SyncError> {
        let candidates = self.catalog.find_variants_by_sku(&row.sku).await?;

        let Some(variant) = pick_exact_variant(&candidates, &row.sku) else {
            tracing::debug!(
                "SKU '{}' not found ({} candidates returned)",
                row.sku,
                candidates.len()
            );
            return Ok(RowOutcome::NotFound);
        };

        if dry_run {
            tracing::debug!(
                "Dry run: would set price {:.2} for sku '{}' (variant {}, current {:?})",
                row.price,
                row.sku,
                variant.id,
                variant.price
            );
            return Ok(RowOutcome::WouldUpdate);
        }

        let update = self
            .catalog
            .update_variant_price(&variant.id, row.price, row.compare_at_price)
            .await?;

        if update.user_errors.is_empty() {
            Ok(RowOutcome::Updated)
        } else {
            Ok(RowOutcome::Rejected(update.user_errors))
        }
    }
}
