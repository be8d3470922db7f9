use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use contracts::usecases::u508_sync_shopify_prices::{SyncPricesRequest, SyncPricesResponse};

use crate::shared::config::get_price_file_path;
use crate::shared::error::SyncError;
use crate::shared::state::AppState;
use crate::usecases::u508_sync_shopify_prices::PriceSyncExecutor;

/// POST /sync-prices?dry_run=true
///
/// Авторизация по X-Internal-Key выполняется middleware до вызова.
pub async fn sync_prices(
    State(state): State<AppState>,
    query: Result<Query<SyncPricesRequest>, QueryRejection>,
) -> Result<Json<SyncPricesResponse>, SyncError> {
    // Ошибку разбора query отдаём тем же JSON, что и остальные ошибки
    let Query(request) = query.map_err(|e| SyncError::InvalidSource(e.body_text()))?;
    let path = get_price_file_path(&state.config);
    tracing::info!(
        "U508 sync request: dry_run={}, file={}",
        request.dry_run,
        path.display()
    );

    let executor = PriceSyncExecutor::new(state.catalog.clone());
    let response = executor.sync_from_file(path, request.dry_run).await?;

    Ok(Json(response))
}
