use axum::{
    body::Body,
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::shared::error::SyncError;
use crate::shared::state::AppState;

/// Заголовок с общим секретом для административных endpoint'ов
pub const INTERNAL_KEY_HEADER: &str = "X-Internal-Key";

/// Middleware, требующее X-Internal-Key, если ключ задан в конфигурации.
///
/// Проверка выполняется до хендлера, поэтому при отказе файл цен не читается.
pub async fn require_internal_key(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, SyncError> {
    let provided = req
        .headers()
        .get(INTERNAL_KEY_HEADER)
        .and_then(|h| h.to_str().ok());

    if !is_authorized(state.config.sync.internal_key.as_deref(), provided) {
        tracing::warn!(
            "Rejected {} {}: bad or missing {}",
            req.method(),
            req.uri().path(),
            INTERNAL_KEY_HEADER
        );
        return Err(SyncError::Unauthorized);
    }

    Ok(next.run(req).await)
}

/// Без настроенного ключа доступ открыт; иначе нужно точное совпадение
pub fn is_authorized(expected: Option<&str>, provided: Option<&str>) -> bool {
    match expected {
        None => true,
        Some(expected) => provided == Some(expected),
    }
}
