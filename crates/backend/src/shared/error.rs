use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use contracts::usecases::common::UseCaseError;
use thiserror::Error;

/// Ошибки синхронизации цен.
///
/// Все варианты фатальны для запроса: "SKU не найден" и отклонённая мутация
/// сюда не попадают, они пишутся в результат построчно.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Не заданы настройки или не читается файл цен
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// В файле нет обязательных колонок
    #[error("Invalid price file: {0}")]
    InvalidSource(String),

    #[error("Unauthorized")]
    Unauthorized,

    /// Shopify ответил не-2xx статусом
    #[error("Shopify GraphQL HTTP error {status}: {body}")]
    Transport { status: u16, body: String },

    /// Непустой список `errors` в ответе GraphQL
    #[error("Shopify GraphQL errors: {}", format_graphql_errors(.0))]
    Application(Vec<serde_json::Value>),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Failed to decode Shopify response: {0}")]
    Decode(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl SyncError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            SyncError::Configuration(_) | SyncError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            SyncError::InvalidSource(_) | SyncError::Application(_) => StatusCode::BAD_REQUEST,
            SyncError::Unauthorized => StatusCode::UNAUTHORIZED,
            // Статус Shopify пробрасывается клиенту как есть
            SyncError::Transport { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            SyncError::Network(_) | SyncError::Decode(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn to_use_case_error(&self) -> UseCaseError {
        match self {
            SyncError::Configuration(msg) => UseCaseError::configuration(msg.clone()),
            SyncError::InvalidSource(msg) => UseCaseError::validation(msg.clone()),
            SyncError::Unauthorized => UseCaseError::unauthorized("Unauthorized"),
            SyncError::Transport { status, body } => {
                UseCaseError::external(format!("Shopify GraphQL HTTP error {}", status))
                    .with_details(body.clone())
            }
            SyncError::Application(errors) => {
                UseCaseError::external("Shopify GraphQL errors").with_details(
                    serde_json::to_string(errors).unwrap_or_else(|_| format_graphql_errors(errors)),
                )
            }
            SyncError::Network(e) => {
                UseCaseError::external("Shopify is unreachable").with_details(e.to_string())
            }
            SyncError::Decode(msg) => {
                UseCaseError::external("Unexpected Shopify response").with_details(msg.clone())
            }
            SyncError::Internal(msg) => UseCaseError::internal(msg.clone()),
        }
    }
}

impl IntoResponse for SyncError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Price sync failed: {}", self);
        } else {
            tracing::warn!("Price sync rejected: {}", self);
        }
        (status, Json(self.to_use_case_error())).into_response()
    }
}

fn format_graphql_errors(errors: &[serde_json::Value]) -> String {
    errors
        .iter()
        .map(|e| {
            e.get("message")
                .and_then(|m| m.as_str())
                .map(str::to_string)
                .unwrap_or_else(|| e.to_string())
        })
        .collect::<Vec<_>>()
        .join("; ")
}
