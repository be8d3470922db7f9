use serde::{Deserialize, Serialize};

/// Текст ошибки для строки, SKU которой не найден в каталоге
pub const SKU_NOT_FOUND: &str = "SKU not found (exact match)";

/// Итог синхронизации цен
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SyncPricesResponse {
    /// Строк с валидной ценой в файле
    pub total_rows: usize,
    /// Обновлено (или было бы обновлено при dry_run)
    pub updated: usize,
    /// Пропущено: SKU не найден или Shopify отклонил мутацию
    pub skipped: usize,
    /// Ошибки по строкам в порядке файла
    pub errors: Vec<SyncRowError>,
    pub dry_run: bool,
}

impl SyncPricesResponse {
    pub fn new(total_rows: usize, dry_run: bool) -> Self {
        Self {
            total_rows,
            dry_run,
            ..Default::default()
        }
    }
}

/// Ошибка по одной строке файла
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncRowError {
    pub sku: String,
    pub error: RowError,
}

/// Причина пропуска строки.
///
/// Сериализуется без тега: строка для "не найдено", массив userErrors
/// из ответа Shopify как есть.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowError {
    Message(String),
    UserErrors(Vec<UserError>),
}

impl RowError {
    pub fn not_found() -> Self {
        RowError::Message(SKU_NOT_FOUND.to_string())
    }
}

/// Ошибка валидации поля, возвращённая мутацией Shopify
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserError {
    #[serde(default)]
    pub field: Option<Vec<String>>,
    pub message: String,
}
