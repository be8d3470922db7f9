/// Метаданные UseCase для идентификации в логах и API
pub trait UseCaseMetadata {
    /// Индекс UseCase (например, "u508")
    fn usecase_index() -> &'static str;

    /// Техническое имя (например, "sync_shopify_prices")
    fn usecase_name() -> &'static str;

    /// Полное имя вида "u508_sync_shopify_prices"
    fn full_name() -> String {
        format!("{}_{}", Self::usecase_index(), Self::usecase_name())
    }
}
