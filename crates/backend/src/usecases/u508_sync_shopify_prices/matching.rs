use crate::shared::marketplaces::CatalogVariant;

/// Выбрать вариант с точно совпадающим SKU.
///
/// Поиск Shopify может вернуть похожие SKU ("A1" -> "A10"), поэтому сравниваем
/// после trim с учётом регистра. При нескольких совпадениях берётся первое.
pub fn pick_exact_variant<'a>(
    candidates: &'a [CatalogVariant],
    sku: &str,
) -> Option<&'a CatalogVariant> {
    let wanted = sku.trim();
    candidates
        .iter()
        .find(|variant| variant.sku.as_deref().unwrap_or_default().trim() == wanted)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variant(id: &str, sku: Option<&str>) -> CatalogVariant {
        CatalogVariant {
            id: id.to_string(),
            sku: sku.map(str::to_string),
            price: None,
            product: None,
        }
    }

    #[test]
    fn test_near_matches_are_ignored() {
        let candidates = vec![variant("1", Some("A10")), variant("2", Some("A1-B"))];
        assert_eq!(pick_exact_variant(&candidates, "A1"), None);
    }

    #[test]
    fn test_exact_match_after_trim() {
        let candidates = vec![variant("1", Some("A10")), variant("2", Some(" A1 "))];
        let found = pick_exact_variant(&candidates, "A1").unwrap();
        assert_eq!(found.id, "2");
    }

    #[test]
    fn test_match_is_case_sensitive() {
        let candidates = vec![variant("1", Some("a1"))];
        assert_eq!(pick_exact_variant(&candidates, "A1"), None);
    }

    #[test]
    fn test_first_exact_match_wins() {
        let candidates = vec![
            variant("1", None),
            variant("2", Some("A1")),
            variant("3", Some("A1")),
        ];
        assert_eq!(pick_exact_variant(&candidates, "A1").unwrap().id, "2");
    }

    #[test]
    fn test_empty_candidates() {
        assert_eq!(pick_exact_variant(&[], "A1"), None);
    }
}
