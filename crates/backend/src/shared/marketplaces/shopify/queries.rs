//! GraphQL документы Shopify Admin API

/// Поиск вариантов по строке поиска вида `sku:<value>`, не больше 5 кандидатов
pub const FIND_VARIANT_BY_SKU: &str = r#"
query FindVariantBySku($q: String!) {
  productVariants(first: 5, query: $q) {
    edges {
      node {
        id
        sku
        price
        product { id title }
      }
    }
  }
}
"#;

pub const UPDATE_VARIANT_PRICE: &str = r#"
mutation UpdateVariant($input: ProductVariantInput!) {
  productVariantUpdate(input: $input) {
    productVariant {
      id
      price
      sku
    }
    userErrors {
      field
      message
    }
  }
}
"#;
