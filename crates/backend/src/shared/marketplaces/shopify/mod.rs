pub mod queries;

use async_trait::async_trait;
use contracts::usecases::u508_sync_shopify_prices::UserError;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

use super::{CatalogClient, CatalogVariant, VariantUpdate};
use crate::shared::config::ShopifyConfig;
use crate::shared::error::SyncError;
use crate::shared::format::format_price;

/// HTTP-клиент для Shopify Admin GraphQL API
pub struct ShopifyApiClient {
    client: reqwest::Client,
    shop: Option<String>,
    access_token: Option<String>,
    api_version: String,
    /// Полный URL GraphQL endpoint вместо вычисляемого из shop (прокси, тесты)
    endpoint_override: Option<String>,
}

impl ShopifyApiClient {
    pub fn new(config: &ShopifyConfig) -> Result<Self, SyncError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SyncError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            shop: config.shop.clone(),
            access_token: config.access_token.clone(),
            api_version: config.api_version.clone(),
            endpoint_override: None,
        })
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint_override = Some(endpoint.into());
        self
    }

    /// URL и токен. Проверяется на каждом вызове: сервис может быть
    /// запущен без учётных данных Shopify.
    fn credentials(&self) -> Result<(String, &str), SyncError> {
        let token = self
            .access_token
            .as_deref()
            .ok_or_else(missing_credentials)?;

        let url = match (&self.endpoint_override, &self.shop) {
            (Some(endpoint), _) => endpoint.clone(),
            (None, Some(shop)) => format!(
                "https://{}/admin/api/{}/graphql.json",
                shop, self.api_version
            ),
            (None, None) => return Err(missing_credentials()),
        };

        Ok((url, token))
    }

    /// Выполнить GraphQL запрос и вернуть `data` из ответа
    pub async fn execute<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: Value,
    ) -> Result<T, SyncError> {
        let (url, token) = self.credentials()?;

        tracing::debug!("Shopify GraphQL request: POST {} variables={}", url, variables);

        let response = self
            .client
            .post(&url)
            .header("X-Shopify-Access-Token", token)
            .header("Accept", "application/json")
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!("Shopify GraphQL request failed with status {}: {}", status, body);
            return Err(SyncError::Transport {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: GraphQLEnvelope = serde_json::from_str(&body).map_err(|e| {
            let preview: String = body.chars().take(500).collect();
            SyncError::Decode(format!("{}. Response: {}", e, preview))
        })?;

        // errors обычно массив, но иногда Shopify отдаёт строку
        let errors = match envelope.errors {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(errors)) => errors,
            Some(other) => vec![other],
        };
        if !errors.is_empty() {
            return Err(SyncError::Application(errors));
        }

        let data = envelope
            .data
            .ok_or_else(|| SyncError::Decode("response has no data".to_string()))?;

        serde_json::from_value(data).map_err(|e| SyncError::Decode(e.to_string()))
    }
}

fn missing_credentials() -> SyncError {
    SyncError::Configuration(
        "SHOPIFY_SHOP or SHOPIFY_ADMIN_TOKEN is not configured".to_string(),
    )
}

#[async_trait]
impl CatalogClient for ShopifyApiClient {
    async fn find_variants_by_sku(&self, sku: &str) -> Result<Vec<CatalogVariant>, SyncError> {
        let data: FindVariantData = self
            .execute(
                queries::FIND_VARIANT_BY_SKU,
                json!({ "q": format!("sku:{}", sku) }),
            )
            .await?;

        Ok(data
            .product_variants
            .edges
            .into_iter()
            .map(|edge| edge.node)
            .collect())
    }

    async fn update_variant_price(
        &self,
        variant_id: &str,
        price: f64,
        compare_at_price: Option<f64>,
    ) -> Result<VariantUpdate, SyncError> {
        let mut input = json!({
            "id": variant_id,
            "price": format_price(price),
        });
        if let Some(compare_at) = compare_at_price {
            input["compareAtPrice"] = Value::String(format_price(compare_at));
        }

        let data: UpdateVariantData = self
            .execute(queries::UPDATE_VARIANT_PRICE, json!({ "input": input }))
            .await?;

        let payload = data.product_variant_update.ok_or_else(|| {
            SyncError::Decode("productVariantUpdate is null".to_string())
        })?;

        Ok(VariantUpdate {
            variant: payload.product_variant,
            user_errors: payload.user_errors,
        })
    }
}

// ============================================================================
// Response structures для Shopify GraphQL API
// ============================================================================

#[derive(Debug, Deserialize)]
struct GraphQLEnvelope {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct FindVariantData {
    #[serde(rename = "productVariants")]
    product_variants: VariantConnection,
}

#[derive(Debug, Deserialize)]
struct VariantConnection {
    #[serde(default)]
    edges: Vec<VariantEdge>,
}

#[derive(Debug, Deserialize)]
struct VariantEdge {
    node: CatalogVariant,
}

#[derive(Debug, Deserialize)]
struct UpdateVariantData {
    #[serde(rename = "productVariantUpdate")]
    product_variant_update: Option<UpdateVariantPayload>,
}

#[derive(Debug, Deserialize)]
struct UpdateVariantPayload {
    #[serde(rename = "productVariant")]
    product_variant: Option<CatalogVariant>,
    #[serde(rename = "userErrors", default)]
    user_errors: Vec<UserError>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn config(shop: Option<&str>, token: Option<&str>) -> ShopifyConfig {
        ShopifyConfig {
            shop: shop.map(str::to_string),
            access_token: token.map(str::to_string),
            api_version: "2026-01".to_string(),
            timeout_secs: 5,
        }
    }

    fn client_for(server: &MockServer) -> ShopifyApiClient {
        ShopifyApiClient::new(&config(Some("demo.myshopify.com"), Some("shpat_test")))
            .unwrap()
            .with_endpoint(server.url("/admin/api/2026-01/graphql.json"))
    }

    #[test]
    fn test_endpoint_from_shop_and_version() {
        let client =
            ShopifyApiClient::new(&config(Some("demo.myshopify.com"), Some("tok"))).unwrap();
        let (url, token) = client.credentials().unwrap();
        assert_eq!(url, "https://demo.myshopify.com/admin/api/2026-01/graphql.json");
        assert_eq!(token, "tok");
    }

    #[tokio::test]
    async fn test_missing_token_fails_before_request() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(200).json_body(json!({"data": {}}));
            })
            .await;

        let client = ShopifyApiClient::new(&config(Some("demo.myshopify.com"), None))
            .unwrap()
            .with_endpoint(server.url("/graphql.json"));

        let err = client.find_variants_by_sku("A1").await.unwrap_err();
        assert!(matches!(err, SyncError::Configuration(_)));
        mock.assert_calls_async(0).await;
    }

    #[tokio::test]
    async fn test_missing_shop_is_configuration_error() {
        let client = ShopifyApiClient::new(&config(None, Some("tok"))).unwrap();
        let err = client.find_variants_by_sku("A1").await.unwrap_err();
        assert!(matches!(err, SyncError::Configuration(_)));
    }

    #[tokio::test]
    async fn test_find_variants_by_sku() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/admin/api/2026-01/graphql.json")
                    .header("x-shopify-access-token", "shpat_test")
                    .json_body(json!({
                        "query": queries::FIND_VARIANT_BY_SKU,
                        "variables": {"q": "sku:A1"}
                    }));
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(json!({
                        "data": {
                            "productVariants": {
                                "edges": [
                                    {"node": {
                                        "id": "gid://shopify/ProductVariant/1",
                                        "sku": "A1",
                                        "price": "10.00",
                                        "product": {"id": "gid://shopify/Product/7", "title": "Mug"}
                                    }},
                                    {"node": {
                                        "id": "gid://shopify/ProductVariant/2",
                                        "sku": "A10",
                                        "price": "12.00",
                                        "product": {"id": "gid://shopify/Product/8", "title": "Cup"}
                                    }}
                                ]
                            }
                        }
                    }));
            })
            .await;

        let variants = client_for(&server).find_variants_by_sku("A1").await.unwrap();

        mock.assert_async().await;
        assert_eq!(variants.len(), 2);
        assert_eq!(variants[0].id, "gid://shopify/ProductVariant/1");
        assert_eq!(variants[1].sku.as_deref(), Some("A10"));
        assert_eq!(
            variants[0].product.as_ref().and_then(|p| p.title.as_deref()),
            Some("Mug")
        );
    }

    #[tokio::test]
    async fn test_update_sends_two_decimal_prices() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).json_body(json!({
                    "query": queries::UPDATE_VARIANT_PRICE,
                    "variables": {"input": {
                        "id": "gid://shopify/ProductVariant/1",
                        "price": "19.50",
                        "compareAtPrice": "25.00"
                    }}
                }));
                then.status(200).json_body(json!({
                    "data": {"productVariantUpdate": {
                        "productVariant": {
                            "id": "gid://shopify/ProductVariant/1",
                            "price": "19.50",
                            "sku": "B2"
                        },
                        "userErrors": []
                    }}
                }));
            })
            .await;

        let update = client_for(&server)
            .update_variant_price("gid://shopify/ProductVariant/1", 19.5, Some(25.0))
            .await
            .unwrap();

        mock.assert_async().await;
        assert!(update.user_errors.is_empty());
        assert_eq!(
            update.variant.and_then(|v| v.price).as_deref(),
            Some("19.50")
        );
    }

    #[tokio::test]
    async fn test_update_returns_user_errors() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(200).json_body(json!({
                    "data": {"productVariantUpdate": {
                        "productVariant": null,
                        "userErrors": [{"field": ["price"], "message": "Price is invalid"}]
                    }}
                }));
            })
            .await;

        let update = client_for(&server)
            .update_variant_price("gid://shopify/ProductVariant/1", 1.0, None)
            .await
            .unwrap();

        assert_eq!(update.variant, None);
        assert_eq!(
            update.user_errors,
            vec![UserError {
                field: Some(vec!["price".to_string()]),
                message: "Price is invalid".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_non_success_status_is_transport_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(401).body("[API] Invalid API key or access token");
            })
            .await;

        let err = client_for(&server).find_variants_by_sku("A1").await.unwrap_err();
        match err {
            SyncError::Transport { status, body } => {
                assert_eq!(status, 401);
                assert_eq!(body, "[API] Invalid API key or access token");
            }
            other => panic!("expected transport error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_graphql_errors_are_application_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(200).json_body(json!({
                    "errors": [{"message": "Throttled", "extensions": {"code": "THROTTLED"}}]
                }));
            })
            .await;

        let err = client_for(&server).find_variants_by_sku("A1").await.unwrap_err();
        match err {
            SyncError::Application(errors) => {
                assert_eq!(
                    errors,
                    vec![json!({"message": "Throttled", "extensions": {"code": "THROTTLED"}})]
                );
            }
            other => panic!("expected application error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_errors_list_is_success() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(200).json_body(json!({
                    "data": {"productVariants": {"edges": []}},
                    "errors": []
                }));
            })
            .await;

        let variants = client_for(&server).find_variants_by_sku("Z9").await.unwrap();
        assert!(variants.is_empty());
    }
}
