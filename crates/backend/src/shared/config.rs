use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub shopify: ShopifyConfig,
    pub sync: SyncConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

/// Подключение к Shopify Admin API.
///
/// `shop` и `access_token` могут быть не заданы: сервис стартует и без них,
/// а клиент проверяет их при каждом запросе.
#[derive(Debug, Deserialize, Clone)]
pub struct ShopifyConfig {
    /// Домен магазина, например "my-store.myshopify.com"
    #[serde(default)]
    pub shop: Option<String>,
    #[serde(default)]
    pub access_token: Option<String>,
    pub api_version: String,
    /// Таймаут одного запроса к GraphQL API, секунды
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SyncConfig {
    /// Значение заголовка X-Internal-Key; если не задано, endpoint открыт
    #[serde(default)]
    pub internal_key: Option<String>,
    /// Путь к файлу с ценами (xlsx/xls/ods/csv)
    pub price_file: String,
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
port = 3000

[shopify]
api_version = "2026-01"
timeout_secs = 60

[sync]
price_file = "./prices.xlsx"
"#;

impl Config {
    /// Переопределяет значения из переменных окружения.
    ///
    /// Пустые значения считаются незаданными.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> anyhow::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).and_then(non_empty);

        if let Some(shop) = get("SHOPIFY_SHOP") {
            self.shopify.shop = Some(shop);
        }
        if let Some(token) = get("SHOPIFY_ADMIN_TOKEN") {
            self.shopify.access_token = Some(token);
        }
        if let Some(version) = get("SHOPIFY_API_VERSION") {
            self.shopify.api_version = version;
        }
        if let Some(timeout) = get("SHOPIFY_TIMEOUT_SECS") {
            self.shopify.timeout_secs = timeout
                .trim()
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid SHOPIFY_TIMEOUT_SECS '{}': {}", timeout, e))?;
        }
        if let Some(key) = get("INTERNAL_KEY") {
            self.sync.internal_key = Some(key);
        }
        if let Some(path) = get("EXCEL_PATH") {
            self.sync.price_file = path;
        }
        if let Some(port) = get("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid PORT '{}': {}", port, e))?;
        }

        // Пустые строки из config.toml тоже означают "не задано"
        self.shopify.shop = self.shopify.shop.take().and_then(non_empty);
        self.shopify.access_token = self.shopify.access_token.take().and_then(non_empty);
        self.sync.internal_key = self.sync.internal_key.take().and_then(non_empty);

        Ok(())
    }

    /// Проверка конфигурации при старте.
    ///
    /// Отсутствие учётных данных Shopify не считается фатальным,
    /// только предупреждение в лог.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.shopify.api_version.trim().is_empty() {
            anyhow::bail!("shopify.api_version must not be empty");
        }
        if self.shopify.timeout_secs == 0 {
            anyhow::bail!("shopify.timeout_secs must be greater than 0");
        }
        if self.sync.price_file.trim().is_empty() {
            anyhow::bail!("sync.price_file must not be empty");
        }

        if self.shopify.shop.is_none() || self.shopify.access_token.is_none() {
            tracing::warn!(
                "SHOPIFY_SHOP or SHOPIFY_ADMIN_TOKEN is not set; /sync-prices will fail until configured"
            );
        }
        if self.sync.internal_key.is_none() {
            tracing::warn!("INTERNAL_KEY is not set; /sync-prices is not protected");
        }

        Ok(())
    }
}

/// Значение без изменений, если оно не пустое и не из одних пробелов
fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
///
/// Затем применяются переменные окружения.
pub fn load_config() -> anyhow::Result<Config> {
    let mut config = load_file_config()?;
    config.apply_env_overrides(|key| std::env::var(key).ok())?;
    config.validate()?;
    Ok(config)
}

fn load_file_config() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                let config: Config = toml::from_str(&contents)?;
                return Ok(config);
            } else {
                tracing::debug!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    let config: Config = toml::from_str(DEFAULT_CONFIG)?;
    Ok(config)
}

/// Путь к файлу цен. Относительный путь берётся от текущей директории,
/// как и в переменной EXCEL_PATH.
pub fn get_price_file_path(config: &Config) -> PathBuf {
    Path::new(&config.sync.price_file).to_path_buf()
}
