use serde::{Deserialize, Serialize};

/// Параметры запроса POST /sync-prices (передаются в query string)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncPricesRequest {
    /// Только посчитать изменения, не отправляя мутации в Shopify
    #[serde(default = "default_true", deserialize_with = "deserialize_flag")]
    pub dry_run: bool,
}

fn default_true() -> bool {
    true
}

/// Булев флаг из bool или строки: true/false, 1/0, yes/no, on/off
/// (без учёта регистра)
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        String(String),
    }

    match BoolOrString::deserialize(deserializer)? {
        BoolOrString::Bool(value) => Ok(value),
        BoolOrString::String(s) => parse_flag(&s).ok_or_else(|| {
            de::Error::custom(format!(
                "invalid boolean '{}', expected true/false, 1/0, yes/no or on/off",
                s
            ))
        }),
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
