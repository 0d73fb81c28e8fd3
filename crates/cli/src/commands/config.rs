use std::env;
use std::fs;
use std::path::Path;

use homewatt_core::config::{resolve_config_path, AppConfig, LoadOptions};
use secrecy::ExposeSecret;
use toml::Value;

use crate::commands::CommandResult;

const COMMAND: &str = "config";

struct Field<'a> {
    key: &'a str,
    env_keys: &'a [&'a str],
    value: String,
}

pub fn run() -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                COMMAND,
                "config_validation",
                format!("configuration issue: {error}"),
                2,
            );
        }
    };

    let config_file_path = resolve_config_path(None);
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());

    let api_key = config
        .catalog
        .api_key
        .as_ref()
        .map(|key| redact_secret(key.expose_secret()))
        .unwrap_or_else(|| "<unset>".to_string());

    let fields = [
        Field {
            key: "catalog.base_url",
            env_keys: &["HOMEWATT_CATALOG_BASE_URL"],
            value: config
                .catalog
                .base_url
                .clone()
                .unwrap_or_else(|| "<unset> (built-in catalog)".to_string()),
        },
        Field { key: "catalog.api_key", env_keys: &["HOMEWATT_CATALOG_API_KEY"], value: api_key },
        Field {
            key: "catalog.timeout_secs",
            env_keys: &["HOMEWATT_CATALOG_TIMEOUT_SECS"],
            value: config.catalog.timeout_secs.to_string(),
        },
        Field {
            key: "catalog.cache_ttl_secs",
            env_keys: &["HOMEWATT_CATALOG_CACHE_TTL_SECS"],
            value: config.catalog.cache_ttl_secs.to_string(),
        },
        Field {
            key: "matching.max_products",
            env_keys: &["HOMEWATT_MATCHING_MAX_PRODUCTS"],
            value: config.matching.max_products.to_string(),
        },
        Field {
            key: "matching.fallback_count",
            env_keys: &["HOMEWATT_MATCHING_FALLBACK_COUNT"],
            value: config.matching.fallback_count.to_string(),
        },
        Field {
            key: "server.bind_address",
            env_keys: &["HOMEWATT_SERVER_BIND_ADDRESS"],
            value: config.server.bind_address.clone(),
        },
        Field {
            key: "server.port",
            env_keys: &["HOMEWATT_SERVER_PORT"],
            value: config.server.port.to_string(),
        },
        Field {
            key: "logging.level",
            env_keys: &["HOMEWATT_LOGGING_LEVEL", "HOMEWATT_LOG_LEVEL"],
            value: config.logging.level.clone(),
        },
        Field {
            key: "logging.format",
            env_keys: &["HOMEWATT_LOGGING_FORMAT", "HOMEWATT_LOG_FORMAT"],
            value: format!("{:?}", config.logging.format),
        },
    ];

    let mut lines =
        vec!["effective config (source precedence: env > file > default):".to_string()];
    for field in &fields {
        let source = field_source(
            field.key,
            field.env_keys,
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        );
        lines.push(render_line(field.key, &field.value, source));
    }

    CommandResult::success(COMMAND, lines.join("\n"))
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    env_keys: &[&str],
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    if let Some(env_key) = env_keys.iter().find(|key| env::var_os(key).is_some()) {
        return format!("env ({env_key})");
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("- {key} = {value} (source: {source})")
}

/// Keeps the last four characters of long keys so operators can tell keys apart.
fn redact_secret(secret: &str) -> String {
    let trimmed = secret.trim();
    let count = trimmed.chars().count();
    if count < 12 {
        return "<redacted>".to_string();
    }

    let tail: String = trimmed.chars().skip(count - 4).collect();
    format!("***{tail}")
}

#[cfg(test)]
mod tests {
    use toml::Value;

    use super::{contains_path, redact_secret};

    #[test]
    fn short_secrets_are_fully_redacted() {
        assert_eq!(redact_secret("abc123"), "<redacted>");
        assert_eq!(redact_secret("catalog-key-9f3a"), "***9f3a");
    }

    #[test]
    fn nested_key_paths_are_resolved() {
        let doc: Value = "[catalog]\nbase_url = \"https://x.test\"\n".parse().expect("valid toml");

        assert!(contains_path(&doc, "catalog.base_url"));
        assert!(!contains_path(&doc, "catalog.api_key"));
    }
}
