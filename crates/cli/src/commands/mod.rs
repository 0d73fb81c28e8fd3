pub mod config;
pub mod doctor;
pub mod filter;
pub mod matching;

use std::fs;
use std::path::Path;

use homewatt_catalog::catalog_from_config;
use homewatt_core::config::{AppConfig, LoadOptions};
use homewatt_core::{MatchService, ProductMatcher, Recommendation, RecommendationFilter};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome {
    command: String,
    status: String,
    error_class: Option<String>,
    message: String,
}

impl CommandResult {
    pub fn success(command: &str, message: impl Into<String>) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message: message.into(),
        };
        Self { exit_code: 0, output: serialize_payload(payload) }
    }

    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: message.into(),
        };
        Self { exit_code, output: serialize_payload(payload) }
    }

    /// Successful run whose output is the serialized result itself.
    pub fn data<T: Serialize>(command: &str, value: &T) -> Self {
        match serde_json::to_string_pretty(value) {
            Ok(output) => Self { exit_code: 0, output },
            Err(error) => Self::failure(command, "serialization", error.to_string(), 1),
        }
    }
}

fn serialize_payload(payload: CommandOutcome) -> String {
    serde_json::to_string(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\
             \"error_class\":\"serialization\",\"message\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InputDocument {
    List(Vec<Recommendation>),
    Envelope {
        recommendations: Vec<Recommendation>,
        #[serde(default)]
        budget: Option<f64>,
    },
}

/// Recommendations read from an input file, plus a budget if the file carried one.
#[derive(Debug)]
pub(crate) struct InputFile {
    pub recommendations: Vec<Recommendation>,
    pub budget: Option<f64>,
}

pub(crate) fn read_input(command: &str, path: &Path) -> Result<InputFile, CommandResult> {
    let raw = fs::read_to_string(path).map_err(|error| {
        CommandResult::failure(
            command,
            "input_read",
            format!("could not read `{}`: {error}", path.display()),
            1,
        )
    })?;

    let document: InputDocument = serde_json::from_str(&raw).map_err(|error| {
        CommandResult::failure(
            command,
            "input_parse",
            format!("`{}` is not a recommendation list: {error}", path.display()),
            1,
        )
    })?;

    Ok(match document {
        InputDocument::List(recommendations) => InputFile { recommendations, budget: None },
        InputDocument::Envelope { recommendations, budget } => {
            InputFile { recommendations, budget }
        }
    })
}

pub(crate) fn load_service(command: &str) -> Result<MatchService, CommandResult> {
    let config = AppConfig::load(LoadOptions::default()).map_err(|error| {
        CommandResult::failure(
            command,
            "config_validation",
            format!("configuration issue: {error}"),
            2,
        )
    })?;

    let catalog = catalog_from_config(&config.catalog).map_err(|error| {
        CommandResult::failure(command, "catalog_setup", error.to_string(), 4)
    })?;

    Ok(MatchService::new(catalog)
        .with_matcher(ProductMatcher::with_max_products(config.matching.max_products))
        .with_filter(RecommendationFilter::with_fallback_count(config.matching.fallback_count)))
}

pub(crate) fn runtime(command: &str) -> Result<tokio::runtime::Runtime, CommandResult> {
    tokio::runtime::Builder::new_current_thread().enable_all().build().map_err(|error| {
        CommandResult::failure(
            command,
            "runtime_init",
            format!("failed to initialize async runtime: {error}"),
            3,
        )
    })
}
