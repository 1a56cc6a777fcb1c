use std::fmt;

use crate::boost::BoostRequest;
use crate::server::calculator::apply_boosts;
use crate::server::log_cache::LogCache;

#[derive(Debug)]
pub enum CalculateError {
    Parse(serde_json::Error),
}

impl fmt::Display for CalculateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for CalculateError {}

pub fn health_payload() -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&serde_json::json!({
        "status": "ok",
        "service": "rs3calc-api",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// An empty body is treated as a request with every field defaulted.
pub fn calculate_payload(body: &str, logs: &LogCache) -> Result<String, CalculateError> {
    let request: BoostRequest = if body.trim().is_empty() {
        BoostRequest::default()
    } else {
        serde_json::from_str(body).map_err(CalculateError::Parse)?
    };
    let result = apply_boosts(&request);
    logs.record(&format!(
        "Calculated {:.2} XP from base {:.2} ({} steps)",
        result.total,
        request.base_xp,
        result.steps.len()
    ));
    serde_json::to_string(&result).map_err(CalculateError::Parse)
}

pub fn logs_payload(logs: &LogCache) -> Result<String, serde_json::Error> {
    serde_json::to_string(&logs.lines())
}
