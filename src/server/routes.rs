use crate::server::api;
use crate::server::log_cache::LogCache;

pub struct HttpResponse {
    pub status_code: u16,
    pub content_type: &'static str,
    pub body: String,
}

pub fn route_request(method: &str, path: &str, body: &str, logs: &LogCache) -> HttpResponse {
    let path = path.split('?').next().unwrap_or(path);
    match (method, path) {
        ("GET", "/api/health") => match api::health_payload() {
            Ok(payload) => json_response(payload),
            Err(err) => error_response(500, &err.to_string()),
        },
        ("GET", "/api/logs") => match api::logs_payload(logs) {
            Ok(payload) => json_response(payload),
            Err(err) => error_response(500, &err.to_string()),
        },
        ("POST", "/api/calculate") => match api::calculate_payload(body, logs) {
            Ok(payload) => json_response(payload),
            Err(api::CalculateError::Parse(err)) => {
                logs.record(&format!("Rejected calculation request: {err}"));
                error_response(400, &format!("Invalid request body: {err}"))
            }
        },
        _ => error_response(404, "Route not found"),
    }
}

fn json_response(body: String) -> HttpResponse {
    HttpResponse {
        status_code: 200,
        content_type: "application/json",
        body,
    }
}

fn error_response(status_code: u16, message: &str) -> HttpResponse {
    HttpResponse {
        status_code,
        content_type: "application/json",
        body: format!(
            "{{\n  \"status\": \"error\",\n  \"message\": {}\n}}",
            serde_json::to_string(message).unwrap_or_else(|_| "\"Unknown error\"".to_string())
        ),
    }
}
