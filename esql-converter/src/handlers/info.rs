use super::health::SERVICE_NAME;
use crate::middleware::FILE_FIELD;
use crate::models::DEFAULT_FILE_NAME;
use crate::startup::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;
use service_core::error::AppError;

/// Self-describing API document served at `/`.
pub async fn api_info(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Converts ESQL source files into an XSD schema document",
        "endpoints": {
            "POST /api/convert": {
                "description": "Convert ESQL content to XSD",
                "accepts": [
                    format!("multipart/form-data with a '{}' field", FILE_FIELD),
                    "application/json with 'content' or 'esqlContent' and optional 'filename'",
                    "raw text body"
                ],
                "maxUploadBytes": state.config.upload.max_bytes,
                "defaultFileName": DEFAULT_FILE_NAME,
                "template": state.config.conversion.template.as_str()
            },
            "GET /api/health": {
                "description": "Service health status"
            },
            "GET /metrics": {
                "description": "Prometheus metrics"
            }
        },
        "usage": {
            "fileUpload": "curl -X POST -F \"file=@sample.esql\" http://localhost:3000/api/convert",
            "json": "curl -X POST -H \"Content-Type: application/json\" -d '{\"content\":\"CREATE COMPUTE MODULE Sample\\nEND MODULE;\",\"filename\":\"sample.esql\"}' http://localhost:3000/api/convert",
            "rawText": "curl -X POST -H \"Content-Type: text/plain\" --data-binary @sample.esql http://localhost:3000/api/convert"
        }
    }))
}

pub async fn not_found() -> AppError {
    AppError::NotFound(anyhow::anyhow!("Not found"))
}
