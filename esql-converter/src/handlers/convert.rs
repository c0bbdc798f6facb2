use crate::dtos::ConversionResponse;
use crate::middleware::EsqlSubmission;
use crate::services::{convert, record_conversion};
use crate::startup::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use chrono::Utc;
use service_core::error::AppError;

pub async fn convert_esql(
    State(state): State<AppState>,
    submission: EsqlSubmission,
) -> Result<impl IntoResponse, AppError> {
    let input = submission.into_input().map_err(|e| {
        tracing::warn!(error = %e, "Rejected ESQL submission");
        e
    })?;

    let conversion = convert(&input, state.config.conversion.template, Utc::now());
    record_conversion(input.source);

    tracing::info!(
        source = input.source.as_str(),
        original_file_name = %conversion.original_file_name,
        converted_file_name = %conversion.converted_file_name,
        esql_length = conversion.esql_content_length,
        xsd_length = conversion.xsd_content_length,
        template = state.config.conversion.template.as_str(),
        "ESQL conversion completed"
    );

    Ok(Json(ConversionResponse::from(conversion)))
}
