use crate::dtos::ConvertRequest;
use crate::models::{EsqlInput, SubmissionSource};
use axum::async_trait;
use axum::body::Bytes;
use axum::extract::multipart::MultipartError;
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::{header, StatusCode};
use axum::Json;
use service_core::error::AppError;

/// Multipart field carrying the uploaded file.
pub const FILE_FIELD: &str = "file";

/// Error returned when a multipart upload exceeds the body limit.
pub const FILE_TOO_LARGE_MESSAGE: &str = "File too large: upload exceeds the configured size limit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub file_name: Option<String>,
    pub content: String,
}

/// ESQL submission decoded from whichever transport the caller used.
///
/// The variant is chosen from `Content-Type`:
/// - `multipart/form-data`: a `file` part, plus optional text fields named
///   like the JSON body
/// - `application/json` or `*/*+json`: [`ConvertRequest`]
/// - anything else: the raw body as text
#[derive(Debug)]
pub enum EsqlSubmission {
    Form {
        file: Option<UploadedFile>,
        fields: ConvertRequest,
    },
    Json(ConvertRequest),
    Text(String),
}

impl EsqlSubmission {
    pub fn source(&self) -> SubmissionSource {
        match self {
            EsqlSubmission::Form { file: Some(_), .. } => SubmissionSource::Upload,
            EsqlSubmission::Form { file: None, .. } => SubmissionSource::Form,
            EsqlSubmission::Json(_) => SubmissionSource::Json,
            EsqlSubmission::Text(_) => SubmissionSource::Text,
        }
    }

    /// Normalizes into a validated [`EsqlInput`].
    pub fn into_input(self) -> Result<EsqlInput, AppError> {
        let source = self.source();
        match self {
            EsqlSubmission::Form {
                file: Some(file), ..
            } => EsqlInput::new(Some(file.content), file.file_name, source),
            EsqlSubmission::Form { file: None, fields } | EsqlSubmission::Json(fields) => {
                let (content, file_name) = fields.into_parts();
                EsqlInput::new(content, file_name, source)
            }
            EsqlSubmission::Text(content) => EsqlInput::new(Some(content), None, source),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum BodyKind {
    Multipart,
    Json,
    Text,
}

fn body_kind(content_type: Option<&str>) -> BodyKind {
    let mime = content_type
        .and_then(|ct| ct.split(';').next())
        .map(|mime| mime.trim().to_ascii_lowercase())
        .unwrap_or_default();

    if mime == "multipart/form-data" {
        BodyKind::Multipart
    } else if mime == "application/json" || mime.ends_with("+json") {
        BodyKind::Json
    } else {
        BodyKind::Text
    }
}

/// Maps a body rejection, keeping the size guard distinct from malformed input.
fn rejection(status: StatusCode, message: String) -> AppError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(message)
    } else {
        AppError::BadRequest(anyhow::anyhow!(message))
    }
}

/// The multipart parser reports the size guard as a generic stream failure,
/// so the 413 case gets its own message.
fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(FILE_TOO_LARGE_MESSAGE.to_string())
    } else {
        rejection(err.status(), err.body_text())
    }
}

async fn read_form(mut multipart: Multipart) -> Result<EsqlSubmission, AppError> {
    let mut file = None;
    let mut fields = ConvertRequest::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            FILE_FIELD if file.is_none() => {
                let file_name = field.file_name().map(str::to_string);
                let data = field.bytes().await.map_err(multipart_error)?;
                file = Some(UploadedFile {
                    file_name,
                    content: String::from_utf8_lossy(&data).into_owned(),
                });
            }
            "content" => fields.content = Some(field.text().await.map_err(multipart_error)?),
            "esqlContent" => {
                fields.esql_content = Some(field.text().await.map_err(multipart_error)?)
            }
            "filename" | "fileName" => {
                fields.filename = Some(field.text().await.map_err(multipart_error)?)
            }
            _ => tracing::debug!(field = %name, "Ignoring unexpected multipart field"),
        }
    }

    Ok(EsqlSubmission::Form { file, fields })
}

#[async_trait]
impl<S> FromRequest<S> for EsqlSubmission
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let kind = body_kind(
            req.headers()
                .get(header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok()),
        );

        match kind {
            BodyKind::Multipart => {
                let multipart = Multipart::from_request(req, state)
                    .await
                    .map_err(|e| rejection(e.status(), e.body_text()))?;
                read_form(multipart).await
            }
            BodyKind::Json => {
                let Json(body) = Json::<ConvertRequest>::from_request(req, state)
                    .await
                    .map_err(|e| rejection(e.status(), e.body_text()))?;
                Ok(EsqlSubmission::Json(body))
            }
            BodyKind::Text => {
                let data = Bytes::from_request(req, state)
                    .await
                    .map_err(|e| rejection(e.status(), e.body_text()))?;
                Ok(EsqlSubmission::Text(
                    String::from_utf8_lossy(&data).into_owned(),
                ))
            }
        }
    }
}
