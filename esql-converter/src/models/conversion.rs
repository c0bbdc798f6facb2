use chrono::{DateTime, SecondsFormat, Utc};
use service_core::error::AppError;

/// File name used when the caller does not supply one.
pub const DEFAULT_FILE_NAME: &str = "input.esql";

/// Transport that carried the ESQL text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionSource {
    Upload,
    Form,
    Json,
    Text,
}

impl SubmissionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionSource::Upload => "upload",
            SubmissionSource::Form => "form",
            SubmissionSource::Json => "json",
            SubmissionSource::Text => "text",
        }
    }
}

/// Validated, request-scoped input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EsqlInput {
    pub content: String,
    pub file_name: String,
    pub source: SubmissionSource,
}

impl EsqlInput {
    /// Rejects missing or blank content and substitutes the default file name
    /// for a missing or blank one.
    pub fn new(
        content: Option<String>,
        file_name: Option<String>,
        source: SubmissionSource,
    ) -> Result<Self, AppError> {
        let content = content
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("ESQL content is empty")))?;

        let file_name = file_name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_FILE_NAME.to_string());

        Ok(Self {
            content,
            file_name,
            source,
        })
    }
}

/// Result of converting one input.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub original_file_name: String,
    pub converted_file_name: String,
    pub xsd_content: String,
    pub esql_content_length: usize,
    pub xsd_content_length: usize,
    pub converted_at: DateTime<Utc>,
}

impl Conversion {
    /// RFC 3339 with millisecond precision and a `Z` suffix.
    pub fn conversion_date(&self) -> String {
        self.converted_at.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}
