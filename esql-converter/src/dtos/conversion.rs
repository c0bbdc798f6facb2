use crate::models::Conversion;
use crate::services::CONVERSION_TYPE;
use serde::{Deserialize, Serialize};

/// JSON body accepted by `POST /api/convert`.
///
/// `content` wins over `esqlContent` when both are present.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertRequest {
    pub content: Option<String>,
    pub esql_content: Option<String>,
    #[serde(alias = "fileName")]
    pub filename: Option<String>,
}

impl ConvertRequest {
    pub fn into_parts(self) -> (Option<String>, Option<String>) {
        (self.content.or(self.esql_content), self.filename)
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionResponse {
    pub success: bool,
    pub original_file_name: String,
    pub converted_file_name: String,
    pub xsd_content: String,
    pub esql_content_length: usize,
    pub xsd_content_length: usize,
    pub conversion_date: String,
    pub conversion_type: String,
}

impl From<Conversion> for ConversionResponse {
    fn from(conversion: Conversion) -> Self {
        Self {
            success: true,
            conversion_date: conversion.conversion_date(),
            original_file_name: conversion.original_file_name,
            converted_file_name: conversion.converted_file_name,
            xsd_content: conversion.xsd_content,
            esql_content_length: conversion.esql_content_length,
            xsd_content_length: conversion.xsd_content_length,
            conversion_type: CONVERSION_TYPE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_takes_precedence_over_esql_content() {
        let request: ConvertRequest = serde_json::from_str(
            r#"{"content": "A", "esqlContent": "B", "filename": "f.esql"}"#,
        )
        .unwrap();
        assert_eq!(
            request.into_parts(),
            (Some("A".to_string()), Some("f.esql".to_string()))
        );
    }

    #[test]
    fn esql_content_is_accepted_as_fallback() {
        let request: ConvertRequest =
            serde_json::from_str(r#"{"esqlContent": "B", "fileName": "g.esql"}"#).unwrap();
        assert_eq!(
            request.into_parts(),
            (Some("B".to_string()), Some("g.esql".to_string()))
        );
    }

    #[test]
    fn response_uses_camel_case_fields() {
        let response = ConversionResponse {
            success: true,
            original_file_name: "a.esql".into(),
            converted_file_name: "a.xsd".into(),
            xsd_content: "<x/>".into(),
            esql_content_length: 1,
            xsd_content_length: 4,
            conversion_date: "2024-01-01T00:00:00.000Z".into(),
            conversion_type: CONVERSION_TYPE.into(),
        };

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["originalFileName"], "a.esql");
        assert_eq!(value["convertedFileName"], "a.xsd");
        assert_eq!(value["xsdContentLength"], 4);
        assert_eq!(value["conversionType"], "ESQL_TO_XSD");
    }
}
