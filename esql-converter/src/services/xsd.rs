//! XSD rendering.
//!
//! The ESQL text is never inspected: every conversion yields the same schema
//! skeleton with the source file name and the conversion time embedded as
//! comments.

use crate::models::{Conversion, EsqlInput};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;

/// Label reported as `conversionType` in responses.
pub const CONVERSION_TYPE: &str = "ESQL_TO_XSD";

const SOURCE_SUFFIX: &str = ".esql";
const TARGET_SUFFIX: &str = ".xsd";

/// Schema skeleton variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum XsdTemplate {
    /// Message with header, body and processing status.
    #[default]
    Standard,
    /// Standard skeleton plus customer and order payload types.
    Extended,
}

impl XsdTemplate {
    pub fn as_str(&self) -> &'static str {
        match self {
            XsdTemplate::Standard => "standard",
            XsdTemplate::Extended => "extended",
        }
    }
}

impl std::str::FromStr for XsdTemplate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" => Ok(XsdTemplate::Standard),
            "extended" => Ok(XsdTemplate::Extended),
            _ => Err(format!("Invalid XSD template: {}", s)),
        }
    }
}

/// Replaces a trailing `.esql` (ASCII case-insensitive) with `.xsd`.
///
/// Names without that suffix are returned unchanged.
pub fn converted_file_name(file_name: &str) -> String {
    let split = file_name.len().saturating_sub(SOURCE_SUFFIX.len());
    match (file_name.get(..split), file_name.get(split..)) {
        (Some(stem), Some(suffix))
            if file_name.len() >= SOURCE_SUFFIX.len()
                && suffix.eq_ignore_ascii_case(SOURCE_SUFFIX) =>
        {
            format!("{}{}", stem, TARGET_SUFFIX)
        }
        _ => file_name.to_string(),
    }
}

/// Makes arbitrary text safe to place inside an XML comment.
///
/// Characters outside the XML 1.0 range are dropped, line breaks become
/// spaces, `--` is split and a trailing `-` is padded.
fn comment_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        let c = match c {
            '\t' | '\n' | '\r' => ' ',
            '\u{FFFE}' | '\u{FFFF}' => continue,
            c if c < ' ' => continue,
            c => c,
        };
        if c == '-' && out.ends_with('-') {
            out.push(' ');
        }
        out.push(c);
    }
    if out.ends_with('-') {
        out.push(' ');
    }
    out
}

/// Renders the skeleton for `template`.
pub fn render(template: XsdTemplate, file_name: &str, generated_at: DateTime<Utc>) -> String {
    let body_type = match template {
        XsdTemplate::Standard => STANDARD_BODY_TYPE,
        XsdTemplate::Extended => EXTENDED_BODY_TYPE,
    };

    // File name goes in last so its text is never treated as a placeholder.
    let prologue = PROLOGUE
        .replace(
            "{{GENERATED_AT}}",
            &generated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        )
        .replace("{{FILE_NAME}}", &comment_text(file_name));

    let mut xsd = String::with_capacity(4096);
    xsd.push_str(&prologue);
    xsd.push_str(MESSAGE_TYPES);
    xsd.push_str(body_type);
    if template == XsdTemplate::Extended {
        xsd.push_str(BUSINESS_TYPES);
    }
    xsd.push_str(STATUS_TYPES);
    xsd.push_str(EPILOGUE);
    xsd
}

/// Produces the full conversion record for a validated input.
pub fn convert(
    input: &EsqlInput,
    template: XsdTemplate,
    converted_at: DateTime<Utc>,
) -> Conversion {
    let xsd_content = render(template, &input.file_name, converted_at);

    Conversion {
        original_file_name: input.file_name.clone(),
        converted_file_name: converted_file_name(&input.file_name),
        esql_content_length: input.content.chars().count(),
        xsd_content_length: xsd_content.chars().count(),
        xsd_content,
        converted_at,
    }
}

const PROLOGUE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!-- Generated from ESQL file: {{FILE_NAME}} -->
<!-- Conversion date: {{GENERATED_AT}} -->
<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema"
           xmlns:tns="http://www.example.com/esql/message"
           targetNamespace="http://www.example.com/esql/message"
           elementFormDefault="qualified">

  <xs:element name="Message" type="tns:MessageType"/>
"#;

const MESSAGE_TYPES: &str = r#"
  <xs:complexType name="MessageType">
    <xs:sequence>
      <xs:element name="Header" type="tns:HeaderType"/>
      <xs:element name="Body" type="tns:BodyType"/>
      <xs:element name="ProcessingStatus" type="tns:ProcessingStatusType" minOccurs="0"/>
    </xs:sequence>
  </xs:complexType>

  <xs:complexType name="HeaderType">
    <xs:sequence>
      <xs:element name="MessageId" type="xs:string"/>
      <xs:element name="CorrelationId" type="xs:string" minOccurs="0"/>
      <xs:element name="Timestamp" type="xs:dateTime"/>
      <xs:element name="Source" type="xs:string"/>
      <xs:element name="Destination" type="xs:string" minOccurs="0"/>
      <xs:element name="MessageType" type="xs:string" minOccurs="0"/>
    </xs:sequence>
  </xs:complexType>
"#;

const STANDARD_BODY_TYPE: &str = r#"
  <xs:complexType name="BodyType">
    <xs:sequence>
      <xs:element name="Payload" type="xs:string" minOccurs="0"/>
      <xs:any processContents="lax" minOccurs="0" maxOccurs="unbounded"/>
    </xs:sequence>
  </xs:complexType>
"#;

const EXTENDED_BODY_TYPE: &str = r#"
  <xs:complexType name="BodyType">
    <xs:sequence>
      <xs:element name="Customer" type="tns:CustomerType" minOccurs="0"/>
      <xs:element name="Order" type="tns:OrderType" minOccurs="0" maxOccurs="unbounded"/>
      <xs:element name="Payload" type="xs:string" minOccurs="0"/>
    </xs:sequence>
  </xs:complexType>
"#;

const BUSINESS_TYPES: &str = r#"
  <xs:complexType name="CustomerType">
    <xs:sequence>
      <xs:element name="CustomerId" type="xs:string"/>
      <xs:element name="Name" type="xs:string"/>
      <xs:element name="Email" type="xs:string" minOccurs="0"/>
      <xs:element name="Phone" type="xs:string" minOccurs="0"/>
    </xs:sequence>
  </xs:complexType>

  <xs:complexType name="OrderType">
    <xs:sequence>
      <xs:element name="OrderId" type="xs:string"/>
      <xs:element name="OrderDate" type="xs:date"/>
      <xs:element name="Item" type="tns:OrderItemType" maxOccurs="unbounded"/>
      <xs:element name="TotalAmount" type="xs:decimal"/>
      <xs:element name="Currency" type="xs:string" minOccurs="0"/>
    </xs:sequence>
  </xs:complexType>

  <xs:complexType name="OrderItemType">
    <xs:sequence>
      <xs:element name="ProductId" type="xs:string"/>
      <xs:element name="Quantity" type="xs:positiveInteger"/>
      <xs:element name="UnitPrice" type="xs:decimal"/>
    </xs:sequence>
  </xs:complexType>
"#;

const STATUS_TYPES: &str = r#"
  <xs:complexType name="ProcessingStatusType">
    <xs:sequence>
      <xs:element name="Status" type="tns:StatusCodeType"/>
      <xs:element name="Code" type="xs:string" minOccurs="0"/>
      <xs:element name="Description" type="xs:string" minOccurs="0"/>
      <xs:element name="ProcessedAt" type="xs:dateTime"/>
    </xs:sequence>
  </xs:complexType>

  <xs:simpleType name="StatusCodeType">
    <xs:restriction base="xs:string">
      <xs:enumeration value="SUCCESS"/>
      <xs:enumeration value="WARNING"/>
      <xs:enumeration value="ERROR"/>
      <xs:enumeration value="PENDING"/>
    </xs:restriction>
  </xs:simpleType>
"#;

const EPILOGUE: &str = "\n</xs:schema>\n";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SubmissionSource;

    fn fixed_time() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-01-02T03:04:05.678Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn converted_file_name_replaces_esql_suffix() {
        assert_eq!(converted_file_name("sample.esql"), "sample.xsd");
        assert_eq!(converted_file_name("SAMPLE.ESQL"), "SAMPLE.xsd");
        assert_eq!(converted_file_name("Mixed.EsQl"), "Mixed.xsd");
        assert_eq!(converted_file_name("a.b.esql"), "a.b.xsd");
        assert_eq!(converted_file_name(".esql"), ".xsd");
    }

    #[test]
    fn converted_file_name_without_suffix_is_unchanged() {
        assert_eq!(converted_file_name("sample.txt"), "sample.txt");
        assert_eq!(converted_file_name("sample"), "sample");
        assert_eq!(converted_file_name("esql"), "esql");
        assert_eq!(converted_file_name("sample.esql.bak"), "sample.esql.bak");
        assert_eq!(converted_file_name(""), "");
    }

    #[test]
    fn converted_file_name_handles_multibyte_names() {
        assert_eq!(converted_file_name("модуль.esql"), "модуль.xsd");
        assert_eq!(converted_file_name("ñ.é"), "ñ.é");
        assert_eq!(converted_file_name("日本語"), "日本語");
    }

    #[test]
    fn comment_text_never_contains_double_hyphen() {
        assert_eq!(comment_text("a--b"), "a- -b");
        assert_eq!(comment_text("----"), "- - - - ");
        assert_eq!(comment_text("name-"), "name- ");
        assert_eq!(comment_text("line\nbreak"), "line break");
        assert_eq!(comment_text("bell\u{7}"), "bell");
    }

    #[test]
    fn render_embeds_file_name_and_timestamp() {
        let xsd = render(XsdTemplate::Standard, "sample.esql", fixed_time());

        assert!(xsd.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xsd.contains("<!-- Generated from ESQL file: sample.esql -->"));
        assert!(xsd.contains("<!-- Conversion date: 2024-01-02T03:04:05.678Z -->"));
        assert!(xsd.contains("name=\"HeaderType\""));
        assert!(xsd.contains("name=\"ProcessingStatusType\""));
        assert!(!xsd.contains("CustomerType"));
    }

    #[test]
    fn extended_template_adds_customer_and_order_types() {
        let xsd = render(XsdTemplate::Extended, "orders.esql", fixed_time());

        assert!(xsd.contains("name=\"CustomerType\""));
        assert!(xsd.contains("name=\"OrderType\""));
        assert!(xsd.contains("name=\"OrderItemType\""));
        assert!(xsd.contains("name=\"HeaderType\""));
    }

    #[test]
    fn rendered_documents_are_well_formed() {
        for template in [XsdTemplate::Standard, XsdTemplate::Extended] {
            for name in ["sample.esql", "evil--name-", "<&>\"'.esql", "tab\there"] {
                let xsd = render(template, name, fixed_time());
                let doc = roxmltree::Document::parse(&xsd)
                    .unwrap_or_else(|e| panic!("{} / {}: {}", template.as_str(), name, e));
                assert_eq!(doc.root_element().tag_name().name(), "schema");
            }
        }
    }

    #[test]
    fn output_does_not_depend_on_esql_text() {
        let a = EsqlInput::new(
            Some("CREATE COMPUTE MODULE A\nEND MODULE;".into()),
            Some("same.esql".into()),
            SubmissionSource::Json,
        )
        .unwrap();
        let b = EsqlInput::new(
            Some("garbage".into()),
            Some("same.esql".into()),
            SubmissionSource::Text,
        )
        .unwrap();

        let first = convert(&a, XsdTemplate::Standard, fixed_time());
        let second = convert(&b, XsdTemplate::Standard, fixed_time());
        assert_eq!(first.xsd_content, second.xsd_content);
        assert_ne!(first.esql_content_length, second.esql_content_length);
    }

    #[test]
    fn convert_reports_character_lengths() {
        let input = EsqlInput::new(
            Some("SET é = 1;".into()),
            Some("ünïcode.esql".into()),
            SubmissionSource::Upload,
        )
        .unwrap();

        let conversion = convert(&input, XsdTemplate::Standard, fixed_time());

        assert_eq!(conversion.original_file_name, "ünïcode.esql");
        assert_eq!(conversion.converted_file_name, "ünïcode.xsd");
        assert_eq!(conversion.esql_content_length, 10);
        assert_eq!(
            conversion.xsd_content_length,
            conversion.xsd_content.chars().count()
        );
        assert_eq!(conversion.converted_at, fixed_time());
    }

    #[test]
    fn template_parses_case_insensitively() {
        assert_eq!("Standard".parse::<XsdTemplate>(), Ok(XsdTemplate::Standard));
        assert_eq!(" EXTENDED ".parse::<XsdTemplate>(), Ok(XsdTemplate::Extended));
        assert!("fancy".parse::<XsdTemplate>().is_err());
    }
}
