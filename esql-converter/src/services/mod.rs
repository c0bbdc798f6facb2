pub mod metrics;
pub mod xsd;

pub use self::metrics::{get_metrics, init_metrics, record_conversion};
pub use xsd::{convert, converted_file_name, render, XsdTemplate, CONVERSION_TYPE};
