pub mod conversion;

pub use conversion::{Conversion, EsqlInput, SubmissionSource, DEFAULT_FILE_NAME};
