pub mod submission;

pub use submission::{EsqlSubmission, UploadedFile, FILE_FIELD};
