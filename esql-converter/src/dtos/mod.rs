pub mod conversion;

pub use conversion::{ConversionResponse, ConvertRequest};
