pub mod convert;
pub mod health;
pub mod info;
pub mod metrics;

pub use convert::convert_esql;
pub use health::health_check;
pub use info::{api_info, not_found};
pub use self::metrics::metrics_endpoint;
