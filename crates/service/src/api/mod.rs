pub mod extract;
pub mod health;
pub mod merge;

pub use extract::ApiJson;
pub use health::health_check;
pub use merge::{MISSING_HEADER, TRUNCATED_HEADER, update_pdf, validate};
