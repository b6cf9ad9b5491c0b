pub mod error;
pub mod record;

pub use error::{ParseError, Result};
pub use record::LogRecord;
