// Engine module - aggregation logic between parsed records and CLI presentation
// This layer is pure: records come in, a report comes out, no I/O

pub mod aggregate;
pub mod report;

pub use aggregate::{Aggregate, FileState, ScanOptions};
pub use report::{Report, percent};
