mod fixtures;

pub use fixtures::{LogDir, request_line};
