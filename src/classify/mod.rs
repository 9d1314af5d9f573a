pub mod classify_records;
pub mod classify_sequence;

pub use classify_records::{classify_records_parallel, ClassifyOptions};
pub use classify_sequence::*;
