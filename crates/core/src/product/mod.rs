mod query;
mod timestamp;
mod types;

pub use query::ProductQuery;
pub use timestamp::{format_timestamp, Clock, FixedClock, SystemClock, TIMESTAMP_FORMAT};
pub use types::{Product, ProductKey};
