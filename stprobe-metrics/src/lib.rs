mod parse;
mod sample;
mod summary;

pub use self::parse::{parse_server_timing, MetricValue};
pub use self::sample::MetricSample;
pub use self::summary::{RunSummary, Trend};
