mod runreport;

pub use self::runreport::{render_body, RequestLine, RunReport};
