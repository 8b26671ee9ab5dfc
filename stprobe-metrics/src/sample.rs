use crate::parse::MetricValue;
use fnv::FnvHashMap;

pub const UNKNOWN_CACHE: &str = "N/A";

/// Parsed result of one HTTP round trip.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSample {
    index: usize,
    io: f64,
    cpu: f64,
    cache: String,
    total: f64,
}

impl MetricSample {
    pub fn new<S: Into<String>>(index: usize, io: f64, cpu: f64, cache: S) -> MetricSample {
        MetricSample {
            index,
            io,
            cpu,
            cache: cache.into(),
            total: io + cpu,
        }
    }

    /// Build a sample from parsed `Server-Timing` metrics and the optional
    /// `X-Cache-Level` header. Missing durations default to zero. The
    /// header value takes precedence over a `cache` desc entry; when both
    /// are absent the cache level is `"N/A"`.
    pub fn from_metrics(
        index: usize,
        metrics: &FnvHashMap<String, MetricValue>,
        cache_header: Option<&str>,
    ) -> MetricSample {
        let io = metrics.get("io").and_then(MetricValue::as_dur).unwrap_or(0.0);
        let cpu = metrics.get("cpu").and_then(MetricValue::as_dur).unwrap_or(0.0);
        let cache = cache_header
            .or_else(|| metrics.get("cache").and_then(MetricValue::as_desc))
            .unwrap_or(UNKNOWN_CACHE);
        MetricSample::new(index, io, cpu, cache)
    }

    /// Sentinel for a failed fetch: zero durations, unknown cache level.
    pub fn failed(index: usize) -> MetricSample {
        MetricSample::new(index, 0.0, 0.0, UNKNOWN_CACHE)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn io(&self) -> f64 {
        self.io
    }

    pub fn cpu(&self) -> f64 {
        self.cpu
    }

    pub fn cache(&self) -> &str {
        &self.cache
    }

    pub fn total(&self) -> f64 {
        self.total
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::parse::parse_server_timing;

    #[test]
    fn totals_io_plus_cpu() {
        let s = MetricSample::new(1, 12.5, 3.25, "L1");
        assert_eq!(s.total(), 15.75);
    }

    #[test]
    fn missing_durations_default_to_zero() {
        let metrics = parse_server_timing(Some("io;dur=4.0"));
        let s = MetricSample::from_metrics(1, &metrics, None);
        assert_eq!(s.io(), 4.0);
        assert_eq!(s.cpu(), 0.0);
        assert_eq!(s.total(), 4.0);
    }

    #[test]
    fn cache_header_beats_desc_entry() {
        let metrics = parse_server_timing(Some("cache;desc=L2"));
        let s = MetricSample::from_metrics(1, &metrics, Some("L1"));
        assert_eq!(s.cache(), "L1");
    }

    #[test]
    fn desc_entry_used_when_header_absent() {
        let metrics = parse_server_timing(Some("cache;desc=L2"));
        let s = MetricSample::from_metrics(1, &metrics, None);
        assert_eq!(s.cache(), "L2");
    }

    #[test]
    fn unknown_cache_when_neither_source_present() {
        let metrics = parse_server_timing(None);
        let s = MetricSample::from_metrics(1, &metrics, None);
        assert_eq!(s.cache(), UNKNOWN_CACHE);
    }

    #[test]
    fn failed_sample_is_all_zero() {
        let s = MetricSample::failed(2);
        assert_eq!(s.index(), 2);
        assert_eq!(s.io(), 0.0);
        assert_eq!(s.cpu(), 0.0);
        assert_eq!(s.total(), 0.0);
        assert_eq!(s.cache(), UNKNOWN_CACHE);
    }
}
