use std::fmt::{Display, Formatter, Result as FmtResult};
use stprobe_metrics::{MetricSample, RunSummary};

pub struct RunReport {
    label: String,
    url: String,
    samples: Vec<MetricSample>,
    summary: RunSummary,
}

impl RunReport {
    pub fn new(label: &str, url: &str, samples: Vec<MetricSample>) -> RunReport {
        let summary = RunSummary::from_samples(&samples);
        RunReport {
            label: label.to_string(),
            url: url.to_string(),
            samples,
            summary,
        }
    }

    pub fn samples(&self) -> &[MetricSample] {
        &self.samples
    }

    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }
}

fn fmt_ms(ms: f64) -> String {
    format!("{:.2}ms", ms)
}

/// Single-request line printed as each response comes in.
pub struct RequestLine<'a>(pub &'a MetricSample);

impl<'a> Display for RequestLine<'a> {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        let s = self.0;
        write!(
            f,
            "Request #{}: io {}  cpu {}  cache {}  total {}",
            s.index(),
            fmt_ms(s.io()),
            fmt_ms(s.cpu()),
            s.cache(),
            fmt_ms(s.total())
        )
    }
}

/// Pretty-print a response body as JSON when it parses, verbatim otherwise.
pub fn render_body(body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => serde_json::to_string_pretty(&value).unwrap_or_else(|_| body.to_string()),
        Err(_) => body.to_string(),
    }
}

impl Display for RunReport {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        writeln!(f, "* {} ({})", self.label, self.url)?;
        writeln!(
            f,
            "  {:>4}  {:>10}  {:>10}  {:<10}{:>12}",
            "req", "io (ms)", "cpu (ms)", "cache", "total (ms)"
        )?;
        for s in &self.samples {
            writeln!(
                f,
                "  {:>4}  {:>10.2}  {:>10.2}  {:<10}{:>12.2}",
                s.index(),
                s.io(),
                s.cpu(),
                s.cache(),
                s.total()
            )?;
        }
        let trend = self.summary.trend();
        writeln!(
            f,
            "  Trend (last - first): io {:+.2}  cpu {:+.2}  total {:+.2}",
            trend.io, trend.cpu, trend.total
        )?;
        let mean = self.summary.mean();
        writeln!(
            f,
            "  Average over {} requests: io {}  cpu {}  total {}",
            self.samples.len(),
            fmt_ms(mean.io),
            fmt_ms(mean.cpu),
            fmt_ms(mean.total)
        )?;
        if let Some((first, last)) = self.summary.transition() {
            writeln!(f, "  Cache level changed: {} \u{2192} {}", first, last)?;
        }
        for (level, count) in self.summary.cache_counts() {
            writeln!(f, "    {}: {}x", level, count)?;
        }
        Ok(())
    }
}
