use crate::config::TargetConfig;
use crate::reporting::{render_body, RequestLine, RunReport};
use http::{HeaderMap, StatusCode};
use hyper::client::HttpConnector;
use hyper::{Body, Client, Uri};
use hyper_rustls::HttpsConnector;
use slog::error;
use std::time::Duration;
use stprobe_metrics::{parse_server_timing, MetricSample};
use thiserror::Error;
use tokio::time::delay_for;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(#[from] hyper::Error),
    #[error("unexpected status: {0}")]
    Status(StatusCode),
}

/// Raw pieces of one response that the report cares about. All fields
/// are absent after a failed fetch.
#[derive(Debug, Default)]
pub struct Fetched {
    pub server_timing: Option<String>,
    pub cache_level: Option<String>,
    pub body: Option<String>,
}

pub struct Sampler {
    client: Client<HttpsConnector<HttpConnector>, Body>,
    logger: slog::Logger,
}

impl Sampler {
    pub fn new(logger: slog::Logger) -> Sampler {
        let https = HttpsConnector::new();
        let client = Client::builder().build::<_, Body>(https);
        Sampler { client, logger }
    }

    /// GET a URL and pull out the timing headers and body. Transport
    /// errors and non-2xx statuses are logged and collapsed into an
    /// all-absent result; nothing propagates to the caller.
    pub async fn fetch(&self, url: &Uri) -> Fetched {
        match self.try_fetch(url).await {
            Ok(fetched) => fetched,
            Err(e) => {
                error!(self.logger, "Error fetching {}: {}", url, e);
                Fetched::default()
            }
        }
    }

    async fn try_fetch(&self, url: &Uri) -> Result<Fetched, FetchError> {
        let res = self.client.get(url.clone()).await?;
        let status = res.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }
        let server_timing = header_value(res.headers(), "server-timing");
        let cache_level = header_value(res.headers(), "x-cache-level");
        let body = hyper::body::to_bytes(res.into_body()).await?;
        Ok(Fetched {
            server_timing,
            cache_level,
            body: Some(String::from_utf8_lossy(&body).into_owned()),
        })
    }
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Sequentially fetch a target `trials` times, printing each request as
/// it completes and sleeping `delay` between requests. A failed fetch
/// contributes a zero-valued sample and the loop keeps going.
pub async fn run_trial(
    sampler: &Sampler,
    target: &TargetConfig,
    trials: usize,
    delay: Duration,
) -> RunReport {
    let mut samples = Vec::with_capacity(trials);
    for i in 1..=trials {
        let fetched = sampler.fetch(&target.url).await;
        let metrics = parse_server_timing(fetched.server_timing.as_deref());
        let sample = MetricSample::from_metrics(i, &metrics, fetched.cache_level.as_deref());
        println!("{}", RequestLine(&sample));
        if target.show_body {
            if let Some(ref body) = fetched.body {
                println!("{}", render_body(body));
            }
        }
        samples.push(sample);
        if i < trials {
            delay_for(delay).await;
        }
    }
    RunReport::new(&target.label, &target.url.to_string(), samples)
}
