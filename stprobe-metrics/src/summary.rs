use crate::sample::MetricSample;

/// Per-metric `last - first` deltas across a run.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Trend {
    pub io: f64,
    pub cpu: f64,
    pub total: f64,
}

/// Statistics derived from an ordered sequence of samples.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    trend: Trend,
    mean: Trend,
    cache_counts: Vec<(String, usize)>,
    transition: Option<(String, String)>,
}

impl RunSummary {
    pub fn from_samples(samples: &[MetricSample]) -> RunSummary {
        let trend = match (samples.first(), samples.last()) {
            (Some(first), Some(last)) => Trend {
                io: last.io() - first.io(),
                cpu: last.cpu() - first.cpu(),
                total: last.total() - first.total(),
            },
            _ => Trend::default(),
        };
        let mean = if samples.is_empty() {
            Trend::default()
        } else {
            let n = samples.len() as f64;
            Trend {
                io: samples.iter().map(MetricSample::io).sum::<f64>() / n,
                cpu: samples.iter().map(MetricSample::cpu).sum::<f64>() / n,
                total: samples.iter().map(MetricSample::total).sum::<f64>() / n,
            }
        };
        let cache_counts = tally_cache_levels(samples);
        // Transition is only meaningful when the run saw more than one label
        let transition = match (samples.first(), samples.last()) {
            (Some(first), Some(last)) if cache_counts.len() > 1 => {
                Some((first.cache().to_string(), last.cache().to_string()))
            }
            _ => None,
        };
        RunSummary {
            trend,
            mean,
            cache_counts,
            transition,
        }
    }

    pub fn trend(&self) -> Trend {
        self.trend
    }

    pub fn mean(&self) -> Trend {
        self.mean
    }

    /// Occurrences per distinct cache label, in first-seen order.
    pub fn cache_counts(&self) -> &[(String, usize)] {
        &self.cache_counts
    }

    /// `(first, last)` cache labels, present only when more than one
    /// distinct label occurred.
    pub fn transition(&self) -> Option<(&str, &str)> {
        self.transition
            .as_ref()
            .map(|(first, last)| (first.as_str(), last.as_str()))
    }
}

fn tally_cache_levels(samples: &[MetricSample]) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for s in samples {
        match counts.iter_mut().find(|(label, _)| label == s.cache()) {
            Some((_, n)) => *n += 1,
            None => counts.push((s.cache().to_string(), 1)),
        }
    }
    counts
}
