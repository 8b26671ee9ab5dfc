use fnv::FnvHashMap;

#[derive(Debug, Clone, PartialEq)]
pub enum MetricValue {
    /// Duration attribute (`;dur=`), milliseconds
    Dur(f64),
    /// Description attribute (`;desc=`), opaque label
    Desc(String),
}

impl MetricValue {
    pub fn as_dur(&self) -> Option<f64> {
        match self {
            MetricValue::Dur(d) => Some(*d),
            MetricValue::Desc(_) => None,
        }
    }

    pub fn as_desc(&self) -> Option<&str> {
        match self {
            MetricValue::Dur(_) => None,
            MetricValue::Desc(s) => Some(s),
        }
    }
}

/// Parse a `Server-Timing` header value into a name -> value map.
///
/// Entries are comma-separated, each either `name;dur=<float>` or
/// `name;desc=<string>`. Entries matching neither attribute, splitting
/// into other than exactly two parts, or carrying an unparseable float
/// are dropped without error.
pub fn parse_server_timing(header: Option<&str>) -> FnvHashMap<String, MetricValue> {
    let mut metrics = FnvHashMap::default();
    let header = match header {
        Some(h) => h,
        None => return metrics,
    };
    for entry in header.split(", ") {
        if entry.contains(";dur=") {
            let parts: Vec<&str> = entry.split(";dur=").collect();
            if let [name, value] = parts[..] {
                if let Ok(ms) = value.parse::<f64>() {
                    metrics.insert(name.to_string(), MetricValue::Dur(ms));
                }
            }
        } else if entry.contains(";desc=") {
            let parts: Vec<&str> = entry.split(";desc=").collect();
            if let [name, value] = parts[..] {
                metrics.insert(name.to_string(), MetricValue::Desc(value.to_string()));
            }
        }
    }
    metrics
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_dur_entries() {
        let m = parse_server_timing(Some("io;dur=12.5, cpu;dur=3.25"));
        assert_eq!(m.len(), 2);
        assert_eq!(m["io"], MetricValue::Dur(12.5));
        assert_eq!(m["cpu"], MetricValue::Dur(3.25));
    }

    #[test]
    fn parses_desc_entries() {
        let m = parse_server_timing(Some("cache;desc=HIT"));
        assert_eq!(m.len(), 1);
        assert_eq!(m["cache"], MetricValue::Desc("HIT".into()));
    }

    #[test]
    fn mixed_entries_keep_their_kinds() {
        let m = parse_server_timing(Some("io;dur=10.0, cache;desc=L2, cpu;dur=5.0"));
        assert_eq!(m["io"].as_dur(), Some(10.0));
        assert_eq!(m["cpu"].as_dur(), Some(5.0));
        assert_eq!(m["cache"].as_desc(), Some("L2"));
    }

    #[test]
    fn absent_or_empty_header_yields_empty_map() {
        assert!(parse_server_timing(None).is_empty());
        assert!(parse_server_timing(Some("")).is_empty());
    }

    #[test]
    fn entries_without_known_attributes_are_dropped() {
        assert!(parse_server_timing(Some("malformed")).is_empty());
        let m = parse_server_timing(Some("malformed, io;dur=1.0"));
        assert_eq!(m.len(), 1);
        assert_eq!(m["io"], MetricValue::Dur(1.0));
    }

    #[test]
    fn unparseable_durations_are_dropped() {
        let m = parse_server_timing(Some("io;dur=fast, cpu;dur=2.0"));
        assert_eq!(m.len(), 1);
        assert_eq!(m["cpu"], MetricValue::Dur(2.0));
    }

    #[test]
    fn entries_splitting_into_more_than_two_parts_are_dropped() {
        let m = parse_server_timing(Some("io;dur=1.0;dur=2.0"));
        assert!(m.is_empty());
    }

    #[test]
    fn reserializing_parsed_entries_recovers_the_same_pairs() {
        let pairs: Vec<(&str, MetricValue)> = vec![
            ("io", MetricValue::Dur(12.5)),
            ("cpu", MetricValue::Dur(3.25)),
            ("cache", MetricValue::Desc("L1".into())),
        ];
        let header = pairs
            .iter()
            .map(|(name, value)| match value {
                MetricValue::Dur(d) => format!("{};dur={}", name, d),
                MetricValue::Desc(s) => format!("{};desc={}", name, s),
            })
            .collect::<Vec<_>>()
            .join(", ");
        let reparsed = parse_server_timing(Some(&header));
        assert_eq!(reparsed.len(), pairs.len());
        for (name, value) in pairs {
            assert_eq!(reparsed[name], value);
        }
    }
}
