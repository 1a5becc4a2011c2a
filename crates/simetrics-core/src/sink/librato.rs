//! Librato metrics API backend

use super::buffered::{BufferedSink, SUBMIT_PERIOD};
use super::source::resolve_source;
use super::traits::MetricsBackend;
use crate::config::LibratoConfig;
use crate::config::defaults::HTTP_REQUEST_TIMEOUT;
use crate::error::{MetricsError, MetricsResult};
use crate::store::MetricsBatch;
use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::instrument;

/// Librato sink: aggregates and posts to the Librato API every flush
pub type LibratoSink = BufferedSink<LibratoBackend>;

/// Posts batches to `POST {api_url}/v1/metrics`
#[derive(Debug, Clone)]
pub struct LibratoBackend {
    email: String,
    token: String,
    source: String,
    api_url: String,
    period: Duration,
    http_client: Client,
}

#[derive(Debug, Serialize, PartialEq)]
struct LibratoPayload {
    measure_time: i64,
    source: String,
    gauges: Vec<LibratoMeasurement>,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(untagged)]
enum LibratoMeasurement {
    Value {
        name: String,
        value: f64,
    },
    Summary {
        name: String,
        count: f64,
        min: f64,
        max: f64,
        sum: f64,
        sum_squares: f64,
    },
}

impl LibratoBackend {
    /// Create a backend whose measure times step with `period`
    pub fn new(config: &LibratoConfig, period: Duration) -> Self {
        let http_client = Client::builder()
            .timeout(HTTP_REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();

        Self {
            email: config.email.clone(),
            token: config.token.clone(),
            source: resolve_source(&config.source_format),
            api_url: config.api_url.trim_end_matches('/').to_string(),
            period,
            http_client,
        }
    }

    /// Create a sink around this backend with a matching flush period
    pub fn into_sink(self) -> LibratoSink {
        let period = self.period;
        BufferedSink::new(self).with_flush_period(period)
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/metrics", self.api_url)
    }

    /// Floor a Unix timestamp to the flush period so graphs line up
    fn measure_time(&self, unix_secs: i64) -> i64 {
        let step = (self.period.as_secs() as i64).max(1);
        (unix_secs / step) * step
    }

    fn build_payload(&self, batch: &MetricsBatch, unix_secs: i64) -> LibratoPayload {
        let scalars = batch
            .counters
            .iter()
            .chain(batch.gauges.iter())
            .map(|(name, value)| LibratoMeasurement::Value {
                name: name.clone(),
                value: *value,
            });
        let summaries = batch
            .distributions
            .iter()
            .map(|(name, dist)| LibratoMeasurement::Summary {
                name: name.clone(),
                count: dist.count(),
                min: dist.min(),
                max: dist.max(),
                sum: dist.sum(),
                sum_squares: dist.sum_of_squares(),
            });

        LibratoPayload {
            measure_time: self.measure_time(unix_secs),
            source: self.source.clone(),
            gauges: scalars.chain(summaries).collect(),
        }
    }
}

impl Default for LibratoBackend {
    fn default() -> Self {
        Self::new(&LibratoConfig::default(), SUBMIT_PERIOD)
    }
}

#[async_trait]
impl MetricsBackend for LibratoBackend {
    fn name(&self) -> &'static str {
        "librato"
    }

    fn initialize(&self) -> MetricsResult<()> {
        if self.email.is_empty() || self.token.is_empty() {
            return Err(MetricsError::init(
                "librato",
                "both `email` and `token` must be configured",
            ));
        }
        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            return Err(MetricsError::init(
                "librato",
                format!("invalid api url '{}'", self.api_url),
            ));
        }
        Ok(())
    }

    #[instrument(skip(self, batch), fields(batch_size = batch.len()), level = "debug")]
    async fn transmit(&self, batch: &MetricsBatch) -> MetricsResult<()> {
        if batch.is_empty() {
            return Ok(());
        }

        let payload = self.build_payload(batch, Utc::now().timestamp());
        let response = self
            .http_client
            .post(self.endpoint())
            .basic_auth(&self.email, Some(&self.token))
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MetricsError::http(
                format!("Librato rejected batch ({}): {}", status, body),
                Some(status.as_u16()),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MetricStore;

    fn config() -> LibratoConfig {
        LibratoConfig {
            email: "ops@example.com".to_string(),
            token: "secret".to_string(),
            source_format: "web-01".to_string(),
            api_url: "https://metrics.example.com/".to_string(),
        }
    }

    #[test]
    fn test_initialize_requires_credentials() {
        let mut cfg = config();
        cfg.token.clear();
        let backend = LibratoBackend::new(&cfg, SUBMIT_PERIOD);
        assert!(matches!(
            backend.initialize(),
            Err(MetricsError::Init { ref sink, .. }) if sink == "librato"
        ));

        let backend = LibratoBackend::new(&config(), SUBMIT_PERIOD);
        assert!(backend.initialize().is_ok());
    }

    #[test]
    fn test_initialize_rejects_bad_url() {
        let mut cfg = config();
        cfg.api_url = "metrics.example.com".to_string();
        let backend = LibratoBackend::new(&cfg, SUBMIT_PERIOD);
        assert!(backend.initialize().is_err());
    }

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let backend = LibratoBackend::new(&config(), SUBMIT_PERIOD);
        assert_eq!(backend.endpoint(), "https://metrics.example.com/v1/metrics");
        assert_eq!(backend.source(), "web-01");
    }

    #[test]
    fn test_measure_time_is_floored_to_period() {
        let backend = LibratoBackend::new(&config(), Duration::from_secs(5));
        assert_eq!(backend.measure_time(1_700_000_003), 1_700_000_000);
        assert_eq!(backend.measure_time(1_700_000_005), 1_700_000_005);

        let sub_second = LibratoBackend::new(&config(), Duration::from_millis(50));
        assert_eq!(sub_second.measure_time(1_700_000_003), 1_700_000_003);
    }

    #[test]
    fn test_payload_shape() {
        let store = MetricStore::new();
        store.report_count("app.hits", 3.0);
        store.report_value("app.queue", 7.0);
        store.report_distribution("app.latency", 2.0);
        store.report_distribution("app.latency", 4.0);

        let backend = LibratoBackend::new(&config(), Duration::from_secs(5));
        let payload = backend.build_payload(&store.drain_and_reset(), 1_700_000_004);
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["measure_time"], 1_700_000_000);
        assert_eq!(json["source"], "web-01");

        let gauges = json["gauges"].as_array().unwrap();
        assert_eq!(gauges.len(), 3);
        assert_eq!(gauges[0], serde_json::json!({"name": "app.hits", "value": 3.0}));
        assert_eq!(gauges[1], serde_json::json!({"name": "app.queue", "value": 7.0}));
        assert_eq!(
            gauges[2],
            serde_json::json!({
                "name": "app.latency",
                "count": 2.0,
                "min": 2.0,
                "max": 4.0,
                "sum": 6.0,
                "sum_squares": 20.0
            })
        );
    }

    #[tokio::test]
    async fn test_empty_batch_skips_network() {
        let mut cfg = config();
        // unroutable; an actual request would fail
        cfg.api_url = "http://127.0.0.1:9".to_string();
        let backend = LibratoBackend::new(&cfg, SUBMIT_PERIOD);
        assert!(backend.transmit(&MetricsBatch::default()).await.is_ok());
    }

    #[tokio::test]
    async fn test_transmit_failure_is_reported() {
        let mut cfg = config();
        cfg.api_url = "http://127.0.0.1:9".to_string();
        let backend = LibratoBackend::new(&cfg, SUBMIT_PERIOD);

        let store = MetricStore::new();
        store.report_count("hits", 1.0);
        let result = backend.transmit(&store.drain_and_reset()).await;
        assert!(matches!(result, Err(MetricsError::Http { .. })));
    }
}
