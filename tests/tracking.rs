//! Variable and function tracking against a buffering sink

use async_trait::async_trait;
use parking_lot::Mutex;
use simetrics::{
    BufferedSink, MetricsBackend, MetricsBatch, MetricsBuilder, MetricsOptions, MetricsResult,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

#[derive(Debug, Default)]
struct Capture(Arc<Mutex<Vec<MetricsBatch>>>);

#[async_trait]
impl MetricsBackend for Capture {
    fn name(&self) -> &'static str {
        "capture"
    }

    async fn transmit(&self, batch: &MetricsBatch) -> MetricsResult<()> {
        self.0.lock().push(batch.clone());
        Ok(())
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_tracked_variable_follows_updates() {
    let batches = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::new(
        BufferedSink::new(Capture(batches.clone())).with_flush_period(Duration::from_millis(50)),
    );
    let metrics = MetricsBuilder::new(
        MetricsOptions::new().with_track_vars_period(Duration::from_millis(10)),
        sink,
    )
    .build()
    .unwrap();

    let connections = Arc::new(AtomicI64::new(3));
    let _tracker = metrics.track_var_int("connections", connections.clone());

    tokio::time::sleep(Duration::from_millis(80)).await;
    connections.store(9, Ordering::Relaxed);
    tokio::time::sleep(Duration::from_millis(150)).await;
    metrics.shutdown();

    let values: Vec<f64> = batches
        .lock()
        .iter()
        .filter_map(|b| b.gauges.get("connections").copied())
        .collect();
    assert!(values.contains(&3.0));
    assert_eq!(values.last(), Some(&9.0));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_no_tracked_reports_after_stop() {
    let batches = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::new(
        BufferedSink::new(Capture(batches.clone())).with_flush_period(Duration::from_millis(20)),
    );
    let metrics = MetricsBuilder::new(
        MetricsOptions::new().with_track_vars_period(Duration::from_millis(20)),
        sink,
    )
    .build()
    .unwrap();

    let _tracker = metrics.track_func_int("uptime", || 1);
    tokio::time::sleep(Duration::from_millis(100)).await;
    metrics.stop_tracking_vars();
    // let an in-flight sample drain
    tokio::time::sleep(Duration::from_millis(60)).await;
    let settled = batches.lock().len();

    tokio::time::sleep(Duration::from_millis(150)).await;
    metrics.shutdown();

    let batches = batches.lock();
    assert!(batches[..settled].iter().any(|b| b.gauges.contains_key("uptime")));
    assert!(batches[settled..].iter().all(|b| !b.gauges.contains_key("uptime")));
    // flushing kept running after trackers stopped
    assert!(batches.len() > settled);
}
