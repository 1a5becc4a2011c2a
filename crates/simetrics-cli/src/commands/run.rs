//! Synthetic workload

use crate::args::RunArgs;
use simetrics_core::{Metrics, load_config};
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{Duration, Instant};
use tracing::info;

/// Report a steady stream of fake requests until the duration elapses or
/// Ctrl-C is pressed
pub async fn execute(args: RunArgs) -> anyhow::Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(backend) = args.backend {
        config.backend = backend;
    }

    let metrics = Metrics::from_config(&config);
    let demo = metrics.with_namespace_prefix("demo.");
    info!(
        sink = metrics.sink().name(),
        namespace = demo.namespace(),
        duration = %humantime::format_duration(args.duration),
        rate = args.rate,
        "Starting synthetic workload"
    );

    let in_flight = Arc::new(AtomicI64::new(0));
    let started = Instant::now();
    let _in_flight = demo.track_var_int("in_flight", in_flight.clone());
    let _uptime = demo.track_func_float("uptime_secs", move || started.elapsed().as_secs_f64());

    let mut ticker = tokio::time::interval(tick_period(args.rate));
    let deadline = tokio::time::sleep(args.duration);
    tokio::pin!(deadline);

    let mut sent: u64 = 0;
    let mut interrupted = false;
    loop {
        tokio::select! {
            _ = &mut deadline => break,
            _ = tokio::signal::ctrl_c() => {
                interrupted = true;
                break;
            }
            _ = ticker.tick() => {
                let _timer = demo.start_timer("request_ms");
                demo.increment("requests");
                if sent % 10 == 9 {
                    demo.increment("errors");
                }
                demo.value("queue_depth", (sent % 17) as f64);
                demo.distribution("payload_bytes", 256.0 + (sent % 64) as f64 * 16.0);
                in_flight.store((sent % 5) as i64, Ordering::Relaxed);
                sent += 1;
            }
        }
    }

    demo.stop_tracking_vars();
    if !interrupted {
        // one more tick so the last partial batch is delivered
        tokio::time::sleep(config.effective_flush_period()).await;
    }
    metrics.shutdown();

    println!(
        "Reported {} requests in {}",
        sent,
        humantime::format_duration(Duration::from_secs(started.elapsed().as_secs()))
    );
    Ok(())
}

/// Interval between simulated requests, never zero
pub fn tick_period(rate: u32) -> Duration {
    (Duration::from_secs(1) / rate.max(1)).max(Duration::from_nanos(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_period() {
        assert_eq!(tick_period(20), Duration::from_millis(50));
        assert_eq!(tick_period(0), Duration::from_secs(1));
        assert_eq!(tick_period(u32::MAX), Duration::from_nanos(1));
    }
}
