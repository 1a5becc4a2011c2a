//! DogStatsD (statsd over UDP) backend

use super::buffered::BufferedSink;
use super::source::resolve_source;
use super::traits::MetricsBackend;
use crate::config::DogStatsdConfig;
use crate::error::{MetricsError, MetricsResult};
use crate::store::MetricsBatch;
use async_trait::async_trait;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, ToSocketAddrs};
use std::sync::OnceLock;
use tokio::net::UdpSocket;
use tracing::debug;

/// DogStatsD sink: aggregates locally and sends datagrams every flush
pub type DogStatsdSink = BufferedSink<DogStatsdBackend>;

/// Upper bound on the payload of a single datagram
pub const MAX_DATAGRAM_SIZE: usize = 8192;

/// Sends batches as statsd lines to a DogStatsD agent
///
/// Distributions are pre-aggregated, so they are encoded as a set of derived
/// series (`.count`, `.min`, `.max`, `.avg`, `.stddev`) rather than the agent's
/// native distribution type.
#[derive(Debug)]
pub struct DogStatsdBackend {
    address: String,
    tags: Vec<String>,
    socket: OnceLock<(UdpSocket, SocketAddr)>,
}

impl DogStatsdBackend {
    pub fn new(config: &DogStatsdConfig) -> Self {
        let source = resolve_source(&config.source_format);
        let tags = if source.is_empty() {
            Vec::new()
        } else {
            vec![format!("source:{}", source)]
        };

        Self {
            address: config.address.clone(),
            tags,
            socket: OnceLock::new(),
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    fn line(&self, name: &str, value: f64, kind: &str) -> String {
        if self.tags.is_empty() {
            format!("{}:{}|{}", name, value, kind)
        } else {
            format!("{}:{}|{}|#{}", name, value, kind, self.tags.join(","))
        }
    }

    /// Encode a batch as statsd lines
    pub fn render_lines(&self, batch: &MetricsBatch) -> Vec<String> {
        let mut lines = Vec::with_capacity(
            batch.counters.len() + batch.gauges.len() + batch.distributions.len() * 5,
        );

        for (name, value) in &batch.counters {
            lines.push(self.line(name, *value, "c"));
        }
        for (name, value) in &batch.gauges {
            lines.push(self.line(name, *value, "g"));
        }
        for (name, dist) in &batch.distributions {
            lines.push(self.line(&format!("{}.count", name), dist.count(), "c"));
            lines.push(self.line(&format!("{}.min", name), dist.min(), "g"));
            lines.push(self.line(&format!("{}.max", name), dist.max(), "g"));
            lines.push(self.line(&format!("{}.avg", name), dist.mean(), "g"));
            lines.push(self.line(&format!("{}.stddev", name), dist.stddev(), "g"));
        }
        lines
    }
}

/// Parse `address` as a socket address, falling back to a DNS lookup
pub(crate) fn resolve_target(address: &str) -> MetricsResult<SocketAddr> {
    if let Ok(addr) = address.parse::<SocketAddr>() {
        return Ok(addr);
    }

    address
        .to_socket_addrs()
        .map_err(|e| {
            MetricsError::init("dogstatsd", format!("cannot resolve '{}': {}", address, e))
        })?
        .next()
        .ok_or_else(|| {
            MetricsError::init("dogstatsd", format!("no address found for '{}'", address))
        })
}

/// Join lines with `\n` into payloads no larger than `max_size`
///
/// A single line longer than `max_size` is sent on its own.
pub(crate) fn pack_datagrams(lines: &[String], max_size: usize) -> Vec<String> {
    let mut datagrams = Vec::new();
    let mut current = String::new();

    for line in lines {
        if !current.is_empty() && current.len() + 1 + line.len() > max_size {
            datagrams.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push('\n');
        }
        current.push_str(line);
    }
    if !current.is_empty() {
        datagrams.push(current);
    }
    datagrams
}

#[async_trait]
impl MetricsBackend for DogStatsdBackend {
    fn name(&self) -> &'static str {
        "dogstatsd"
    }

    /// Binds the local socket
    ///
    /// Host names are resolved with a blocking lookup; configure a literal
    /// `ip:port` to keep initialization off the resolver.
    fn initialize(&self) -> MetricsResult<()> {
        let target = resolve_target(&self.address)?;

        let unspecified = if target.is_ipv4() {
            IpAddr::V4(Ipv4Addr::UNSPECIFIED)
        } else {
            IpAddr::V6(Ipv6Addr::UNSPECIFIED)
        };
        let bind_addr = SocketAddr::new(unspecified, 0);
        let std_socket = std::net::UdpSocket::bind(bind_addr)
            .map_err(|e| MetricsError::init("dogstatsd", format!("cannot bind socket: {}", e)))?;
        std_socket.set_nonblocking(true)?;
        let socket = UdpSocket::from_std(std_socket)?;

        self.socket
            .set((socket, target))
            .map_err(|_| MetricsError::AlreadyInitialized("dogstatsd".to_string()))?;
        debug!(address = %target, "DogStatsD socket ready");
        Ok(())
    }

    async fn transmit(&self, batch: &MetricsBatch) -> MetricsResult<()> {
        if batch.is_empty() {
            return Ok(());
        }
        let (socket, target) = self
            .socket
            .get()
            .ok_or_else(|| MetricsError::transmit("dogstatsd backend was not initialized"))?;

        for datagram in pack_datagrams(&self.render_lines(batch), MAX_DATAGRAM_SIZE) {
            socket.send_to(datagram.as_bytes(), *target).await?;
        }
        Ok(())
    }
}
