//! Source (host) name resolution for remote backends

use tracing::warn;

/// Expand the first `%s` in `format` with the host name
///
/// Formats without a placeholder are returned verbatim. When the host name
/// cannot be determined an empty string is substituted.
pub fn resolve_source(format: &str) -> String {
    if !format.contains("%s") {
        return format.to_string();
    }

    let host = hostname().unwrap_or_else(|| {
        warn!("Failed to get the hostname to use as the metric source. Proceeding with an empty string.");
        String::new()
    });
    format.replacen("%s", &host, 1)
}

#[cfg(unix)]
fn hostname() -> Option<String> {
    nix::unistd::gethostname()
        .ok()
        .and_then(|name| name.into_string().ok())
}

#[cfg(not(unix))]
fn hostname() -> Option<String> {
    std::env::var("COMPUTERNAME")
        .or_else(|_| std::env::var("HOSTNAME"))
        .ok()
}
