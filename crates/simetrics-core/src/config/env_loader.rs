//! Environment variable overrides

use super::defaults::ENV_PREFIX;
use super::model::MetricsConfig;
use crate::error::MetricsResult;
use std::env;

/// Apply `SIMETRICS_*` overrides from the process environment
pub fn apply_env_overrides(config: &mut MetricsConfig) -> MetricsResult<()> {
    apply_env_overrides_from(config, |key| env::var(key).ok())
}

/// Apply overrides using `lookup` to resolve variable names
///
/// Recognized variables (all prefixed with `SIMETRICS_`): `BACKEND`,
/// `NAMESPACE_FORMAT`, `TRACK_VARS_PERIOD`, `FLUSH_PERIOD`, `LIBRATO_EMAIL`,
/// `LIBRATO_TOKEN`, `LIBRATO_SOURCE_FORMAT`, `DOGSTATSD_ADDRESS`.
pub fn apply_env_overrides_from<F>(config: &mut MetricsConfig, lookup: F) -> MetricsResult<()>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |name: &str| lookup(&format!("{}{}", ENV_PREFIX, name));

    if let Some(backend) = var("BACKEND") {
        config.backend = backend;
    }
    if let Some(format) = var("NAMESPACE_FORMAT") {
        config.namespace_format = format;
    }
    if let Some(period) = var("TRACK_VARS_PERIOD") {
        config.track_vars_period = humantime::parse_duration(&period)?;
    }
    if let Some(period) = var("FLUSH_PERIOD") {
        config.flush_period = humantime::parse_duration(&period)?;
    }

    if let Some(email) = var("LIBRATO_EMAIL") {
        config.librato.get_or_insert_with(Default::default).email = email;
    }
    if let Some(token) = var("LIBRATO_TOKEN") {
        config.librato.get_or_insert_with(Default::default).token = token;
    }
    if let Some(source) = var("LIBRATO_SOURCE_FORMAT") {
        config.librato.get_or_insert_with(Default::default).source_format = source;
    }

    if let Some(address) = var("DOGSTATSD_ADDRESS") {
        config.dogstatsd.get_or_insert_with(Default::default).address = address;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MetricsError;
    use std::collections::HashMap;
    use std::time::Duration;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_no_overrides_leaves_config_untouched() {
        let mut config = MetricsConfig::default();
        apply_env_overrides_from(&mut config, lookup(&[])).unwrap();
        assert_eq!(config, MetricsConfig::default());
    }

    #[test]
    fn test_overrides_apply() {
        let mut config = MetricsConfig::default();
        apply_env_overrides_from(
            &mut config,
            lookup(&[
                ("SIMETRICS_BACKEND", "librato"),
                ("SIMETRICS_NAMESPACE_FORMAT", "svc."),
                ("SIMETRICS_FLUSH_PERIOD", "2s"),
                ("SIMETRICS_TRACK_VARS_PERIOD", "1m"),
                ("SIMETRICS_LIBRATO_EMAIL", "ops@example.com"),
                ("SIMETRICS_LIBRATO_TOKEN", "t0k3n"),
                ("SIMETRICS_DOGSTATSD_ADDRESS", "10.1.1.1:8125"),
            ]),
        )
        .unwrap();

        assert_eq!(config.backend, "librato");
        assert_eq!(config.namespace_format, "svc.");
        assert_eq!(config.flush_period, Duration::from_secs(2));
        assert_eq!(config.track_vars_period, Duration::from_secs(60));

        let librato = config.librato.unwrap();
        assert_eq!(librato.email, "ops@example.com");
        assert_eq!(librato.token, "t0k3n");
        assert_eq!(librato.source_format, "%s");
        assert_eq!(config.dogstatsd.unwrap().address, "10.1.1.1:8125");
    }

    #[test]
    fn test_invalid_duration_is_rejected() {
        let mut config = MetricsConfig::default();
        let result =
            apply_env_overrides_from(&mut config, lookup(&[("SIMETRICS_FLUSH_PERIOD", "often")]));
        assert!(matches!(result, Err(MetricsError::Config(_))));
    }
}
