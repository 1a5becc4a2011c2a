//! Mergeable summary statistics for a stream of samples
//!
//! A [`Distribution`] keeps the sample weight, the extremes and the first two
//! raw moments. Raw samples are never retained, so memory stays constant per
//! metric name regardless of how many samples are reported between flushes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Moment-based summary of a stream of samples
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Distribution {
    count: f64,
    min: f64,
    max: f64,
    sum_x: f64,
    sum_x2: f64,
}

impl Distribution {
    /// Create a distribution holding a single sample
    pub fn from_value(value: f64) -> Self {
        Self {
            count: 1.0,
            min: value,
            max: value,
            sum_x: value,
            sum_x2: value * value,
        }
    }

    /// Absorb one more sample
    pub fn add_entry(&mut self, value: f64) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
        self.sum_x += value;
        self.sum_x2 += value * value;
        self.count += 1.0;
    }

    /// Absorb the totals of another distribution
    pub fn merge(&mut self, other: &Distribution) {
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
        self.sum_x += other.sum_x;
        self.sum_x2 += other.sum_x2;
        self.count += other.count;
    }

    /// Arithmetic mean of the absorbed samples
    pub fn mean(&self) -> f64 {
        self.sum_x / self.count
    }

    /// Population standard deviation of the absorbed samples
    pub fn stddev(&self) -> f64 {
        let mean = self.mean();
        let variance = self.sum_x2 / self.count - mean * mean;
        // cancellation can leave a tiny negative radicand
        variance.max(0.0).sqrt()
    }

    /// Sample weight
    pub fn count(&self) -> f64 {
        self.count
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Sum of all samples
    pub fn sum(&self) -> f64 {
        self.sum_x
    }

    /// Sum of the squares of all samples
    pub fn sum_of_squares(&self) -> f64 {
        self.sum_x2
    }
}

const SIGNIFICANT_DIGITS: usize = 4;

/// Render with four significant digits, switching to exponent notation for
/// very large or very small magnitudes (the `%.4g` convention)
fn general(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "+Inf" } else { "-Inf" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    // exponent after rounding to the target precision
    let scientific = format!("{:.*e}", SIGNIFICANT_DIGITS - 1, value);
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((&scientific, "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= SIGNIFICANT_DIGITS as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_fraction(mantissa), sign, exponent.abs())
    } else {
        let decimals = (SIGNIFICANT_DIGITS as i32 - 1 - exponent) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_fraction(digits: &str) -> &str {
    if digits.contains('.') {
        digits.trim_end_matches('0').trim_end_matches('.')
    } else {
        digits
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Distribution: mean: {}, sd: {}, max: {}, min: {} (weight {})",
            general(self.mean()),
            general(self.stddev()),
            general(self.max),
            general(self.min),
            general(self.count)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn from_samples(samples: &[f64]) -> Distribution {
        let mut dist = Distribution::from_value(samples[0]);
        for &sample in &samples[1..] {
            dist.add_entry(sample);
        }
        dist
    }

    #[test]
    fn test_single_value() {
        let dist = Distribution::from_value(42.5);
        assert_eq!(dist.count(), 1.0);
        assert_eq!(dist.min(), 42.5);
        assert_eq!(dist.max(), 42.5);
        assert_eq!(dist.mean(), 42.5);
        assert_eq!(dist.stddev(), 0.0);
        assert_eq!(dist.sum_of_squares(), 42.5 * 42.5);
    }

    #[test]
    fn test_add_entry() {
        let dist = from_samples(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert_eq!(dist.count(), 8.0);
        assert_eq!(dist.min(), 2.0);
        assert_eq!(dist.max(), 9.0);
        assert_eq!(dist.sum(), 40.0);
        assert_eq!(dist.mean(), 5.0);
        assert!((dist.stddev() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_merge_is_commutative() {
        let a = from_samples(&[1.0, 3.0, 8.0]);
        let b = from_samples(&[-2.0, 10.0]);

        let mut ab = a;
        ab.merge(&b);
        let mut ba = b;
        ba.merge(&a);

        assert_eq!(ab, ba);
        assert_eq!(ab.count(), 5.0);
        assert_eq!(ab.min(), -2.0);
        assert_eq!(ab.max(), 10.0);
    }

    #[test]
    fn test_stddev_clamps_negative_variance() {
        // identical samples whose squares do not round-trip exactly
        let dist = from_samples(&[0.1, 0.1, 0.1, 0.1, 0.1, 0.1, 0.1]);
        let sd = dist.stddev();
        assert!(!sd.is_nan());
        assert!(sd >= 0.0);
        assert!(sd < 1e-6);
    }

    #[test]
    fn test_display() {
        let dist = from_samples(&[1.0, 3.0]);
        assert_eq!(
            dist.to_string(),
            "Distribution: mean: 2, sd: 1, max: 3, min: 1 (weight 2)"
        );

        let wide = from_samples(&[0.00001234, 12345.678]);
        assert_eq!(
            wide.to_string(),
            "Distribution: mean: 6173, sd: 6173, max: 1.235e+04, min: 1.234e-05 (weight 2)"
        );
    }

    #[test]
    fn test_general_format() {
        assert_eq!(general(0.0), "0");
        assert_eq!(general(42.5), "42.5");
        assert_eq!(general(-2.5), "-2.5");
        assert_eq!(general(1.0 / 3.0), "0.3333");
        assert_eq!(general(0.0001234), "0.0001234");
        assert_eq!(general(1234.0), "1234");
        assert_eq!(general(9999.7), "1e+04");
        assert_eq!(general(1.0e6), "1e+06");
        assert_eq!(general(f64::NAN), "NaN");
        assert_eq!(general(f64::NEG_INFINITY), "-Inf");
    }

    #[test]
    fn test_serde_field_names() {
        let json = serde_json::to_value(Distribution::from_value(2.0)).unwrap();
        assert_eq!(json["count"], 1.0);
        assert_eq!(json["sum_x2"], 4.0);
    }

    fn tolerance(scale: f64) -> f64 {
        1e-9 * (1.0 + scale.abs())
    }

    proptest! {
        #[test]
        fn prop_mean_within_bounds(
            samples in prop::collection::vec(-1.0e6f64..1.0e6, 1..64),
            others in prop::collection::vec(-1.0e6f64..1.0e6, 1..64),
        ) {
            let mut dist = from_samples(&samples);
            dist.merge(&from_samples(&others));

            let mean = dist.mean();
            prop_assert!(dist.min() <= dist.max());
            prop_assert!(mean >= dist.min() - tolerance(dist.min()));
            prop_assert!(mean <= dist.max() + tolerance(dist.max()));
            prop_assert!(dist.stddev() >= 0.0);
        }

        #[test]
        fn prop_single_value_has_no_spread(value in -1.0e9f64..1.0e9) {
            let dist = Distribution::from_value(value);
            prop_assert_eq!(dist.mean(), value);
            prop_assert_eq!(dist.stddev(), 0.0);
        }

        #[test]
        fn prop_merge_matches_union(
            left in prop::collection::vec(-1.0e3f64..1.0e3, 1..48),
            right in prop::collection::vec(-1.0e3f64..1.0e3, 1..48),
        ) {
            let mut merged = from_samples(&left);
            merged.merge(&from_samples(&right));

            let union: Vec<f64> = left.iter().chain(right.iter()).copied().collect();
            let whole = from_samples(&union);

            prop_assert_eq!(merged.count(), whole.count());
            prop_assert_eq!(merged.min(), whole.min());
            prop_assert_eq!(merged.max(), whole.max());
            prop_assert!((merged.mean() - whole.mean()).abs() < 1e-6);
            prop_assert!((merged.stddev() - whole.stddev()).abs() < 1e-3);
        }
    }
}
