//! Order statistics and moments over gathered window samples

/// Median of the samples, reordering the slice in place.
///
/// For an even count this is the arithmetic mean of the two middle order
/// statistics; every median path in the crate goes through here so the
/// tie-break rule is uniform. Returns `None` for an empty slice.
pub fn median_of_samples(samples: &mut [f64]) -> Option<f64> {
    let n = samples.len();
    if n == 0 {
        return None;
    }
    let (lower, upper_mid, _) = samples.select_nth_unstable_by(n / 2, f64::total_cmp);
    let upper_mid = *upper_mid;
    if n % 2 == 1 {
        Some(upper_mid)
    } else {
        let lower_mid = lower.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Some(0.5 * (lower_mid + upper_mid))
    }
}

/// Arithmetic mean, `None` for an empty slice.
pub fn mean_of_samples(samples: &[f64]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    Some(samples.iter().sum::<f64>() / samples.len() as f64)
}

/// Two-pass sample standard deviation with the n-1 denominator.
///
/// `None` for fewer than two samples.
pub fn stddev_of_samples(samples: &[f64]) -> Option<f64> {
    let n = samples.len();
    if n < 2 {
        return None;
    }
    let mean = samples.iter().sum::<f64>() / n as f64;
    let ss: f64 = samples.iter().map(|&v| (v - mean) * (v - mean)).sum();
    Some((ss / (n - 1) as f64).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_median_odd() {
        let mut s = [5.0, 1.0, 3.0];
        assert_eq!(median_of_samples(&mut s), Some(3.0));
        let mut s = [7.0];
        assert_eq!(median_of_samples(&mut s), Some(7.0));
    }

    #[test]
    fn test_median_even_averages_middle_pair() {
        let mut s = [4.0, 1.0, 3.0, 2.0];
        assert_eq!(median_of_samples(&mut s), Some(2.5));
        let mut s = [10.0, 0.0];
        assert_eq!(median_of_samples(&mut s), Some(5.0));
    }

    #[test]
    fn test_median_empty() {
        assert_eq!(median_of_samples(&mut []), None);
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean_of_samples(&[2.0, 4.0, 9.0]), Some(5.0));
        assert_eq!(mean_of_samples(&[]), None);
    }

    #[test]
    fn test_stddev() {
        assert_eq!(stddev_of_samples(&[]), None);
        assert_eq!(stddev_of_samples(&[3.0]), None);
        // Constant samples
        assert_eq!(stddev_of_samples(&[2.0, 2.0, 2.0]), Some(0.0));
        // {2, 4, 4, 4, 5, 5, 7, 9}: variance 32/7
        let s = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let got = stddev_of_samples(&s).unwrap();
        assert!((got - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
    }
}
