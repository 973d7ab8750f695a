//! Summary statistics over the present values of a column.

/// Median of `values`; the mean of the two middle values for even counts.
///
/// ```
/// use crop_common::median;
///
/// assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
/// assert_eq!(median(&[4.0, 1.0, 2.0, 3.0]), Some(2.5));
/// assert_eq!(median(&[]), None);
/// ```
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Standard deviation with `ddof` degrees of freedom removed from the
/// divisor. `None` when fewer than `ddof + 1` values are present.
pub fn std_dev(values: &[f64], ddof: usize) -> Option<f64> {
    if values.len() <= ddof {
        return None;
    }
    let mean = mean(values)?;
    let squares: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    Some((squares / (values.len() - ddof) as f64).sqrt())
}

/// The present values of an optional column.
pub fn present(values: &[Option<f64>]) -> Vec<f64> {
    values.iter().filter_map(|v| *v).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn std_dev_supports_sample_and_population() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(std_dev(&values, 0), Some(2.0));
        let sample = std_dev(&values, 1).unwrap();
        assert!((sample - 2.138_089_935).abs() < 1e-9);
        assert_eq!(std_dev(&[1.0], 1), None);
    }

    #[test]
    fn present_skips_nulls() {
        assert_eq!(present(&[Some(1.0), None, Some(3.0)]), vec![1.0, 3.0]);
        assert_eq!(mean(&present(&[None])), None);
    }
}
