/// Computes the arithmetic mean of the values not equal to `sentinel`.
/// Returns `None` when no value is left to average.
pub fn sentinel_mean<I>(values: I, sentinel: f64) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .filter(|v| *v != sentinel)
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));

    if count == 0 {
        return None;
    }
    Some(sum / count as f64)
}

/// Computes the population standard deviation of the non-sentinel values
/// given their pre-computed mean. Returns 0.0 when nothing is counted.
pub fn sentinel_stddev<I>(values: I, sentinel: f64, mean: f64) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let (sq, count) = values
        .into_iter()
        .filter(|v| *v != sentinel)
        .fold((0.0, 0usize), |(sq, count), v| (sq + (v - mean).powi(2), count + 1));

    if count == 0 {
        return 0.0;
    }
    (sq / count as f64).sqrt()
}
