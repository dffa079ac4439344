/// `sum / len`. NaN for an empty slice.
#[inline]
pub fn arithmetic_mean(data: &[f64]) -> f64 {
    data.iter().sum::<f64>() / data.len() as f64
}

/// `exp(sum(ln x) / len)`, which equals `product ^ (1 / len)` without
/// forming the product, so long slices neither overflow nor underflow.
///
/// A single zero collapses the result to zero. Negative values give NaN.
#[inline]
pub fn geometric_mean(data: &[f64]) -> f64 {
    if data.iter().any(|&x| x == 0.0) {
        return 0.0;
    }
    let log_sum: f64 = data.iter().map(|&x| libm::log(x)).sum();
    libm::exp(log_sum / data.len() as f64)
}

/// Median of an ascending slice: the middle element for odd lengths, the
/// mean of the two central elements for even lengths.
pub fn median_of_sorted(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return f64::NAN;
    }
    let mid = n / 2;
    if n % 2 == 1 {
        sorted[mid]
    } else {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    }
}

/// Index of the first element holding the maximum value.
pub fn first_max_index(data: &[f64]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, &v) in data.iter().enumerate() {
        match best {
            Some(b) if v <= data[b] => {}
            _ => best = Some(i),
        }
    }
    best
}

/// Index of the first element holding the minimum value.
pub fn first_min_index(data: &[f64]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, &v) in data.iter().enumerate() {
        match best {
            Some(b) if v >= data[b] => {}
            _ => best = Some(i),
        }
    }
    best
}
