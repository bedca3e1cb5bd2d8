/// Mean of the trailing `tail_len` samples of `series`.
///
/// The tail is the portion of the chain assumed to be equilibrated; how
/// long that is depends on the problem and is supplied by the caller.
fn tail_mean(series: &[f64], tail_len: usize) -> Result<f64, String> {
    if tail_len == 0 {
        return Err("tail_len must be >= 1".to_string());
    }
    if tail_len > series.len() {
        return Err(format!(
            "tail_len {} exceeds series length {}",
            tail_len,
            series.len()
        ));
    }
    let tail = &series[series.len() - tail_len..];
    Ok(tail.iter().sum::<f64>() / tail_len as f64)
}

/// Per-spin magnetization over the equilibrated tail of a chain.
pub fn magnetization(spin_series: &[f64], side: usize, tail_len: usize) -> Result<f64, String> {
    let n_spins = (side * side) as f64;
    Ok(tail_mean(spin_series, tail_len)? / n_spins)
}

/// Per-spin magnetic susceptibility `beta * var(M) / N^2` over the tail.
///
/// Fluctuation-dissipation form: the variance comes from the tail means
/// of the spin series and its element-wise square.
pub fn susceptibility(
    spin_series: &[f64],
    spin_sq_series: &[f64],
    side: usize,
    beta: f64,
    tail_len: usize,
) -> Result<f64, String> {
    let n_spins = (side * side) as f64;
    let mean = tail_mean(spin_series, tail_len)?;
    let mean_sq = tail_mean(spin_sq_series, tail_len)?;
    Ok(beta * (mean_sq - mean * mean) / n_spins)
}
