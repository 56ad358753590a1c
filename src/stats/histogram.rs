/// Uniform-width histogram binning with density normalization.

use crate::error::{FigureError, FigureResult};

/// A density-normalized histogram over uniform-width bins.
///
/// `edges` has one more element than `counts`/`densities`; bin `i` spans
/// `edges[i]..edges[i + 1]`. Densities integrate to 1 over the data range.
#[derive(Debug, Clone)]
pub struct Histogram {
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
    pub densities: Vec<f64>,
}

impl Histogram {
    /// Bin `samples` using the automatic bin-count rule (max of Sturges and
    /// Freedman–Diaconis). Non-finite samples are skipped.
    pub fn with_auto_bins(samples: &[f64]) -> FigureResult<Self> {
        let values = finite_values(samples)?;
        let bins = auto_bin_count(&values);
        Ok(Self::from_values(&values, bins))
    }

    /// Bin `samples` into a fixed number of bins (clamped to at least 1).
    pub fn with_bins(samples: &[f64], bins: usize) -> FigureResult<Self> {
        let values = finite_values(samples)?;
        if bins == 0 {
            tracing::debug!("bin count 0 clamped to 1");
        }
        Ok(Self::from_values(&values, bins.max(1)))
    }

    fn from_values(values: &[f64], bins: usize) -> Self {
        let (mut lo, mut hi) = span(values);
        // Constant data would give a zero-width range
        if hi - lo == 0.0 {
            lo -= 0.5;
            hi += 0.5;
        }
        let width = (hi - lo) / bins as f64;

        let mut counts = vec![0usize; bins];
        for &v in values {
            let idx = (((v - lo) / width) as usize).min(bins - 1);
            counts[idx] += 1;
        }

        let n = values.len() as f64;
        let densities = counts.iter().map(|&c| c as f64 / (n * width)).collect();

        let edges = (0..=bins).map(|i| lo + i as f64 * width).collect();
        Self {
            edges,
            counts,
            densities,
        }
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Width of each bin (uniform).
    pub fn bin_width(&self) -> f64 {
        self.edges[1] - self.edges[0]
    }

    /// Running sum of `density * width` per bin. The final value is 1.0 up
    /// to rounding, since every counted sample falls in some bin.
    pub fn cumulative(&self) -> Vec<f64> {
        let width = self.bin_width();
        let mut total = 0.0;
        self.densities
            .iter()
            .map(|d| {
                total += d * width;
                total
            })
            .collect()
    }

    /// Per-bin height as a fraction of the tallest bin, in [0, 1].
    pub fn height_fractions(&self) -> Vec<f64> {
        let max = self
            .densities
            .iter()
            .cloned()
            .fold(f64::NEG_INFINITY, f64::max);
        if max <= 0.0 {
            return vec![0.0; self.densities.len()];
        }
        self.densities.iter().map(|d| d / max).collect()
    }

    /// Largest bin density, for axis scaling.
    pub fn max_density(&self) -> f64 {
        self.densities
            .iter()
            .cloned()
            .fold(f64::NEG_INFINITY, f64::max)
    }
}

/// Automatic bin count: the larger of the Sturges and Freedman–Diaconis
/// estimates, as in the standard "auto" binning rule.
pub fn auto_bin_count(values: &[f64]) -> usize {
    let n = values.len();
    if n == 0 {
        return 1;
    }
    let sturges = (n as f64).log2().ceil() as usize + 1;

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let iqr = quantile(&sorted, 0.75) - quantile(&sorted, 0.25);
    let range = sorted[n - 1] - sorted[0];

    let fd = if iqr > 0.0 && range > 0.0 {
        // bin_width = 2 * IQR * n^(-1/3)
        let width = 2.0 * iqr * (n as f64).powf(-1.0 / 3.0);
        (range / width).ceil() as usize
    } else {
        0
    };

    sturges.max(fd).max(1)
}

/// Bin count for the CDF estimate: one bin per ten samples, at least 1.
pub fn cdf_bin_count(n: usize) -> usize {
    let bins = n / 10;
    if bins == 0 {
        tracing::debug!(samples = n, "fewer than 10 samples, clamping CDF bin count to 1");
    }
    bins.max(1)
}

/// Linear-interpolated quantile over pre-sorted data.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let base = pos.floor() as usize;
    let frac = pos - base as f64;
    if base + 1 < sorted.len() {
        sorted[base] + frac * (sorted[base + 1] - sorted[base])
    } else {
        sorted[base]
    }
}

/// Keep only finite samples; error if nothing usable remains.
fn finite_values(samples: &[f64]) -> FigureResult<Vec<f64>> {
    if samples.is_empty() {
        return Err(FigureError::invalid_input("empty sample array"));
    }
    let values: Vec<f64> = samples.iter().cloned().filter(|v| v.is_finite()).collect();
    if values.is_empty() {
        return Err(FigureError::invalid_input("no finite samples"));
    }
    Ok(values)
}

fn span(values: &[f64]) -> (f64, f64) {
    let lo = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let hi = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    (lo, hi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn ramp(n: usize) -> Vec<f64> {
        (1..=n).map(|i| i as f64).collect()
    }

    #[test]
    fn test_density_integrates_to_one() {
        let hist = Histogram::with_auto_bins(&ramp(100)).unwrap();
        let area: f64 = hist.densities.iter().map(|d| d * hist.bin_width()).sum();
        assert!((area - 1.0).abs() < 1e-9, "area = {}", area);
    }

    #[test]
    fn test_counts_cover_all_samples() {
        let hist = Histogram::with_bins(&ramp(57), 7).unwrap();
        let total: usize = hist.counts.iter().sum();
        assert_eq!(total, 57);
        assert_eq!(hist.len(), 7);
        assert_eq!(hist.edges.len(), 8);
    }

    #[test]
    fn test_cumulative_monotone_ends_at_one() {
        let hist = Histogram::with_bins(&ramp(100), 10).unwrap();
        let cum = hist.cumulative();
        for pair in cum.windows(2) {
            assert!(pair[1] >= pair[0], "cumulative must be non-decreasing");
        }
        assert!(cum[0] >= 0.0);
        assert!((cum[cum.len() - 1] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_cdf_bin_count_clamps_small_arrays() {
        assert_eq!(cdf_bin_count(3), 1);
        assert_eq!(cdf_bin_count(9), 1);
        assert_eq!(cdf_bin_count(10), 1);
        assert_eq!(cdf_bin_count(100), 10);
        assert_eq!(cdf_bin_count(500), 50);
    }

    #[test]
    fn test_zero_bins_clamped() {
        let hist = Histogram::with_bins(&ramp(5), 0).unwrap();
        assert_eq!(hist.len(), 1);
        assert_eq!(hist.counts[0], 5);
    }

    #[test]
    fn test_empty_input_rejected() {
        let err = Histogram::with_auto_bins(&[]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidInput);
    }

    #[test]
    fn test_all_nan_rejected() {
        let err = Histogram::with_auto_bins(&[f64::NAN, f64::NAN]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidInput);
    }

    #[test]
    fn test_non_finite_samples_skipped() {
        let data = vec![1.0, 2.0, f64::NAN, 3.0, f64::INFINITY];
        let hist = Histogram::with_bins(&data, 3).unwrap();
        let total: usize = hist.counts.iter().sum();
        assert_eq!(total, 3);
    }

    #[test]
    fn test_constant_data_gets_nonzero_range() {
        let hist = Histogram::with_bins(&[4.2; 20], 5).unwrap();
        assert!(hist.bin_width() > 0.0);
        let total: usize = hist.counts.iter().sum();
        assert_eq!(total, 20);
    }

    #[test]
    fn test_auto_bins_reasonable_for_uniform_data() {
        let bins = auto_bin_count(&ramp(500));
        // Sturges gives 10 for n=500; FD on uniform data lands near n^(1/3)*2
        assert!((5..=60).contains(&bins), "bins = {}", bins);
    }

    #[test]
    fn test_auto_bins_constant_data() {
        let values = vec![1.0; 50];
        assert_eq!(auto_bin_count(&values), (50f64).log2().ceil() as usize + 1);
    }

    #[test]
    fn test_height_fractions_in_unit_range() {
        let hist = Histogram::with_auto_bins(&ramp(200)).unwrap();
        let fracs = hist.height_fractions();
        assert!(fracs.iter().all(|f| (0.0..=1.0).contains(f)));
        assert!(fracs.iter().any(|&f| f == 1.0), "tallest bin maps to 1.0");
    }
}
