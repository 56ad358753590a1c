use rand::rngs::SmallRng;
use rand::{distr::Distribution, SeedableRng};
use tracing_subscriber::EnvFilter;

use quantviz::{cdf_figure, compare_distributions, CdfConfig, CompareConfig};

/// Demo driver: compare two standard-normal samples and plot the CDF
/// estimate of the first, with the default titles.
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut rng = SmallRng::from_os_rng();
    let normal = rand_distr::Normal::new(0.0, 1.0)?;
    let x: Vec<f64> = (0..500).map(|_| normal.sample(&mut rng)).collect();
    let y: Vec<f64> = (0..500).map(|_| normal.sample(&mut rng)).collect();

    compare_distributions(&x, &y, &CompareConfig::default())?;
    cdf_figure(&x, &CdfConfig::default())?;

    Ok(())
}
