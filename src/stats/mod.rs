pub mod histogram;

pub use histogram::{auto_bin_count, cdf_bin_count, Histogram};
