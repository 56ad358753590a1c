//! Figure helpers for quantization diagnostics: compare two sample
//! distributions side by side, or plot an empirical CDF estimate of one.
//!
//! Figures are rendered off-screen with plotters, optionally saved to an
//! image file, and optionally shown inline in the terminal when the terminal
//! supports an image protocol (Kitty/iTerm2/Sixel).

pub mod error;
pub mod plot;
pub mod stats;
pub mod view;

pub use error::{ErrorKind, FigureError, FigureResult};
pub use plot::render::{cdf_figure, compare_distributions};
pub use plot::types::{CdfConfig, CompareConfig, RenderedFigure};
