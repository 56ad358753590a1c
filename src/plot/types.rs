/// Figure configuration and rendered output types.

use std::path::PathBuf;

/// Comparison figure dimensions (pixels).
pub const COMPARE_WIDTH: u32 = 1000;
pub const COMPARE_HEIGHT: u32 = 500;
/// CDF figure dimensions (pixels), wider than tall.
pub const CDF_WIDTH: u32 = 800;
pub const CDF_HEIGHT: u32 = 400;

/// Options for the two-panel distribution comparison figure.
#[derive(Debug, Clone)]
pub struct CompareConfig {
    /// Save the figure here if set; the image format follows the extension.
    pub path: Option<PathBuf>,
    /// Show the figure inline in the terminal after rendering.
    pub show: bool,
    pub plot_title: String,
    pub left_title: String,
    pub right_title: String,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            path: None,
            show: true,
            plot_title: "linear initialization".to_string(),
            left_title: "Initial Centroids".to_string(),
            right_title: "Post K-means Centroids".to_string(),
        }
    }
}

/// Options for the cumulative distribution figure.
#[derive(Debug, Clone)]
pub struct CdfConfig {
    pub path: Option<PathBuf>,
    pub show: bool,
    pub plot_title: String,
    /// Legend label for the sample series.
    pub label: String,
}

impl Default for CdfConfig {
    fn default() -> Self {
        Self {
            path: None,
            show: true,
            plot_title: "Weights CDF Estimate".to_string(),
            label: "weights".to_string(),
        }
    }
}

/// A rendered figure image.
#[derive(Debug, Clone)]
pub struct RenderedFigure {
    pub png_bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
}
