/// Figure rendering pipeline: sample slices → histogram → RGB buffer → PNG.

use std::path::Path;

use image::codecs::png::PngEncoder;
use image::ImageEncoder;
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::error::{FigureError, FigureResult};
use crate::plot::colormap::{ColorMap, Normalize};
use crate::plot::types::*;
use crate::stats::{cdf_bin_count, Histogram};

/// CDF step line color.
const STEP_COLOR: RGBColor = RGBColor(31, 119, 180);

/// Render a two-panel figure comparing the distributions of two sample
/// arrays. Each panel is a density histogram with bars shaded through the
/// winter gradient by relative bin height. Both panels share the y-extent.
///
/// Saves to `cfg.path` when set; shows inline in the terminal when
/// `cfg.show` is true and the terminal supports an image protocol (a logged
/// no-op otherwise). The two options are independent.
pub fn compare_distributions(
    left: &[f64],
    right: &[f64],
    cfg: &CompareConfig,
) -> FigureResult<RenderedFigure> {
    let left_hist = Histogram::with_auto_bins(left)?;
    let right_hist = Histogram::with_auto_bins(right)?;
    let y_max = left_hist.max_density().max(right_hist.max_density()) * 1.05;

    let (width, height) = (COMPARE_WIDTH, COMPARE_HEIGHT);
    let mut buf = vec![0u8; (width * height * 3) as usize];

    {
        let root = BitMapBackend::with_buffer(&mut buf, (width, height)).into_drawing_area();
        root.fill(&WHITE)
            .map_err(|e| FigureError::render(format!("fill: {}", e)))?;
        let titled = root
            .titled(&cfg.plot_title, ("sans-serif", 20))
            .map_err(|e| FigureError::render(format!("title: {}", e)))?;

        let panels = titled.split_evenly((1, 2));
        draw_density_panel(&panels[0], &left_hist, &cfg.left_title, y_max, true)?;
        // Only the left panel gets the percent axis; the right panel keeps
        // raw density units.
        draw_density_panel(&panels[1], &right_hist, &cfg.right_title, y_max, false)?;

        root.present()
            .map_err(|e| FigureError::render(format!("present: {}", e)))?;
    }

    finish_figure(buf, width, height, cfg.path.as_deref(), cfg.show)
}

/// Render an empirical CDF estimate of `samples` as a step line, using one
/// bin per ten samples (at least one). Save/show rules match
/// [`compare_distributions`].
pub fn cdf_figure(samples: &[f64], cfg: &CdfConfig) -> FigureResult<RenderedFigure> {
    let n = samples.iter().filter(|v| v.is_finite()).count();
    let hist = Histogram::with_bins(samples, cdf_bin_count(n))?;
    let cumulative = hist.cumulative();
    let points = step_points(&hist.edges, &cumulative);

    let (width, height) = (CDF_WIDTH, CDF_HEIGHT);
    let mut buf = vec![0u8; (width * height * 3) as usize];

    {
        let root = BitMapBackend::with_buffer(&mut buf, (width, height)).into_drawing_area();
        root.fill(&WHITE)
            .map_err(|e| FigureError::render(format!("fill: {}", e)))?;

        let x_min = hist.edges[0];
        let x_max = hist.edges[hist.len()];
        let mut chart = ChartBuilder::on(&root)
            .caption(&cfg.plot_title, ("sans-serif", 20))
            .margin(10)
            .x_label_area_size(30)
            .y_label_area_size(45)
            .build_cartesian_2d(x_min..x_max, 0.0..1.05f64)
            .map_err(|e| FigureError::render(format!("chart build: {}", e)))?;

        chart
            .configure_mesh()
            .x_labels(8)
            .y_labels(6)
            .draw()
            .map_err(|e| FigureError::render(format!("mesh: {}", e)))?;

        chart
            .draw_series(LineSeries::new(points, STEP_COLOR.stroke_width(2)))
            .map_err(|e| FigureError::render(format!("draw series: {}", e)))?
            .label(cfg.label.clone())
            .legend(|(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], STEP_COLOR.stroke_width(2))
            });

        chart
            .configure_series_labels()
            .border_style(BLACK.mix(0.4))
            .background_style(WHITE.mix(0.8))
            .draw()
            .map_err(|e| FigureError::render(format!("legend: {}", e)))?;

        root.present()
            .map_err(|e| FigureError::render(format!("present: {}", e)))?;
    }

    finish_figure(buf, width, height, cfg.path.as_deref(), cfg.show)
}

/// Draw one density-histogram panel with gradient-shaded bars.
fn draw_density_panel(
    area: &DrawingArea<BitMapBackend, Shift>,
    hist: &Histogram,
    title: &str,
    y_max: f64,
    percent_axis: bool,
) -> FigureResult<()> {
    let x_min = hist.edges[0];
    let x_max = hist.edges[hist.len()];

    let mut chart = ChartBuilder::on(area)
        .caption(title, ("sans-serif", 16))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(45)
        .build_cartesian_2d(x_min..x_max, 0.0..y_max)
        .map_err(|e| FigureError::render(format!("chart build: {}", e)))?;

    let percent = |v: &f64| format!("{:.0}%", v * 100.0);
    let mut mesh = chart.configure_mesh();
    mesh.x_labels(8).y_labels(6);
    if percent_axis {
        mesh.y_label_formatter(&percent);
    }
    mesh.draw()
        .map_err(|e| FigureError::render(format!("mesh: {}", e)))?;

    let fracs = hist.height_fractions();
    let norm = Normalize::from_values(&fracs);
    let bars = hist.densities.iter().enumerate().map(|(i, &density)| {
        let (r, g, b) = ColorMap::Winter.color_at(norm.apply(fracs[i]));
        Rectangle::new(
            [(hist.edges[i], 0.0), (hist.edges[i + 1], density)],
            RGBColor(r, g, b).filled(),
        )
    });
    chart
        .draw_series(bars)
        .map_err(|e| FigureError::render(format!("draw bars: {}", e)))?;

    Ok(())
}

/// Expand bin edges and cumulative heights into a step polyline.
fn step_points(edges: &[f64], cumulative: &[f64]) -> Vec<(f64, f64)> {
    let mut points = Vec::with_capacity(cumulative.len() * 2 + 1);
    points.push((edges[0], 0.0));
    for (i, &c) in cumulative.iter().enumerate() {
        points.push((edges[i], c));
        points.push((edges[i + 1], c));
    }
    points
}

/// Encode, optionally persist, optionally display.
fn finish_figure(
    buf: Vec<u8>,
    width: u32,
    height: u32,
    path: Option<&Path>,
    show: bool,
) -> FigureResult<RenderedFigure> {
    let png_bytes = encode_rgb_to_png(&buf, width, height)?;

    if let Some(path) = path {
        image::save_buffer(path, &buf, width, height, image::ExtendedColorType::Rgb8)
            .map_err(|e| FigureError::io(format!("save {}: {}", path.display(), e)))?;
        tracing::info!(path = %path.display(), "figure saved");
    }

    let figure = RenderedFigure {
        png_bytes,
        width,
        height,
    };

    if show {
        crate::view::show_figure(&figure)?;
    }

    Ok(figure)
}

/// Encode a raw RGB pixel buffer to PNG.
fn encode_rgb_to_png(rgb: &[u8], width: u32, height: u32) -> FigureResult<Vec<u8>> {
    let mut png = Vec::new();
    let encoder = PngEncoder::new(&mut png);
    encoder
        .write_image(rgb, width, height, image::ExtendedColorType::Rgb8)
        .map_err(|e| FigureError::render(format!("PNG encode: {}", e)))?;
    Ok(png)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use rand::rngs::SmallRng;
    use rand::{distr::Distribution, SeedableRng};

    fn normal_samples(seed: u64, n: usize) -> Vec<f64> {
        let mut rng = SmallRng::seed_from_u64(seed);
        let normal = rand_distr::Normal::new(0.0, 1.0).unwrap();
        (0..n).map(|_| normal.sample(&mut rng)).collect()
    }

    fn no_show_compare() -> CompareConfig {
        CompareConfig {
            show: false,
            ..CompareConfig::default()
        }
    }

    fn no_show_cdf() -> CdfConfig {
        CdfConfig {
            show: false,
            ..CdfConfig::default()
        }
    }

    #[test]
    fn test_compare_renders_png() {
        let x = normal_samples(1, 500);
        let y = normal_samples(2, 500);
        let figure = compare_distributions(&x, &y, &no_show_compare()).unwrap();
        assert!(!figure.png_bytes.is_empty());
        assert_eq!(figure.width, COMPARE_WIDTH);
        assert_eq!(figure.height, COMPARE_HEIGHT);
        // PNG magic bytes
        assert_eq!(&figure.png_bytes[1..4], b"PNG");
    }

    #[test]
    fn test_compare_saves_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("compare.png");
        let x = normal_samples(3, 500);
        let y = normal_samples(4, 500);
        let cfg = CompareConfig {
            path: Some(path.clone()),
            ..no_show_compare()
        };
        compare_distributions(&x, &y, &cfg).unwrap();
        let meta = std::fs::metadata(&path).unwrap();
        assert!(meta.len() > 0);
    }

    #[test]
    fn test_compare_rejects_empty_input() {
        let err = compare_distributions(&[], &[1.0, 2.0], &no_show_compare()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidInput);
    }

    #[test]
    fn test_compare_bad_path_is_io_error() {
        let x = normal_samples(5, 100);
        let cfg = CompareConfig {
            path: Some("/nonexistent-dir/fig.png".into()),
            ..no_show_compare()
        };
        let err = compare_distributions(&x, &x, &cfg).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Io);
    }

    #[test]
    fn test_cdf_renders_png() {
        let weights: Vec<f64> = (1..=100).map(|i| i as f64).collect();
        let figure = cdf_figure(&weights, &no_show_cdf()).unwrap();
        assert_eq!(&figure.png_bytes[1..4], b"PNG");
        assert_eq!(figure.width, CDF_WIDTH);
        assert_eq!(figure.height, CDF_HEIGHT);
    }

    #[test]
    fn test_cdf_small_array_does_not_fail() {
        // Fewer than 10 samples would give zero bins without the clamp
        let figure = cdf_figure(&[0.5, 1.5, 2.5], &no_show_cdf()).unwrap();
        assert!(!figure.png_bytes.is_empty());
    }

    #[test]
    fn test_cdf_saves_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cdf.png");
        let x = normal_samples(6, 500);
        let cfg = CdfConfig {
            path: Some(path.clone()),
            ..no_show_cdf()
        };
        cdf_figure(&x, &cfg).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_step_points_monotone() {
        let edges = vec![0.0, 1.0, 2.0, 3.0];
        let cumulative = vec![0.2, 0.7, 1.0];
        let points = step_points(&edges, &cumulative);
        assert_eq!(points[0], (0.0, 0.0));
        assert_eq!(*points.last().unwrap(), (3.0, 1.0));
        for pair in points.windows(2) {
            assert!(pair[1].1 >= pair[0].1, "step curve must be non-decreasing");
            assert!(pair[1].0 >= pair[0].0, "x must be non-decreasing");
        }
    }
}
