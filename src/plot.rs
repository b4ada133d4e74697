//! Density/histogram plot rendering for generated tables.
//!
//! Renders the classic cytometry views with `plotters`: per-population
//! scatter for a channel pair and overlaid per-population histograms for a
//! single channel, plus the standard 2x2 panel (FSC/SSC, FL1/FL2, FSC
//! histogram, FL1 histogram). Scatter views optionally use a log10 scale
//! with values clipped at 1, the conventional display for fluorescence
//! channels.

use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;

use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::statistics::histogram_in_range;
use crate::types::Channel;

/// Bins per histogram view.
const HIST_BINS: usize = 100;

/// Render the standard 2x2 panel to a PNG file.
///
/// Top row: FSC/SSC and FL1/FL2 scatter. Bottom row: FSC and FL1 histograms.
pub fn render_panel(dataset: &Dataset, path: &Path, log_scale: bool) -> Result<()> {
    if dataset.is_empty() {
        return Err(Error::invalid_parameter("dataset", "no rows to plot"));
    }

    let root = BitMapBackend::new(path, (1400, 1100)).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;
    let panels = root.split_evenly((2, 2));

    scatter_on(&panels[0], dataset, Channel::Fsc, Channel::Ssc, log_scale)?;
    scatter_on(&panels[1], dataset, Channel::Fl1, Channel::Fl2, log_scale)?;
    histogram_on(&panels[2], dataset, Channel::Fsc)?;
    histogram_on(&panels[3], dataset, Channel::Fl1)?;

    root.present().map_err(render_err)?;
    Ok(())
}

/// Render one channel-pair scatter view to a PNG file.
pub fn render_scatter(
    dataset: &Dataset,
    x: Channel,
    y: Channel,
    path: &Path,
    log_scale: bool,
) -> Result<()> {
    if dataset.is_empty() {
        return Err(Error::invalid_parameter("dataset", "no rows to plot"));
    }
    let root = BitMapBackend::new(path, (900, 700)).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;
    scatter_on(&root, dataset, x, y, log_scale)?;
    root.present().map_err(render_err)?;
    Ok(())
}

/// Render one single-channel histogram view to a PNG file.
pub fn render_histogram(dataset: &Dataset, channel: Channel, path: &Path) -> Result<()> {
    if dataset.is_empty() {
        return Err(Error::invalid_parameter("dataset", "no rows to plot"));
    }
    let root = BitMapBackend::new(path, (900, 700)).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;
    histogram_on(&root, dataset, channel)?;
    root.present().map_err(render_err)?;
    Ok(())
}

fn scatter_on<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    dataset: &Dataset,
    x: Channel,
    y: Channel,
    log_scale: bool,
) -> Result<()> {
    let xs = dataset.channel(x);
    let ys = dataset.channel(y);
    let (x_lo, x_hi) = padded_range(xs, log_scale);
    let (y_lo, y_hi) = padded_range(ys, log_scale);

    let suffix = if log_scale { " (log)" } else { "" };
    let mut chart = ChartBuilder::on(area)
        .caption(format!("{x} vs {y}"), ("sans-serif", 22))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(55)
        .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)
        .map_err(render_err)?;
    chart
        .configure_mesh()
        .x_desc(format!("{x}{suffix}"))
        .y_desc(format!("{y}{suffix}"))
        .draw()
        .map_err(render_err)?;

    for (idx, name) in dataset.population_names().iter().enumerate() {
        let color = Palette99::pick(idx).to_rgba();
        let rows = dataset.rows_of(name);
        chart
            .draw_series(rows.iter().map(|&row| {
                Circle::new(
                    (display(xs[row], log_scale), display(ys[row], log_scale)),
                    2,
                    color.mix(0.4).filled(),
                )
            }))
            .map_err(render_err)?
            .label(name.clone())
            .legend(move |(lx, ly)| Circle::new((lx + 10, ly), 4, color.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(render_err)?;
    Ok(())
}

fn histogram_on<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    dataset: &Dataset,
    channel: Channel,
) -> Result<()> {
    let column = dataset.channel(channel);
    let min = column.iter().copied().fold(f64::INFINITY, f64::min);
    let max = column.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    // Shared bin edges across populations, like overlaid hist() calls.
    let mut per_population = Vec::new();
    let mut y_max = 0usize;
    for name in dataset.population_names() {
        let values: Vec<f64> = dataset
            .rows_of(name)
            .into_iter()
            .map(|row| column[row])
            .collect();
        if values.is_empty() {
            continue;
        }
        let hist = histogram_in_range(&values, min, max, HIST_BINS);
        y_max = y_max.max(hist.max_count());
        per_population.push((name.clone(), hist));
    }
    let y_hi = (y_max.max(1) as f64) * 1.1;

    let mut chart = ChartBuilder::on(area)
        .caption(format!("{channel} histogram"), ("sans-serif", 22))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(55)
        .build_cartesian_2d(min..max, 0.0..y_hi)
        .map_err(render_err)?;
    chart
        .configure_mesh()
        .x_desc(channel.name())
        .y_desc("Count")
        .draw()
        .map_err(render_err)?;

    for (idx, (name, hist)) in per_population.iter().enumerate() {
        let color = Palette99::pick(idx).to_rgba();
        chart
            .draw_series(hist.counts.iter().enumerate().filter(|&(_, &c)| c > 0).map(
                |(bin, &count)| {
                    Rectangle::new(
                        [
                            (hist.edges[bin], 0.0),
                            (hist.edges[bin + 1], count as f64),
                        ],
                        color.mix(0.35).filled(),
                    )
                },
            ))
            .map_err(render_err)?
            .label(name.clone())
            .legend(move |(lx, ly)| {
                Rectangle::new([(lx, ly - 4), (lx + 16, ly + 4)], color.filled())
            });
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(render_err)?;
    Ok(())
}

/// Log10 display transform with clip at 1, applied when log scale is on.
fn display(value: f64, log_scale: bool) -> f64 {
    if log_scale {
        value.max(1.0).log10()
    } else {
        value
    }
}

fn padded_range(values: &[f64], log_scale: bool) -> (f64, f64) {
    let lo = values
        .iter()
        .map(|&v| display(v, log_scale))
        .fold(f64::INFINITY, f64::min);
    let hi = values
        .iter()
        .map(|&v| display(v, log_scale))
        .fold(f64::NEG_INFINITY, f64::max);
    let pad = ((hi - lo) * 0.05).max(1e-6);
    (lo - pad, hi + pad)
}

fn render_err<E: std::fmt::Display>(err: E) -> Error {
    Error::Render(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CytometrySimulator;

    #[test]
    fn test_display_transform() {
        assert_eq!(display(100.0, true), 2.0);
        assert_eq!(display(0.5, true), 0.0); // clipped at 1
        assert_eq!(display(0.5, false), 0.5);
    }

    #[test]
    fn test_render_panel_smoke() {
        let run = CytometrySimulator::new()
            .total_events(300)
            .seed(17)
            .run()
            .unwrap();
        let path = std::env::temp_dir().join("cytosim_panel_test.png");
        match render_panel(run.dataset(), &path, true) {
            Ok(()) => {
                assert!(path.exists());
                std::fs::remove_file(&path).ok();
            }
            // Text rendering needs a system font; headless machines may have none.
            Err(Error::Render(_)) => {}
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_render_empty_dataset_fails() {
        let ds = Dataset::new();
        let path = std::env::temp_dir().join("cytosim_empty_test.png");
        assert!(render_panel(&ds, &path, false).is_err());
    }
}
