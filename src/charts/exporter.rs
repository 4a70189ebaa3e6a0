//! Static Chart Exporter
//! Renders a chart specification to a PNG file with plotters.

use anyhow::Context;
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use std::path::Path;

use crate::view::{ChartKind, ChartSpec};

/// Render the chart to `path` as a PNG of the given pixel size.
pub fn export_chart_png(spec: &ChartSpec, path: &Path, size: (u32, u32)) -> anyhow::Result<()> {
    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).context("filling chart background")?;

    let n_categories = spec.categories.len().max(1);
    let y_max = (spec.max_value() * 1.15).max(1.0);

    let mut chart = ChartBuilder::on(&root)
        .caption(&spec.title, ("sans-serif", 24))
        .margin(12)
        .x_label_area_size(48)
        .y_label_area_size(64)
        .build_cartesian_2d(-0.5..(n_categories as f64 - 0.5), 0.0..y_max)
        .context("building chart axes")?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc(spec.x_label.clone())
        .y_desc(spec.y_label.clone())
        .x_labels(n_categories)
        .x_label_formatter(&|x| {
            let idx = x.round();
            if (x - idx).abs() > 0.01 || idx < 0.0 {
                return String::new();
            }
            spec.categories
                .get(idx as usize)
                .cloned()
                .unwrap_or_default()
        })
        .draw()
        .context("drawing chart mesh")?;

    match spec.kind {
        ChartKind::GroupedBar => draw_grouped_bars(&mut chart, spec)?,
        ChartKind::Line => draw_line(&mut chart, spec)?,
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .context("drawing chart legend")?;

    root.present().context("writing chart image")?;
    Ok(())
}

type PngChart<'a, 'b> =
    ChartContext<'a, BitMapBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

fn draw_grouped_bars(chart: &mut PngChart, spec: &ChartSpec) -> anyhow::Result<()> {
    let n_series = spec.series.len().max(1);
    let group_width = 0.8;
    let bar_width = group_width / n_series as f64;

    for (si, series) in spec.series.iter().enumerate() {
        let color = Palette99::pick(si).to_rgba();
        let offset = si as f64 * bar_width - group_width / 2.0;

        chart
            .draw_series(series.values.iter().enumerate().map(|(ci, &value)| {
                let x0 = ci as f64 + offset;
                Rectangle::new([(x0, 0.0), (x0 + bar_width * 0.95, value)], color.filled())
            }))
            .with_context(|| format!("drawing series '{}'", series.name))?
            .label(series.name.clone())
            .legend(move |(x, y)| {
                Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled())
            });
    }
    Ok(())
}

fn draw_line(chart: &mut PngChart, spec: &ChartSpec) -> anyhow::Result<()> {
    for (si, series) in spec.series.iter().enumerate() {
        let color = Palette99::pick(si).to_rgba();
        let points: Vec<(f64, f64)> = series
            .values
            .iter()
            .enumerate()
            .map(|(i, &value)| (i as f64, value))
            .collect();

        chart
            .draw_series(LineSeries::new(points.iter().copied(), color.stroke_width(2)))
            .with_context(|| format!("drawing series '{}'", series.name))?
            .label(series.name.clone())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 16, y)], color.stroke_width(2))
            });

        chart
            .draw_series(
                points
                    .iter()
                    .map(|&(x, y)| Circle::new((x, y), 3, color.filled())),
            )
            .with_context(|| format!("drawing markers for '{}'", series.name))?;
    }
    Ok(())
}
