//! Chart Plotter Module
//! Draws chart specifications interactively using egui_plot.

use crate::view::{ChartKind, ChartSpec};
use egui::Color32;
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Points};

/// Series color palette.
pub const PALETTE: [Color32; 6] = [
    Color32::from_rgb(52, 152, 219),  // Blue
    Color32::from_rgb(231, 76, 60),   // Red
    Color32::from_rgb(46, 204, 113),  // Green
    Color32::from_rgb(243, 156, 18),  // Orange
    Color32::from_rgb(155, 89, 182),  // Purple
    Color32::from_rgb(26, 188, 156),  // Teal
];

/// Renders a [`ChartSpec`] with egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Color for a series by position.
    pub fn series_color(index: usize) -> Color32 {
        PALETTE[index % PALETTE.len()]
    }

    /// Draw the chart matching the spec's kind.
    pub fn draw(ui: &mut egui::Ui, spec: &ChartSpec) {
        match spec.kind {
            ChartKind::GroupedBar => Self::draw_grouped_bar(ui, spec),
            ChartKind::Line => Self::draw_line(ui, spec),
        }
    }

    /// Grouped bar chart: one bar cluster per category, one color per series.
    fn draw_grouped_bar(ui: &mut egui::Ui, spec: &ChartSpec) {
        let n_series = spec.series.len().max(1);
        let group_width = 0.8;
        let bar_width = group_width / n_series as f64;

        let categories = spec.categories.clone();
        let value_format = spec.value_format;

        Plot::new(format!("grouped_bar_{}", spec.title))
            .legend(Legend::default())
            .x_axis_label(spec.x_label.clone())
            .y_axis_label(spec.y_label.clone())
            .allow_scroll(false)
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round();
                if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
                    return String::new();
                }
                categories
                    .get(idx as usize)
                    .cloned()
                    .unwrap_or_default()
            })
            .show(ui, |plot_ui| {
                for (si, series) in spec.series.iter().enumerate() {
                    let color = Self::series_color(si);
                    let offset = (si as f64 + 0.5) * bar_width - group_width / 2.0;

                    let bars: Vec<Bar> = series
                        .values
                        .iter()
                        .enumerate()
                        .map(|(ci, &value)| {
                            Bar::new(ci as f64 + offset, value).width(bar_width * 0.95)
                        })
                        .collect();

                    plot_ui.bar_chart(
                        BarChart::new(bars)
                            .color(color)
                            .name(&series.name)
                            .element_formatter(Box::new(move |bar, _chart| {
                                value_format.format(bar.value)
                            })),
                    );
                }
            });
    }

    /// Line chart with markers; categories become x-axis tick labels.
    fn draw_line(ui: &mut egui::Ui, spec: &ChartSpec) {
        let categories = spec.categories.clone();

        Plot::new(format!("line_{}", spec.title))
            .legend(Legend::default())
            .x_axis_label(spec.x_label.clone())
            .y_axis_label(spec.y_label.clone())
            .allow_scroll(false)
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round();
                if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
                    return String::new();
                }
                categories
                    .get(idx as usize)
                    .cloned()
                    .unwrap_or_default()
            })
            .show(ui, |plot_ui| {
                for (si, series) in spec.series.iter().enumerate() {
                    let color = Self::series_color(si);
                    let points_vec: Vec<[f64; 2]> = series
                        .values
                        .iter()
                        .enumerate()
                        .map(|(i, &value)| [i as f64, value])
                        .collect();

                    plot_ui.line(
                        Line::new(PlotPoints::from_iter(points_vec.iter().copied()))
                            .color(color)
                            .width(2.0)
                            .name(&series.name),
                    );

                    plot_ui.points(
                        Points::new(PlotPoints::from_iter(points_vec.iter().copied()))
                            .radius(3.5)
                            .color(color),
                    );
                }
            });
    }
}
