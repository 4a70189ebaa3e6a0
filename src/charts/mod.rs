//! Charts module - interactive and static chart rendering

mod exporter;
mod plotter;

pub use exporter::export_chart_png;
pub use plotter::ChartPlotter;
