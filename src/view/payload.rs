//! Render Payload Types
//! Transient chart specifications and image references produced by the
//! selection dispatcher; discarded after render.

use serde::Serialize;
use std::path::{Path, PathBuf};

/// Chart layout kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChartKind {
    GroupedBar,
    Line,
}

/// How displayed values are formatted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ValueFormat {
    /// Plain count, no decimal places.
    Count,
    /// Percentage, no decimal places.
    Percent,
}

impl ValueFormat {
    pub fn format(&self, value: f64) -> String {
        match self {
            ValueFormat::Count => format!("{value:.0}"),
            ValueFormat::Percent => format!("{value:.0}%"),
        }
    }
}

/// One named series: an ordered numeric sequence, one value per category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub name: String,
    pub values: Vec<f64>,
}

/// A ready-to-render chart. Constructed fresh on every selection event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Ordered category labels for the x-axis.
    pub categories: Vec<String>,
    /// Ordered series, one per projected value column.
    pub series: Vec<ChartSeries>,
    pub value_format: ValueFormat,
}

impl ChartSpec {
    /// Format a value for display next to its bar or marker.
    pub fn format_value(&self, value: f64) -> String {
        self.value_format.format(value)
    }

    /// Largest value across all series; 0.0 when every series is empty.
    pub fn max_value(&self) -> f64 {
        self.series
            .iter()
            .flat_map(|s| s.values.iter().copied())
            .fold(0.0_f64, f64::max)
    }
}

/// A static asset shown instead of a chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageRef {
    /// Workbook-relative asset path, e.g. `/assets/1.png`.
    pub path: String,
    pub caption: String,
}

impl ImageRef {
    /// Resolve the asset path against the workbook directory.
    pub fn fs_path(&self, workbook_dir: &Path) -> PathBuf {
        workbook_dir.join(self.path.trim_start_matches('/'))
    }
}

/// What a selection resolves to: either a chart or a static image.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RenderPayload {
    Chart(ChartSpec),
    Image(ImageRef),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_values_have_no_decimal_places() {
        let spec = ChartSpec {
            kind: ChartKind::GroupedBar,
            title: String::new(),
            x_label: String::new(),
            y_label: String::new(),
            categories: vec![],
            series: vec![],
            value_format: ValueFormat::Percent,
        };
        assert_eq!(spec.format_value(25.0), "25%");
        assert_eq!(spec.format_value(33.333), "33%");
    }

    #[test]
    fn count_values_are_plain() {
        let spec = ChartSpec {
            kind: ChartKind::GroupedBar,
            title: String::new(),
            x_label: String::new(),
            y_label: String::new(),
            categories: vec![],
            series: vec![],
            value_format: ValueFormat::Count,
        };
        assert_eq!(spec.format_value(1234.0), "1234");
    }

    #[test]
    fn image_path_resolves_under_workbook_dir() {
        let image = ImageRef {
            path: "/assets/1.png".to_string(),
            caption: "Postgraduate Enrolment 2024".to_string(),
        };
        assert_eq!(
            image.fs_path(Path::new("data")),
            Path::new("data/assets/1.png")
        );
    }
}
