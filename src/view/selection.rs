//! Selection Keys
//! Closed enumeration of the views the dashboard can show.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A textual key that is not in the enumeration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown selection key: '{0}'")]
pub struct InvalidSelection(pub String);

/// One entry of the view dropdown. The set is closed: every key resolves to
/// exactly one chart or image, and unknown key text is rejected at the
/// [`FromStr`] boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionKey {
    Graph1,
    Graph2,
    Graph3,
    Graph4,
    Image1,
    Image2,
    Image3,
    Image4,
}

impl SelectionKey {
    /// All keys, in dropdown order.
    pub const ALL: [SelectionKey; 8] = [
        SelectionKey::Graph1,
        SelectionKey::Graph2,
        SelectionKey::Graph3,
        SelectionKey::Graph4,
        SelectionKey::Image1,
        SelectionKey::Image2,
        SelectionKey::Image3,
        SelectionKey::Image4,
    ];

    /// Wire name of the key.
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionKey::Graph1 => "graph1",
            SelectionKey::Graph2 => "graph2",
            SelectionKey::Graph3 => "graph3",
            SelectionKey::Graph4 => "graph4",
            SelectionKey::Image1 => "image1",
            SelectionKey::Image2 => "image2",
            SelectionKey::Image3 => "image3",
            SelectionKey::Image4 => "image4",
        }
    }

    /// Human-readable dropdown label.
    pub fn label(&self) -> &'static str {
        match self {
            SelectionKey::Graph1 => "Postgraduate Enrolment (2020-2023)",
            SelectionKey::Graph2 => "FAS Postgraduate Enrolment (2020-2023)",
            SelectionKey::Graph3 => "2023 Student Enrolment by Level",
            SelectionKey::Graph4 => "Postgraduate Graduation Rate (2015-2023)",
            SelectionKey::Image1 => "Postgraduate Enrolment 2024 (Image)",
            SelectionKey::Image2 => "Current Postdoctoral Fellows (Image)",
            SelectionKey::Image3 => "Emeritus/Honorary/Adjunct Professors (Image)",
            SelectionKey::Image4 => "Departmental Research Outputs 2023 (Image)",
        }
    }

    /// Whether this key shows a static image rather than a chart.
    pub fn is_image(&self) -> bool {
        matches!(
            self,
            SelectionKey::Image1 | SelectionKey::Image2 | SelectionKey::Image3 | SelectionKey::Image4
        )
    }
}

impl fmt::Display for SelectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SelectionKey {
    type Err = InvalidSelection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|key| key.as_str() == s)
            .copied()
            .ok_or_else(|| InvalidSelection(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_round_trip() {
        for key in SelectionKey::ALL {
            assert_eq!(key.as_str().parse::<SelectionKey>().unwrap(), key);
        }
    }

    #[test]
    fn unknown_key_is_invalid_selection() {
        let err = "graph9".parse::<SelectionKey>().unwrap_err();
        assert_eq!(err, InvalidSelection("graph9".to_string()));
    }

    #[test]
    fn image_keys_are_flagged() {
        assert!(!SelectionKey::Graph1.is_image());
        assert!(SelectionKey::Image4.is_image());
        assert_eq!(SelectionKey::ALL.iter().filter(|k| k.is_image()).count(), 4);
    }
}
