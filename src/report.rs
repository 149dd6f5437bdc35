use serde::{Deserialize, Serialize};

/// One row of a two-column report.
///
/// `amount` is `None` for section headers and spacer rows; it never stands
/// for a missing value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub label: String,
    pub amount: Option<f64>,
}

impl LineItem {
    pub fn value(label: impl Into<String>, amount: f64) -> Self {
        Self {
            label: label.into(),
            amount: Some(amount),
        }
    }

    pub fn header(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            amount: None,
        }
    }

    pub fn blank() -> Self {
        Self::header("")
    }

    pub fn is_header(&self) -> bool {
        self.amount.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub title: String,
    pub lines: Vec<LineItem>,
}

impl Report {
    pub fn new(title: impl Into<String>, lines: Vec<LineItem>) -> Self {
        Self {
            title: title.into(),
            lines,
        }
    }

    /// Amount of the first line with this exact label.
    pub fn amount_of(&self, label: &str) -> Option<f64> {
        self.lines
            .iter()
            .find(|line| line.label == label)
            .and_then(|line| line.amount)
    }

    pub fn labels(&self) -> Vec<&str> {
        self.lines.iter().map(|line| line.label.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
