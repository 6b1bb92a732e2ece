use serde::{Deserialize, Serialize};

/// Label used when a row carries no usable month.
pub const UNKNOWN_MONTH: &str = "Unknown";

/// Three-letter month abbreviations used by canonical `Mon-YYYY` labels.
pub const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Canonical, fully-populated row of email campaign metrics.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CampaignRecord {
    pub month: String,
    pub business_unit: String,
    pub nurture_name: String,
    pub nurture_type: String,
    pub total_sent: u64,
    pub delivered: u64,
    pub bounces: u64,
    pub opens: u64,
    pub clicks: u64,
    pub unsubscribes: u64,
}

impl Default for CampaignRecord {
    fn default() -> Self {
        Self {
            month: UNKNOWN_MONTH.to_string(),
            business_unit: String::new(),
            nurture_name: String::new(),
            nurture_type: String::new(),
            total_sent: 0,
            delivered: 0,
            bounces: 0,
            opens: 0,
            clicks: 0,
            unsubscribes: 0,
        }
    }
}

impl CampaignRecord {
    /// Record for the given month with every other field defaulted.
    pub fn for_month(month: impl Into<String>) -> Self {
        let month = month.into();
        Self {
            month: if month.is_empty() { UNKNOWN_MONTH.to_string() } else { month },
            ..Self::default()
        }
    }

    /// Whether `month` is a canonical `Mon-YYYY` label.
    pub fn has_canonical_month(&self) -> bool {
        parse_month_label(&self.month).is_some()
    }
}

/// Renders a calendar month as a canonical `Mon-YYYY` label.
///
/// `month` is 1-based. Returns `None` for months outside `1..=12`.
pub fn format_month_label(year: i32, month: u32) -> Option<String> {
    let abbreviation = MONTH_ABBREVIATIONS.get(month.checked_sub(1)? as usize)?;
    Some(format!("{}-{:04}", abbreviation, year))
}

/// Splits a canonical `Mon-YYYY` label into `(year, month)`.
pub fn parse_month_label(label: &str) -> Option<(i32, u32)> {
    let (abbreviation, year) = label.split_once('-')?;
    if year.len() != 4 || !year.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let month = MONTH_ABBREVIATIONS
        .iter()
        .position(|m| *m == abbreviation)?;
    Some((year.parse().ok()?, month as u32 + 1))
}
