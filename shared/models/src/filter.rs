use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::CampaignRecord;

/// Selector value meaning "do not filter on this dimension".
pub const ALL_SELECTION: &str = "all";

/// Dimension filters applied to a record set. `None` matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub month: Option<String>,
    pub business_unit: Option<String>,
    pub nurture_name: Option<String>,
    pub nurture_type: Option<String>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds criteria from raw selector values, where `"all"` disables a dimension.
    pub fn from_selections(
        month: &str,
        business_unit: &str,
        nurture_name: &str,
        nurture_type: &str,
    ) -> Self {
        Self {
            month: selection(month),
            business_unit: selection(business_unit),
            nurture_name: selection(nurture_name),
            nurture_type: selection(nurture_type),
        }
    }

    pub fn with_month(mut self, month: impl Into<String>) -> Self {
        self.month = Some(month.into());
        self
    }

    pub fn with_business_unit(mut self, business_unit: impl Into<String>) -> Self {
        self.business_unit = Some(business_unit.into());
        self
    }

    pub fn with_nurture_name(mut self, nurture_name: impl Into<String>) -> Self {
        self.nurture_name = Some(nurture_name.into());
        self
    }

    pub fn with_nurture_type(mut self, nurture_type: impl Into<String>) -> Self {
        self.nurture_type = Some(nurture_type.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.month.is_none()
            && self.business_unit.is_none()
            && self.nurture_name.is_none()
            && self.nurture_type.is_none()
    }

    pub fn matches(&self, record: &CampaignRecord) -> bool {
        fn accepts(wanted: &Option<String>, actual: &str) -> bool {
            wanted.as_deref().map_or(true, |w| w == actual)
        }

        accepts(&self.month, &record.month)
            && accepts(&self.business_unit, &record.business_unit)
            && accepts(&self.nurture_name, &record.nurture_name)
            && accepts(&self.nurture_type, &record.nurture_type)
    }

    /// Returns the matching records, preserving input order.
    pub fn apply(&self, records: &[CampaignRecord]) -> Vec<CampaignRecord> {
        records
            .iter()
            .filter(|record| self.matches(record))
            .cloned()
            .collect()
    }
}

fn selection(value: &str) -> Option<String> {
    if value == ALL_SELECTION {
        None
    } else {
        Some(value.to_string())
    }
}

/// Distinct, non-empty, sorted dimension values for the filter selectors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetValues {
    pub months: Vec<String>,
    pub business_units: Vec<String>,
    pub nurture_names: Vec<String>,
    pub nurture_types: Vec<String>,
}

impl FacetValues {
    pub fn from_records(records: &[CampaignRecord]) -> Self {
        fn distinct<'a>(values: impl Iterator<Item = &'a String>) -> Vec<String> {
            values
                .filter(|v| !v.is_empty())
                .cloned()
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect()
        }

        Self {
            months: distinct(records.iter().map(|r| &r.month)),
            business_units: distinct(records.iter().map(|r| &r.business_unit)),
            nurture_names: distinct(records.iter().map(|r| &r.nurture_name)),
            nurture_types: distinct(records.iter().map(|r| &r.nurture_type)),
        }
    }
}
