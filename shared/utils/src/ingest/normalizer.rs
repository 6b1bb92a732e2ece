//! Field normalization: one [`RawRow`] in, one [`CampaignRecord`] out.
//!
//! Each canonical field is resolved from a prioritized list of header aliases.
//! Resolution never fails; missing or malformed cells fall back to defaults.

use mailpulse_models::{CampaignRecord, UNKNOWN_MONTH};

use super::month::normalize_month;
use super::row::{RawRow, RawValue};

/// Header aliases per canonical field, highest priority first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AliasTable {
    pub month: &'static [&'static str],
    pub business_unit: &'static [&'static str],
    pub nurture_name: &'static [&'static str],
    pub nurture_type: &'static [&'static str],
    pub total_sent: &'static [&'static str],
    pub delivered: &'static [&'static str],
    pub bounces: &'static [&'static str],
    pub opens: &'static [&'static str],
    pub clicks: &'static [&'static str],
    pub unsubscribes: &'static [&'static str],
}

/// Aliases recognized in CSV and JSON sources.
pub const TABULAR_ALIASES: AliasTable = AliasTable {
    month: &["month", "Month"],
    business_unit: &["business_unit", "Business Unit"],
    nurture_name: &["nurture_name", "Nurture Name"],
    nurture_type: &["nurture_type", "Nurture Type"],
    total_sent: &["total_sent", "Total Sent"],
    delivered: &["delivered", "Delivered"],
    bounces: &["bounces", "Bounces"],
    opens: &["opens", "Opens"],
    clicks: &["clicks", "Clicks"],
    unsubscribes: &["unsubscribes", "Unsubscribes"],
};

/// Spreadsheet exports additionally carry a few legacy header spellings.
pub const SPREADSHEET_ALIASES: AliasTable = AliasTable {
    month: &["month", "Month"],
    business_unit: &["business_unit", "Business Unit", "Bussiness Unit"],
    nurture_name: &["nurture_name", "Nurture Name"],
    nurture_type: &["nurture_type", "Nurture Type", "Type of Nurture"],
    total_sent: &["total_sent", "Total Sent", "Sent"],
    delivered: &["delivered", "Delivered"],
    bounces: &["bounces", "Bounces"],
    opens: &["opens", "Opens", "Total Open"],
    clicks: &["clicks", "Clicks", "Total Clicks"],
    unsubscribes: &["unsubscribes", "Unsubscribes", "Opt out"],
};

/// Maps raw rows to campaign records using one alias table.
#[derive(Debug, Clone, Copy)]
pub struct FieldNormalizer {
    aliases: &'static AliasTable,
}

impl Default for FieldNormalizer {
    fn default() -> Self {
        Self::tabular()
    }
}

impl FieldNormalizer {
    pub fn new(aliases: &'static AliasTable) -> Self {
        Self { aliases }
    }

    /// Normalizer for CSV and JSON rows.
    pub fn tabular() -> Self {
        Self::new(&TABULAR_ALIASES)
    }

    /// Normalizer for spreadsheet rows.
    pub fn spreadsheet() -> Self {
        Self::new(&SPREADSHEET_ALIASES)
    }

    pub fn aliases(&self) -> &'static AliasTable {
        self.aliases
    }

    pub fn normalize(&self, row: &RawRow) -> CampaignRecord {
        let aliases = self.aliases;
        CampaignRecord {
            month: extract(row, aliases.month, UNKNOWN_MONTH.to_string(), |v| {
                Some(normalize_month(v))
            }),
            business_unit: extract(row, aliases.business_unit, String::new(), coerce_text),
            nurture_name: extract(row, aliases.nurture_name, String::new(), coerce_text),
            nurture_type: extract(row, aliases.nurture_type, String::new(), coerce_text),
            total_sent: extract(row, aliases.total_sent, 0, coerce_count),
            delivered: extract(row, aliases.delivered, 0, coerce_count),
            bounces: extract(row, aliases.bounces, 0, coerce_count),
            opens: extract(row, aliases.opens, 0, coerce_count),
            clicks: extract(row, aliases.clicks, 0, coerce_count),
            unsubscribes: extract(row, aliases.unsubscribes, 0, coerce_count),
        }
    }

    pub fn normalize_all(&self, rows: &[RawRow]) -> Vec<CampaignRecord> {
        rows.iter().map(|row| self.normalize(row)).collect()
    }
}

/// Resolves one field: the first non-absent aliased cell, coerced, or `default`.
pub fn extract<T>(
    row: &RawRow,
    aliases: &[&str],
    default: T,
    coerce: impl Fn(&RawValue) -> Option<T>,
) -> T {
    resolve(row, aliases).and_then(coerce).unwrap_or(default)
}

/// Finds the highest-priority non-absent cell for `aliases`.
///
/// Exact header matches are tried first in alias order; only if none is found
/// are headers compared loosely (case, whitespace, `_` and `-` ignored).
pub fn resolve<'a>(row: &'a RawRow, aliases: &[&str]) -> Option<&'a RawValue> {
    let exact = aliases
        .iter()
        .filter_map(|alias| row.get(alias))
        .find(|value| !value.is_absent());
    if exact.is_some() {
        return exact;
    }

    aliases.iter().find_map(|alias| {
        let folded = fold_header(alias);
        row.iter()
            .filter(|(key, _)| fold_header(key) == folded)
            .map(|(_, value)| value)
            .find(|value| !value.is_absent())
    })
}

/// Header key with case, whitespace, `_` and `-` removed.
pub fn fold_header(header: &str) -> String {
    header
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

fn coerce_text(value: &RawValue) -> Option<String> {
    Some(value.to_text())
}

/// Non-negative integer count; non-numeric, negative or non-finite values give `None`.
fn coerce_count(value: &RawValue) -> Option<u64> {
    let number = value.as_number()?;
    if number.is_finite() && number >= 0.0 {
        Some(number.trunc() as u64)
    } else {
        None
    }
}
