//! Aggregates computed over a (usually filtered) record set.
//!
//! These back the dashboard cards and chart series: headline KPIs, engagement
//! rates, the delivery funnel and per-month opens/clicks.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

use crate::{parse_month_label, CampaignRecord};

/// `part / whole` as a percentage, 0 when `whole` is 0.
pub fn percentage(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

/// Headline totals shown on the KPI cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct KpiSummary {
    pub total_sent: u64,
    pub delivered: u64,
    pub bounces: u64,
    pub bounce_rate: f64,
}

impl KpiSummary {
    pub fn from_records(records: &[CampaignRecord]) -> Self {
        let totals = Totals::from_records(records);
        Self {
            total_sent: totals.total_sent,
            delivered: totals.delivered,
            bounces: totals.bounces,
            bounce_rate: percentage(totals.bounces, totals.total_sent),
        }
    }
}

/// Open rate, click rate and click-to-open rate, all in percent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EngagementRates {
    pub open_rate: f64,
    pub click_rate: f64,
    pub click_to_open_rate: f64,
}

impl EngagementRates {
    pub fn from_records(records: &[CampaignRecord]) -> Self {
        let totals = Totals::from_records(records);
        Self {
            open_rate: percentage(totals.opens, totals.total_sent),
            click_rate: percentage(totals.clicks, totals.total_sent),
            click_to_open_rate: percentage(totals.clicks, totals.opens),
        }
    }
}

/// Delivered vs bounced split.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliverySplit {
    pub delivered: u64,
    pub bounces: u64,
}

impl DeliverySplit {
    pub fn from_records(records: &[CampaignRecord]) -> Self {
        let totals = Totals::from_records(records);
        Self {
            delivered: totals.delivered,
            bounces: totals.bounces,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FunnelStageKind {
    Sent,
    Delivered,
    Opened,
    Clicked,
}

impl FunnelStageKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Sent => "Sent",
            Self::Delivered => "Delivered",
            Self::Opened => "Opened",
            Self::Clicked => "Clicked",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunnelStage {
    pub stage: FunnelStageKind,
    pub count: u64,
}

/// Sent → Delivered → Opened → Clicked totals, in funnel order.
pub fn email_funnel(records: &[CampaignRecord]) -> Vec<FunnelStage> {
    let totals = Totals::from_records(records);
    vec![
        FunnelStage { stage: FunnelStageKind::Sent, count: totals.total_sent },
        FunnelStage { stage: FunnelStageKind::Delivered, count: totals.delivered },
        FunnelStage { stage: FunnelStageKind::Opened, count: totals.opens },
        FunnelStage { stage: FunnelStageKind::Clicked, count: totals.clicks },
    ]
}

/// Opens and clicks for one month label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyEngagement {
    pub month: String,
    pub opens: u64,
    pub clicks: u64,
}

/// Sums opens and clicks per month.
///
/// Canonical `Mon-YYYY` labels come first in calendar order; any other label
/// (pass-through strings, `Unknown`) follows in lexical order.
pub fn monthly_engagement(records: &[CampaignRecord]) -> Vec<MonthlyEngagement> {
    let mut by_month: HashMap<&str, (u64, u64)> = HashMap::new();
    for record in records {
        let entry = by_month.entry(record.month.as_str()).or_default();
        entry.0 = entry.0.saturating_add(record.opens);
        entry.1 = entry.1.saturating_add(record.clicks);
    }

    let mut series: Vec<MonthlyEngagement> = by_month
        .into_iter()
        .map(|(month, (opens, clicks))| MonthlyEngagement {
            month: month.to_string(),
            opens,
            clicks,
        })
        .collect();
    series.sort_by(|a, b| compare_month_labels(&a.month, &b.month));
    series
}

fn compare_month_labels(a: &str, b: &str) -> Ordering {
    match (parse_month_label(a), parse_month_label(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

#[derive(Default)]
struct Totals {
    total_sent: u64,
    delivered: u64,
    bounces: u64,
    opens: u64,
    clicks: u64,
}

impl Totals {
    fn from_records(records: &[CampaignRecord]) -> Self {
        records.iter().fold(Self::default(), |acc, r| Self {
            total_sent: acc.total_sent.saturating_add(r.total_sent),
            delivered: acc.delivered.saturating_add(r.delivered),
            bounces: acc.bounces.saturating_add(r.bounces),
            opens: acc.opens.saturating_add(r.opens),
            clicks: acc.clicks.saturating_add(r.clicks),
        })
    }
}
