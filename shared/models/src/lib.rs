//! # MailPulse Domain Models
//!
//! Value types shared by the ingestion layer and the dashboard.
//!
//! ## Key Models
//!
//! - **CampaignRecord**: one normalized row of email campaign metrics
//! - **FilterCriteria** / **FacetValues**: dimension filters and their selectable values
//! - **KpiSummary**, **EngagementRates**, **DeliverySplit**: totals and rates over a record set
//! - **FunnelStage**, **MonthlyEngagement**: chart series

pub mod campaign;
pub mod filter;
pub mod metrics;

#[cfg(test)]
pub mod property_tests;

pub use campaign::*;
pub use filter::*;
pub use metrics::*;
