//! Lead funnel tracking.

use serde::{Deserialize, Serialize};

use crate::crm::{Lead, LeadStatus};

/// Counts per funnel stage plus the conversion rate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeadFunnelReport {
    pub total: u64,
    pub new: u64,
    pub contacted: u64,
    pub converted: u64,
    pub lost: u64,
    /// Converted as a fraction of settled leads (converted + lost).
    pub conversion_rate: f64,
}

/// Summarize a set of leads into funnel counts.
pub fn lead_funnel(leads: &[Lead]) -> LeadFunnelReport {
    let mut report = LeadFunnelReport::default();

    for lead in leads {
        report.total += 1;
        match lead.status {
            LeadStatus::New => report.new += 1,
            LeadStatus::Contacted => report.contacted += 1,
            LeadStatus::Converted => report.converted += 1,
            LeadStatus::Lost => report.lost += 1,
        }
    }

    let settled = report.converted + report.lost;
    if settled > 0 {
        report.conversion_rate = report.converted as f64 / settled as f64;
    }
    report
}
