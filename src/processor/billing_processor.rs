use std::sync::Arc;

use tracing::trace;

use crate::models::{BillingRecord, ReportingRecord};
use crate::processor::{Dimension, PricingTable};

/// Outcome of pricing a single record against the spending threshold.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    Keep(ReportingRecord),
    Drop
}

/// Prices billing records and filters out those below the spending threshold.
///
/// Holds no mutable state, a single instance can be shared between runs.
#[derive(Debug, Clone)]
pub struct BillingProcessor {
    pricing: Arc<PricingTable>,
    spending_threshold: f64
}

impl BillingProcessor {
    pub fn new(pricing: Arc<PricingTable>, spending_threshold: f64) -> Self {
        Self {
            pricing,
            spending_threshold
        }
    }

    pub fn billing_total(&self, record: &BillingRecord) -> f64 {
        record.data_usage * self.pricing.price_for(Dimension::Data)
            + record.call_duration * self.pricing.price_for(Dimension::Call)
            + record.sms_count as f64 * self.pricing.price_for(Dimension::Sms)
    }

    /// Records exactly at the threshold are kept.
    pub fn process(&self, record: &BillingRecord) -> Verdict {
        let billing_total = self.billing_total(record);

        if billing_total < self.spending_threshold {
            trace!("Account [{}] total {billing_total} below threshold", record.account_id);
            return Verdict::Drop
        }

        Verdict::Keep(ReportingRecord::new(record.clone(), billing_total))
    }
}
