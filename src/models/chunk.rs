use crate::models::{BillingRecord, ReportingRecord};
use crate::processor::Verdict;

/// Bounded buffer of records awaiting a single atomic commit.
///
/// Every read record is held for the primary store; the records kept by the
/// processor are additionally held for the report. Capacity counts read records.
#[derive(Debug, Clone, Default)]
pub struct Chunk {
    capacity: usize,
    records: Vec<BillingRecord>,
    reports: Vec<ReportingRecord>
}

impl Chunk {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            records: Vec::with_capacity(capacity),
            reports: Vec::new()
        }
    }

    pub fn push(&mut self, record: BillingRecord, verdict: Verdict) {
        self.records.push(record);

        if let Verdict::Keep(report) = verdict {
            self.reports.push(report);
        }
    }

    pub fn records(&self) -> &[BillingRecord] {
        &self.records
    }

    pub fn reports(&self) -> &[ReportingRecord] {
        &self.reports
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.records.len() >= self.capacity
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.reports.clear();
    }
}
