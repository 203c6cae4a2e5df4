use tracing::debug;

use crate::models::Chunk;
use crate::storage::{BillingStore, ChunkSink, ReportWriter, SinkError};

/// Commits a chunk to `BILLING_DATA` and, when configured, to the report file.
///
/// The database transaction stays open while the report lines are staged, so a
/// failure on either side leaves both untouched.
pub struct BillingSink {
    store: BillingStore,
    report: Option<ReportWriter>
}

impl BillingSink {
    pub fn new(store: BillingStore, report: Option<ReportWriter>) -> Self {
        Self { store, report }
    }

    #[cfg(test)]
    pub fn store(&self) -> &BillingStore {
        &self.store
    }
}

impl ChunkSink for BillingSink {
    fn write_chunk(&mut self, chunk: &Chunk) -> Result<(), SinkError> {
        let transaction = self.store.begin()?;
        BillingStore::insert_records(&transaction, chunk.records())?;

        if let Some(report) = self.report.as_mut() {
            report.stage(chunk.reports())?;
        }

        if let Err(error) = transaction.commit() {
            if let Some(report) = self.report.as_mut() {
                report.rollback()?;
            }

            return Err(error.into())
        }

        if let Some(report) = self.report.as_mut() {
            report.commit()?;
        }

        debug!("Chunk of {} records committed ({} reported)", chunk.len(), chunk.reports().len());

        Ok(())
    }
}
