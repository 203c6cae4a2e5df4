mod billing_sink;
mod billing_store;
mod errors;
mod report_writer;
mod skip_ledger;

use crate::models::Chunk;

pub use billing_sink::BillingSink;
pub use billing_store::BillingStore;
pub use errors::{SinkError, StorageError};
pub use report_writer::ReportWriter;
pub use skip_ledger::SkipLedger;

/// Destination of committed chunks.
///
/// A write either persists the entire chunk or leaves no trace of it.
pub trait ChunkSink: Send {
    fn write_chunk(&mut self, chunk: &Chunk) -> Result<(), SinkError>;
}
