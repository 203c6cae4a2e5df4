mod billing_record;
mod chunk;
mod reporting_record;
#[cfg(test)]
mod tests;

pub use billing_record::{BillingRecord, FIELD_NAMES};
pub use chunk::Chunk;
pub use reporting_record::ReportingRecord;
