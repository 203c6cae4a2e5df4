use super::{BillingRecord, ReportingRecord, FIELD_NAMES};

use anyhow::Result;
use csv::{ReaderBuilder, Trim};

#[test]
fn test_billing_record_deserializes_from_positional_line() -> Result<()> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .trim(Trim::All)
        .from_reader("2023,1,100000001,555-0101, 12.5 ,302.25,40".as_bytes());

    let record: BillingRecord = reader.deserialize().next().transpose()?
        .ok_or_else(|| anyhow::anyhow!("no record read"))?;

    assert_eq!(record.data_year, 2023);
    assert_eq!(record.data_month, 1);
    assert_eq!(record.account_id, "100000001");
    assert_eq!(record.phone_number, "555-0101");
    assert_eq!(record.data_usage, 12.5);
    assert_eq!(record.call_duration, 302.25);
    assert_eq!(record.sms_count, 40);

    Ok(())
}

#[test]
fn test_billing_record_rejects_non_numeric_usage() {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .from_reader("2023,1,100000001,555-0101,lots,302.25,40".as_bytes());

    let result = reader.deserialize::<BillingRecord>().next();

    assert!(matches!(result, Some(Err(_))));
}

#[test]
fn test_reporting_record_fields_follow_input_column_order() {
    let record = BillingRecord {
        data_year: 2023,
        data_month: 1,
        account_id: "100000001".to_string(),
        phone_number: "555-0101".to_string(),
        data_usage: 1.5,
        call_duration: 300.0,
        sms_count: 10
    };

    let fields = ReportingRecord::new(record, 151.015).to_fields();

    assert_eq!(fields.len(), FIELD_NAMES.len() + 1);
    assert_eq!(fields[2], "100000001");
    assert_eq!(fields[5], "300");
    assert_eq!(fields[7], "151.015");
}

#[test]
fn test_chunk_counts_read_records_and_holds_kept_reports() {
    use super::Chunk;
    use crate::processor::Verdict;

    let record = BillingRecord {
        data_year: 2023,
        data_month: 1,
        account_id: "100000001".to_string(),
        phone_number: "555-0101".to_string(),
        data_usage: 1.0,
        call_duration: 1.0,
        sms_count: 1
    };

    let mut chunk = Chunk::with_capacity(2);
    chunk.push(record.clone(), Verdict::Drop);

    assert!(!chunk.is_full());

    chunk.push(record.clone(), Verdict::Keep(ReportingRecord::new(record, 200.0)));

    assert!(chunk.is_full());
    assert_eq!(chunk.len(), 2);
    assert_eq!(chunk.reports().len(), 1);

    chunk.clear();

    assert!(chunk.is_empty());
    assert!(chunk.reports().is_empty());
}
