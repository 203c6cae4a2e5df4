use super::{BillingProcessor, Dimension, PricingTable, Verdict};
use crate::models::BillingRecord;

use std::sync::Arc;

fn create_record(data_usage: f64, call_duration: f64, sms_count: i64) -> BillingRecord {
    BillingRecord {
        data_year: 2023,
        data_month: 1,
        account_id: "100000001".to_string(),
        phone_number: "555-0101".to_string(),
        data_usage,
        call_duration,
        sms_count
    }
}

fn create_processor(pricing: PricingTable, spending_threshold: f64) -> BillingProcessor {
    BillingProcessor::new(Arc::new(pricing), spending_threshold)
}

#[test]
fn test_pricing_lookup_per_dimension() {
    let pricing = PricingTable::new(0.02, 0.4, 0.05);

    assert_eq!(pricing.price_for(Dimension::Data), 0.02);
    assert_eq!(pricing.price_for(Dimension::Call), 0.4);
    assert_eq!(pricing.price_for(Dimension::Sms), 0.05);
}

#[test]
fn test_pricing_rejects_negative_prices() {
    assert_eq!(PricingTable::default().invalid_dimension(), None);
    assert_eq!(PricingTable::new(0.01, -0.5, 0.1).invalid_dimension(), Some(Dimension::Call));
    assert_eq!(PricingTable::new(0.01, 0.5, f64::NAN).invalid_dimension(), Some(Dimension::Sms));
}

#[test]
fn test_billing_total_sums_every_dimension() {
    let processor = create_processor(PricingTable::new(2.0, 0.5, 0.25), 0.0);
    let total = processor.billing_total(&create_record(10.0, 100.0, 8));

    assert_eq!(total, 10.0 * 2.0 + 100.0 * 0.5 + 8.0 * 0.25);
}

#[test]
fn test_record_exactly_at_threshold_is_kept() {
    let processor = create_processor(PricingTable::new(1.0, 1.0, 1.0), 150.0);
    let record = create_record(50.0, 50.0, 50);

    match processor.process(&record) {
        Verdict::Keep(reporting) => {
            assert_eq!(reporting.billing_total, 150.0);
            assert_eq!(reporting.record, record);
        }
        Verdict::Drop => panic!("record at threshold must be kept")
    }
}

#[test]
fn test_record_one_cent_below_threshold_is_dropped() {
    let processor = create_processor(PricingTable::new(1.0, 1.0, 1.0), 150.0);

    assert_eq!(processor.process(&create_record(49.99, 50.0, 50)), Verdict::Drop);
}

#[test]
fn test_zero_usage_is_dropped_for_positive_threshold() {
    let processor = create_processor(PricingTable::default(), 150.0);

    assert_eq!(processor.process(&create_record(0.0, 0.0, 0)), Verdict::Drop);
}

#[test]
fn test_processing_is_deterministic() {
    let processor = create_processor(PricingTable::default(), 150.0);
    let record = create_record(1200.0, 310.0, 95);

    assert_eq!(processor.process(&record), processor.process(&record));
}
