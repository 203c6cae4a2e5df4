use crate::models::BillingRecord;

/// A billing record whose computed total met the spending threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportingRecord {
    pub record: BillingRecord,
    pub billing_total: f64
}

impl ReportingRecord {
    pub fn new(record: BillingRecord, billing_total: f64) -> Self {
        Self { record, billing_total }
    }

    /// Report line fields: the input columns followed by the billing total.
    pub fn to_fields(&self) -> [String; 8] {
        let record = &self.record;

        [
            record.data_year.to_string(),
            record.data_month.to_string(),
            record.account_id.clone(),
            record.phone_number.clone(),
            record.data_usage.to_string(),
            record.call_duration.to_string(),
            record.sms_count.to_string(),
            self.billing_total.to_string()
        ]
    }
}
