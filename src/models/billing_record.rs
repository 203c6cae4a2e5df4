use serde::Deserialize;

/// Column names of an input line, in file order.
pub const FIELD_NAMES: [&str; 7] = [
    "dataYear",
    "dataMonth",
    "accountId",
    "phoneNumber",
    "dataUsage",
    "callDuration",
    "smsCount"
];

/// Represents a single line of the usage input file.
///
/// Fields are positional; the input file carries no header. Once parsed a record
/// is never mutated, it is consumed by the processor and dropped after its chunk commits.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BillingRecord {
    pub data_year: i32,
    pub data_month: i32,
    pub account_id: String,
    pub phone_number: String,
    /// Data volume in GB.
    pub data_usage: f64,
    /// Call duration in minutes.
    pub call_duration: f64,
    pub sms_count: i64
}
