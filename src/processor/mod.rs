mod billing_processor;
mod pricing;
#[cfg(test)]
mod tests;

pub use billing_processor::{BillingProcessor, Verdict};
pub use pricing::{Dimension, PricingTable};
