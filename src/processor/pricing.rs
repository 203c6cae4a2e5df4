use serde::Deserialize;

/// Usage dimension that carries a unit price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Data,
    Call,
    Sms
}

/// Unit prices for a run: per GB of data, per call minute and per SMS.
///
/// Loaded once from configuration and shared read-only across runs.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PricingTable {
    pub data: f64,
    pub call: f64,
    pub sms: f64
}

impl PricingTable {
    pub fn new(data: f64, call: f64, sms: f64) -> Self {
        Self { data, call, sms }
    }

    pub fn price_for(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Data => self.data,
            Dimension::Call => self.call,
            Dimension::Sms => self.sms
        }
    }

    /// Returns the first dimension whose price is negative or not a number.
    pub fn invalid_dimension(&self) -> Option<Dimension> {
        [Dimension::Data, Dimension::Call, Dimension::Sms]
            .into_iter()
            .find(|dimension| {
                let price = self.price_for(*dimension);
                price.is_nan() || price < 0.0
            })
    }
}

impl Default for PricingTable {
    fn default() -> Self {
        Self::new(0.01, 0.5, 0.1)
    }
}
