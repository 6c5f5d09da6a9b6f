use serde::Serialize;

pub const STANDARD_RATE_PERCENT: f64 = 23.0;
pub const SALES_MARKER: &str = "sale";
pub const PURCHASE_MARKER: &str = "purchase";

/// Fixed knobs of a reconciliation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReconcileConfig {
    /// Standard VAT rate in percent, used to extract VAT from VAT-inclusive
    /// amounts when the table has no VAT column.
    pub standard_rate_percent: f64,
    pub sales_marker: String,
    pub purchase_marker: String,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            standard_rate_percent: STANDARD_RATE_PERCENT,
            sales_marker: SALES_MARKER.to_string(),
            purchase_marker: PURCHASE_MARKER.to_string(),
        }
    }
}

impl ReconcileConfig {
    pub fn with_standard_rate(mut self, percent: f64) -> Self {
        self.standard_rate_percent = percent;
        self
    }

    /// Share of a VAT-inclusive gross amount that is VAT: `p / (100 + p)`.
    pub fn fallback_multiplier(&self) -> f64 {
        self.standard_rate_percent / (100.0 + self.standard_rate_percent)
    }

    pub fn rate_label(&self) -> String {
        let p = self.standard_rate_percent;
        if p.fract() == 0.0 {
            format!("{p:.0}%")
        } else {
            format!("{p}%")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_multiplier_is_23_over_123() {
        assert_eq!(ReconcileConfig::default().fallback_multiplier(), 23.0 / 123.0);
    }

    #[test]
    fn rate_label_formats_whole_and_fractional_rates() {
        assert_eq!(ReconcileConfig::default().rate_label(), "23%");
        let reduced = ReconcileConfig::default().with_standard_rate(13.5);
        assert_eq!(reduced.rate_label(), "13.5%");
    }
}
