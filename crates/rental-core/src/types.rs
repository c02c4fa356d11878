use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%). Never as percentages.
pub type Rate = Decimal;

/// A derived metric that may have no defined value (zero denominator).
///
/// Reporting `Undefined` explicitly instead of coercing to zero keeps
/// "no answer" distinct from "the answer is zero".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum MetricValue {
    Defined(Decimal),
    Undefined,
}

impl MetricValue {
    /// Guarded division: `Undefined` when the denominator is zero.
    pub fn ratio(numerator: Decimal, denominator: Decimal) -> Self {
        if denominator.is_zero() {
            MetricValue::Undefined
        } else {
            MetricValue::Defined(numerator / denominator)
        }
    }

    /// Guarded division scaled to a percentage.
    pub fn percentage(numerator: Decimal, denominator: Decimal) -> Self {
        Self::ratio(numerator * Decimal::ONE_HUNDRED, denominator)
    }

    pub fn is_defined(&self) -> bool {
        matches!(self, MetricValue::Defined(_))
    }

    pub fn value(&self) -> Option<Decimal> {
        match self {
            MetricValue::Defined(v) => Some(*v),
            MetricValue::Undefined => None,
        }
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_ratio_defined() {
        assert_eq!(
            MetricValue::ratio(dec!(10), dec!(4)),
            MetricValue::Defined(dec!(2.5))
        );
    }

    #[test]
    fn test_ratio_zero_denominator() {
        assert_eq!(
            MetricValue::ratio(dec!(10), Decimal::ZERO),
            MetricValue::Undefined
        );
    }

    #[test]
    fn test_percentage_scaling() {
        assert_eq!(
            MetricValue::percentage(dec!(13128), dec!(250000)),
            MetricValue::Defined(dec!(5.2512))
        );
    }

    #[test]
    fn test_undefined_serializes_without_value() {
        let json = serde_json::to_value(MetricValue::Undefined).unwrap();
        assert_eq!(json["status"], "undefined");
        assert!(json.get("value").is_none());
    }
}
