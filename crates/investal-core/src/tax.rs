//! Savings estimate for the "no nominativo" service.

use serde::{Deserialize, Serialize};

/// Flat service fee charged on the annual flow.
pub const SERVICE_FEE_RATE: f64 = 0.065;
pub const MORAL_ISR_RATE: f64 = 0.30;
pub const FISICA_ISR_RATE: f64 = 0.35;

/// Legal form of the taxpayer, which fixes the current income-tax rate.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, schemars::JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    /// Persona moral (company).
    #[default]
    Moral,
    /// Persona física (individual).
    Fisica,
}

impl EntityType {
    pub fn isr_rate(self) -> f64 {
        match self {
            EntityType::Moral => MORAL_ISR_RATE,
            EntityType::Fisica => FISICA_ISR_RATE,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaxSavingsEstimate {
    pub annual_flow: f64,
    pub current_taxes: f64,
    pub service_cost: f64,
    pub savings: f64,
    pub savings_percent: f64,
    /// Current ISR rate as a percentage.
    pub current_rate_percent: f64,
}

pub fn estimate_tax_savings(monthly_flow: f64, entity: EntityType) -> TaxSavingsEstimate {
    let annual_flow = monthly_flow * 12.0;
    let rate = entity.isr_rate();
    let current_taxes = annual_flow * rate;
    let service_cost = annual_flow * SERVICE_FEE_RATE;
    let savings = current_taxes - service_cost;
    let savings_percent = if current_taxes == 0.0 {
        0.0
    } else {
        savings / current_taxes * 100.0
    };

    TaxSavingsEstimate {
        annual_flow,
        current_taxes,
        service_cost,
        savings,
        savings_percent,
        current_rate_percent: rate * 100.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn moral_entity_estimate() {
        let est = estimate_tax_savings(100_000.0, EntityType::Moral);
        assert!(close(est.annual_flow, 1_200_000.0));
        assert!(close(est.current_taxes, 360_000.0));
        assert!(close(est.service_cost, 78_000.0));
        assert!(close(est.savings, 282_000.0));
        assert!(close(est.savings_percent, 78.333_333_333));
        assert!(close(est.current_rate_percent, 30.0));
    }

    #[test]
    fn fisica_entity_pays_more_today() {
        let est = estimate_tax_savings(100_000.0, EntityType::Fisica);
        assert!(close(est.current_taxes, 420_000.0));
        assert!(close(est.savings, 342_000.0));
    }

    #[test]
    fn zero_flow_has_zero_percent() {
        let est = estimate_tax_savings(0.0, EntityType::Moral);
        assert_eq!(est.savings_percent, 0.0);
        assert_eq!(est.savings, 0.0);
    }

    #[test]
    fn entity_type_uses_lowercase_names() {
        let e: EntityType = serde_json::from_str("\"fisica\"").unwrap();
        assert_eq!(e, EntityType::Fisica);
    }
}
