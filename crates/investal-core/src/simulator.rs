//! Twelve-month cash-flow simulation.
//!
//! Contrasts a fixed baseline company against the same company after moving
//! three levers: days to collect, average interest rate and effective tax rate.

use serde::{Deserialize, Serialize};

use crate::Answers;

pub const BASE_REVENUE: f64 = 100_000.0;
pub const BASE_EXPENSES: f64 = 70_000.0;
pub const BASELINE_COLLECTION_DAYS: f64 = 45.0;
pub const BASE_LOAN_PRINCIPAL: f64 = 200_000.0;
/// Annual rate as a fraction (15 %).
pub const BASELINE_INTEREST_RATE: f64 = 0.15;
/// Tax rate as a fraction (30 %).
pub const BASELINE_TAX_RATE: f64 = 0.30;

pub const MONTHS: [&str; 12] = [
    "Ene", "Feb", "Mar", "Abr", "May", "Jun", "Jul", "Ago", "Sep", "Oct", "Nov", "Dic",
];

/// One month of the series. Amounts are rounded to whole units but kept as
/// `f64`, so arbitrarily large levers never overflow.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlyPoint {
    pub month: String,
    pub actual: f64,
    pub optimized: f64,
}

/// Simulator inputs. Rates are percentages (`15.0` means 15 %).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Levers {
    pub collection_days: f64,
    pub interest_rate: f64,
    pub tax_rate: f64,
}

impl Default for Levers {
    fn default() -> Self {
        Self {
            collection_days: BASELINE_COLLECTION_DAYS,
            interest_rate: BASELINE_INTEREST_RATE * 100.0,
            tax_rate: BASELINE_TAX_RATE * 100.0,
        }
    }
}

impl Levers {
    /// Starting lever positions for a company's own answers.
    ///
    /// A lever whose answer is missing or reads as zero starts at its baseline.
    pub fn from_answers(answers: &Answers) -> Self {
        let or_baseline = |value: f64, baseline: f64| if value == 0.0 { baseline } else { value };
        let defaults = Levers::default();
        Self {
            collection_days: or_baseline(answers.numeric("diasCobro"), defaults.collection_days),
            interest_rate: or_baseline(
                answers.numeric("tasaInteresPromedio"),
                defaults.interest_rate,
            ),
            tax_rate: or_baseline(answers.numeric("porcentajeImpuestos"), defaults.tax_rate),
        }
    }

    pub fn simulate(&self) -> [MonthlyPoint; 12] {
        simulate(self.collection_days, self.interest_rate, self.tax_rate)
    }
}

/// Project baseline and optimized net flow for each month of the year.
///
/// Pure and total; no bounds are enforced on the levers. The cash freed by a
/// shorter collection cycle lands entirely in the first month.
pub fn simulate(collection_days: f64, interest_rate: f64, tax_rate: f64) -> [MonthlyPoint; 12] {
    let daily_revenue = BASE_REVENUE / 30.0;
    let cash_boost = (BASELINE_COLLECTION_DAYS - collection_days) * daily_revenue;

    let interest_savings = (BASE_LOAN_PRINCIPAL * BASELINE_INTEREST_RATE
        - BASE_LOAN_PRINCIPAL * (interest_rate / 100.0))
        / 12.0;

    let pre_tax_profit = BASE_REVENUE - BASE_EXPENSES;
    let baseline_net_flow = BASE_REVENUE - BASE_EXPENSES - pre_tax_profit * BASELINE_TAX_RATE;

    let optimized_expenses = BASE_EXPENSES - interest_savings;
    let optimized_net_flow = BASE_REVENUE - optimized_expenses - pre_tax_profit * (tax_rate / 100.0);

    std::array::from_fn(|i| {
        let optimized = if i == 0 {
            optimized_net_flow + cash_boost
        } else {
            optimized_net_flow
        };
        MonthlyPoint {
            month: MONTHS[i].to_string(),
            actual: baseline_net_flow.round(),
            optimized: optimized.round(),
        }
    })
}

/// Yearly totals over a simulated series.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SimulationSummary {
    pub total_actual: f64,
    pub total_optimized: f64,
    pub annual_improvement: f64,
}

impl SimulationSummary {
    pub fn from_points(points: &[MonthlyPoint]) -> Self {
        let total_actual: f64 = points.iter().map(|p| p.actual).sum();
        let total_optimized: f64 = points.iter().map(|p| p.optimized).sum();
        Self {
            total_actual,
            total_optimized,
            annual_improvement: total_optimized - total_actual,
        }
    }
}

/// Tax savings relative to the baseline rate, per month.
///
/// Reported alongside a simulation; the series already folds it into
/// every optimized month.
pub fn monthly_tax_savings(tax_rate: f64) -> f64 {
    let pre_tax_profit = BASE_REVENUE - BASE_EXPENSES;
    pre_tax_profit * BASELINE_TAX_RATE - pre_tax_profit * (tax_rate / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn baseline_month_is_21000() {
        let points = simulate(45.0, 15.0, 30.0);
        assert_eq!(points.len(), 12);
        assert!(points.iter().all(|p| p.actual == 21_000.0));
        assert_eq!(points[0].month, "Ene");
        assert_eq!(points[11].month, "Dic");
    }

    #[test]
    fn levers_default_to_baseline() {
        assert_eq!(
            Levers::default(),
            Levers { collection_days: 45.0, interest_rate: 15.0, tax_rate: 30.0 }
        );
        assert_eq!(Levers::from_answers(&Answers::default()), Levers::default());
    }

    #[test]
    fn levers_read_answers() {
        let answers = Answers {
            dias_cobro: Some("60".into()),
            tasa_interes_promedio: Some("0".into()),
            porcentaje_impuestos: Some("25".into()),
            ..Default::default()
        };
        assert_eq!(
            Levers::from_answers(&answers),
            Levers { collection_days: 60.0, interest_rate: 15.0, tax_rate: 25.0 }
        );
    }

    #[test]
    fn lower_tax_rate_raises_every_month() {
        let points = simulate(45.0, 15.0, 20.0);
        // 30000 * (0.30 - 0.20)
        assert_eq!(monthly_tax_savings(20.0).round(), 3_000.0);
        assert!(points.iter().all(|p| p.optimized - p.actual == 3_000.0));
        assert_eq!(SimulationSummary::from_points(&points).annual_improvement, 36_000.0);
    }

    #[test]
    fn slower_collection_costs_month_zero() {
        let points = simulate(60.0, 15.0, 30.0);
        assert_eq!(points[0].optimized - points[0].actual, -50_000.0);
        assert!(points[1..].iter().all(|p| p.optimized == p.actual));
    }
}
