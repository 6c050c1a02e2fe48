// 📊 Synthetic Datasets - Seeded fiscal demo data
// Four independent tables over a fixed monthly horizon:
// budget execution, fiscal revenue, public debt, macro indicators.
//
// Everything is generated up front from one explicit seed and is
// immutable for the rest of the session.

use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

mod budget;
mod debt;
mod indicators;
mod revenue;

pub use budget::{generate_budget, BudgetRecord, BudgetTable};
pub use debt::{generate_debt, DebtRecord, DebtTable};
pub use indicators::{generate_indicators, IndicatorRecord, IndicatorTable};
pub use revenue::{generate_revenue, RevenueRecord, RevenueTable};

// ============================================================================
// GENERATOR CONFIG
// ============================================================================

/// Everything the generators need: seed, horizon, label sets, value ranges.
///
/// `Default` reproduces the demo's reference constants (12 months starting
/// 2023-01-01, Angolan sector/region labels and value ranges).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Seed for the session RNG - same seed, same tables
    pub seed: u64,

    /// Number of monthly periods in the horizon
    pub periods: usize,

    /// Date of the first period; each period advances 30 days
    pub start_date: NaiveDate,

    // Categorical dimensions
    pub sectors: Vec<String>,
    pub revenue_types: Vec<String>,
    pub regions: Vec<String>,
    pub debt_types: Vec<String>,
    pub debt_categories: Vec<String>,

    // Value ranges (uniform sampling, half-open)
    pub planned_budget: (f64, f64),
    /// Realized budget as a factor of planned
    pub realized_factor: (f64, f64),
    pub revenue_value: (f64, f64),
    /// Monthly target as a factor of collected value
    pub target_factor: (f64, f64),
    pub debt_value: (f64, f64),
    pub interest_rate: (f64, f64),
    /// Loan term in whole years, upper bound exclusive
    pub term_years: (u32, u32),
    pub gdp_variation: (f64, f64),
    pub inflation: (f64, f64),
    pub exchange_rate: (f64, f64),
    pub reserves: (f64, f64),
    pub oil_price: (f64, f64),
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            seed: 2023,
            periods: 12,
            start_date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            sectors: to_strings(&[
                "Saúde",
                "Educação",
                "Infraestrutura",
                "Agricultura",
                "Defesa",
                "Energia",
                "Transportes",
                "Tecnologia",
                "Administração",
            ]),
            revenue_types: to_strings(&[
                "IVA",
                "Imposto de Renda",
                "Royalties Petróleo",
                "Taxas Aduaneiras",
                "Impostos Corporativos",
            ]),
            regions: to_strings(&["Luanda", "Benguela", "Huambo", "Huíla", "Cabinda"]),
            debt_types: to_strings(&["Interna", "Externa"]),
            debt_categories: to_strings(&[
                "Títulos Governamentais",
                "Empréstimos Bancários",
                "Organismos Internacionais",
                "Bonds Soberanos",
            ]),
            planned_budget: (5_000_000.0, 15_000_000.0),
            realized_factor: (0.8, 1.2),
            revenue_value: (1_000_000.0, 8_000_000.0),
            target_factor: (0.9, 1.1),
            debt_value: (10_000_000.0, 50_000_000.0),
            interest_rate: (0.03, 0.08),
            term_years: (5, 30),
            gdp_variation: (-0.5, 2.0),
            inflation: (5.0, 12.0),
            exchange_rate: (500.0, 550.0),
            reserves: (15_000.0, 20_000.0),
            oil_price: (70.0, 90.0),
        }
    }
}

impl GeneratorConfig {
    /// Default config with a specific seed
    pub fn with_seed(seed: u64) -> Self {
        GeneratorConfig {
            seed,
            ..GeneratorConfig::default()
        }
    }

    /// Date of the period at `index` (30-day steps from the start date)
    pub fn period_date(&self, index: usize) -> NaiveDate {
        self.start_date + Duration::days(30 * index as i64)
    }
}

fn to_strings(labels: &[&str]) -> Vec<String> {
    labels.iter().map(|s| s.to_string()).collect()
}

// ============================================================================
// FISCAL DATA - the four session tables
// ============================================================================

/// The four tables the dashboard and the assistant operate on.
///
/// Generated once per session from a single RNG; read-only afterwards.
/// The tables share the period dimension but are otherwise independent -
/// nothing joins across them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FiscalData {
    pub budget: BudgetTable,
    pub revenue: RevenueTable,
    pub debt: DebtTable,
    pub indicators: IndicatorTable,
}

impl FiscalData {
    /// Generate all four tables from the config's seed.
    ///
    /// Generation order is fixed (budget, revenue, debt, indicators) so a
    /// given config always produces the same tables.
    pub fn generate(config: &GeneratorConfig) -> Self {
        let mut rng = StdRng::seed_from_u64(config.seed);

        FiscalData {
            budget: generate_budget(config, &mut rng),
            revenue: generate_revenue(config, &mut rng),
            debt: generate_debt(config, &mut rng),
            indicators: generate_indicators(config, &mut rng),
        }
    }
}

// ============================================================================
// GROUP-BY HELPERS
// ============================================================================

/// Sum `value` grouped by `key`, in sorted label order.
///
/// BTreeMap keeps the labels sorted, which makes every downstream
/// "label with the maximum" question deterministic.
pub(crate) fn sum_by<T>(
    items: &[T],
    key: impl Fn(&T) -> &str,
    value: impl Fn(&T) -> f64,
) -> BTreeMap<String, f64> {
    let mut totals: BTreeMap<String, f64> = BTreeMap::new();
    for item in items {
        *totals.entry(key(item).to_string()).or_insert(0.0) += value(item);
    }
    totals
}

/// Label with the largest total. Ties resolve to the first label in
/// sorted order (strictly-greater scan over a sorted map).
pub(crate) fn max_label(totals: &BTreeMap<String, f64>) -> Option<(&str, f64)> {
    let mut best: Option<(&str, f64)> = None;
    for (label, total) in totals {
        match best {
            Some((_, current)) if *total <= current => {}
            _ => best = Some((label.as_str(), *total)),
        }
    }
    best
}

/// Mean of an iterator of values; 0.0 for an empty iterator
pub(crate) fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let mut sum = 0.0;
    let mut count = 0usize;
    for v in values {
        sum += v;
        count += 1;
    }
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_reference_constants() {
        let config = GeneratorConfig::default();

        assert_eq!(config.periods, 12);
        assert_eq!(config.sectors.len(), 9);
        assert_eq!(config.revenue_types.len(), 5);
        assert_eq!(config.regions.len(), 5);
        assert_eq!(config.debt_types.len(), 2);
        assert_eq!(config.debt_categories.len(), 4);
        assert_eq!(config.start_date, NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
    }

    #[test]
    fn test_period_dates_step_30_days() {
        let config = GeneratorConfig::default();

        assert_eq!(config.period_date(0), config.start_date);
        assert_eq!(
            config.period_date(1),
            NaiveDate::from_ymd_opt(2023, 1, 31).unwrap()
        );
        assert_eq!(
            config.period_date(11),
            config.start_date + Duration::days(330)
        );
    }

    #[test]
    fn test_same_seed_same_tables() {
        let config = GeneratorConfig::with_seed(7);

        let a = FiscalData::generate(&config);
        let b = FiscalData::generate(&config);

        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = FiscalData::generate(&GeneratorConfig::with_seed(1));
        let b = FiscalData::generate(&GeneratorConfig::with_seed(2));

        assert_ne!(a, b);
    }

    #[test]
    fn test_max_label_tie_goes_to_first_sorted() {
        let mut totals = BTreeMap::new();
        totals.insert("Huambo".to_string(), 100.0);
        totals.insert("Benguela".to_string(), 100.0);
        totals.insert("Cabinda".to_string(), 50.0);

        let (label, total) = max_label(&totals).unwrap();
        assert_eq!(label, "Benguela");
        assert_eq!(total, 100.0);
    }

    #[test]
    fn test_max_label_empty() {
        let totals: BTreeMap<String, f64> = BTreeMap::new();
        assert!(max_label(&totals).is_none());
    }

    #[test]
    fn test_mean_empty_is_zero() {
        assert_eq!(mean(std::iter::empty()), 0.0);
    }

    #[test]
    fn test_sum_by_groups_and_sorts() {
        struct Row(&'static str, f64);
        let rows = vec![Row("b", 1.0), Row("a", 2.0), Row("b", 3.0)];

        let totals = sum_by(&rows, |r| r.0, |r| r.1);

        let keys: Vec<&String> = totals.keys().collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(totals["b"], 4.0);
    }
}
