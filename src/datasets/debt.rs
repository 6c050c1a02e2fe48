// 🏛️ Public Debt - stock by type and category
// One record per (period, debt type, category) with interest rate
// and term; rates sit between 3% and 8%, terms between 5 and 29 years.

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{mean, sum_by, GeneratorConfig};

// ============================================================================
// RECORD
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtRecord {
    /// Period date (monthly bucket)
    pub date: NaiveDate,

    /// Interna or Externa
    pub debt_type: String,

    /// Instrument category (Títulos Governamentais, Bonds Soberanos, ...)
    pub category: String,

    /// Outstanding value, in AOA
    pub value: f64,

    /// Annual interest rate as a fraction (0.03 = 3%)
    pub interest_rate: f64,

    /// Term in whole years
    pub term_years: u32,
}

// ============================================================================
// TABLE
// ============================================================================

/// Public debt table, in generation order (period, type, category)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtTable {
    pub records: Vec<DebtRecord>,
}

impl DebtTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Total outstanding debt across every record
    pub fn total_value(&self) -> f64 {
        self.records.iter().map(|r| r.value).sum()
    }

    /// Mean interest rate as a fraction (multiply by 100 for percent)
    pub fn mean_interest_rate(&self) -> f64 {
        mean(self.records.iter().map(|r| r.interest_rate))
    }

    /// Total outstanding per debt type, sorted by label
    pub fn value_by_type(&self) -> BTreeMap<String, f64> {
        sum_by(&self.records, |r| r.debt_type.as_str(), |r| r.value)
    }

    /// Total outstanding per category, sorted by label
    pub fn value_by_category(&self) -> BTreeMap<String, f64> {
        sum_by(&self.records, |r| r.category.as_str(), |r| r.value)
    }

    /// Composition rows (type, category, total), grouped and sorted.
    /// Feeds the debt composition breakdown on the dashboard.
    pub fn composition(&self) -> Vec<(String, String, f64)> {
        let mut totals: BTreeMap<(String, String), f64> = BTreeMap::new();
        for r in &self.records {
            *totals
                .entry((r.debt_type.clone(), r.category.clone()))
                .or_insert(0.0) += r.value;
        }
        totals
            .into_iter()
            .map(|((debt_type, category), total)| (debt_type, category, total))
            .collect()
    }
}

// ============================================================================
// GENERATOR
// ============================================================================

/// Generate the debt table: one record per (period, type, category)
pub fn generate_debt(config: &GeneratorConfig, rng: &mut StdRng) -> DebtTable {
    let mut records =
        Vec::with_capacity(config.periods * config.debt_types.len() * config.debt_categories.len());

    for period in 0..config.periods {
        let date = config.period_date(period);
        for debt_type in &config.debt_types {
            for category in &config.debt_categories {
                records.push(DebtRecord {
                    date,
                    debt_type: debt_type.clone(),
                    category: category.clone(),
                    value: rng.random_range(config.debt_value.0..config.debt_value.1),
                    interest_rate: rng
                        .random_range(config.interest_rate.0..config.interest_rate.1),
                    term_years: rng.random_range(config.term_years.0..config.term_years.1),
                });
            }
        }
    }

    DebtTable { records }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn table() -> DebtTable {
        let config = GeneratorConfig::default();
        let mut rng = StdRng::seed_from_u64(config.seed);
        generate_debt(&config, &mut rng)
    }

    #[test]
    fn test_record_count() {
        // 12 periods x 2 types x 4 categories
        assert_eq!(table().len(), 96);
    }

    #[test]
    fn test_interest_rate_range() {
        for r in &table().records {
            assert!(r.interest_rate >= 0.03 && r.interest_rate < 0.08);
        }
    }

    #[test]
    fn test_term_years_range() {
        for r in &table().records {
            assert!(r.term_years >= 5 && r.term_years < 30);
        }
    }

    #[test]
    fn test_mean_interest_rate_in_range() {
        let rate = table().mean_interest_rate();
        assert!(rate > 0.03 && rate < 0.08);
    }

    #[test]
    fn test_composition_covers_every_pair() {
        let rows = table().composition();
        // 2 types x 4 categories
        assert_eq!(rows.len(), 8);
        assert!(rows.iter().all(|(_, _, total)| *total > 0.0));

        // Composition totals add back up to the table total
        let composed: f64 = rows.iter().map(|(_, _, total)| total).sum();
        assert!((composed - table().total_value()).abs() < 1e-6);
    }

    #[test]
    fn test_value_by_type_has_both_types() {
        let totals = table().value_by_type();
        assert_eq!(totals.len(), 2);
        assert!(totals.contains_key("Interna"));
        assert!(totals.contains_key("Externa"));
    }
}
