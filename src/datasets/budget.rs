// 💰 Budget Execution - planned vs realized by sector
// One record per (period, sector); realized swings 80%-120% of planned.

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{max_label, mean, sum_by, GeneratorConfig};

// ============================================================================
// RECORD
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetRecord {
    /// Period date (monthly bucket)
    pub date: NaiveDate,

    /// Government sector (Saúde, Educação, ...)
    pub sector: String,

    /// Planned budget for the period, in AOA
    pub planned: f64,

    /// Realized budget for the period, in AOA
    pub realized: f64,

    /// realized / planned, as a percentage
    pub execution_rate: f64,
}

// ============================================================================
// TABLE
// ============================================================================

/// Budget execution table, in generation order (period-major, then sector)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetTable {
    pub records: Vec<BudgetRecord>,
}

impl BudgetTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Mean execution rate across all records, in percent
    pub fn mean_execution_rate(&self) -> f64 {
        mean(self.records.iter().map(|r| r.execution_rate))
    }

    /// Total realized budget per sector, sorted by sector label
    pub fn realized_by_sector(&self) -> BTreeMap<String, f64> {
        sum_by(&self.records, |r| r.sector.as_str(), |r| r.realized)
    }

    /// Total planned budget per sector, sorted by sector label
    pub fn planned_by_sector(&self) -> BTreeMap<String, f64> {
        sum_by(&self.records, |r| r.sector.as_str(), |r| r.planned)
    }

    /// Sector with the largest summed realized budget.
    /// Ties go to the first sector in sorted label order.
    pub fn top_sector_by_realized(&self) -> Option<String> {
        max_label(&self.realized_by_sector()).map(|(label, _)| label.to_string())
    }
}

// ============================================================================
// GENERATOR
// ============================================================================

/// Generate the budget execution table: one record per (period, sector)
pub fn generate_budget(config: &GeneratorConfig, rng: &mut StdRng) -> BudgetTable {
    let mut records = Vec::with_capacity(config.periods * config.sectors.len());

    for period in 0..config.periods {
        let date = config.period_date(period);
        for sector in &config.sectors {
            let planned = rng.random_range(config.planned_budget.0..config.planned_budget.1);
            let realized =
                planned * rng.random_range(config.realized_factor.0..config.realized_factor.1);

            records.push(BudgetRecord {
                date,
                sector: sector.clone(),
                planned,
                realized,
                execution_rate: (realized / planned) * 100.0,
            });
        }
    }

    BudgetTable { records }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn table() -> BudgetTable {
        let config = GeneratorConfig::default();
        let mut rng = StdRng::seed_from_u64(config.seed);
        generate_budget(&config, &mut rng)
    }

    #[test]
    fn test_record_count() {
        // 12 periods x 9 sectors
        assert_eq!(table().len(), 108);
    }

    #[test]
    fn test_realized_within_factor_of_planned() {
        for r in &table().records {
            let factor = r.realized / r.planned;
            assert!(factor >= 0.8 && factor < 1.2, "factor {} out of range", factor);
        }
    }

    #[test]
    fn test_execution_rate_consistent() {
        for r in &table().records {
            let expected = (r.realized / r.planned) * 100.0;
            assert!((r.execution_rate - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_mean_execution_rate_in_band() {
        let rate = table().mean_execution_rate();
        assert!(rate > 80.0 && rate < 120.0, "mean rate {}", rate);
    }

    #[test]
    fn test_realized_by_sector_covers_all_sectors() {
        let totals = table().realized_by_sector();
        assert_eq!(totals.len(), 9);
        assert!(totals.contains_key("Saúde"));
        assert!(totals.values().all(|v| *v > 0.0));
    }

    #[test]
    fn test_top_sector_matches_manual_max() {
        let t = table();
        let totals = t.realized_by_sector();
        let top = t.top_sector_by_realized().unwrap();

        let top_total = totals[&top];
        assert!(totals.values().all(|v| *v <= top_total));
    }

    #[test]
    fn test_empty_table_totals() {
        let t = BudgetTable { records: vec![] };
        assert_eq!(t.mean_execution_rate(), 0.0);
        assert!(t.top_sector_by_realized().is_none());
    }
}
