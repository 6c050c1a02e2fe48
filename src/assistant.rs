// 💡 Financial Assistant - keyword-driven query answering
// Rules as data: an ordered list of (topic, keyword set) pairs evaluated
// against the lowercased question. Every matching topic contributes one
// templated fragment; the fragments concatenate in canonical topic order
// no matter how the question orders its keywords.
//
// Pure and deterministic: same question + same tables = same answer.

use crate::datasets::FiscalData;
use crate::format;

// ============================================================================
// TOPICS
// ============================================================================

/// The five subject areas the assistant recognizes, in answer order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    /// Budget execution and spending by sector
    Budget,
    /// Fiscal revenue and collection by region
    Revenue,
    /// Public debt stock and interest rates
    Debt,
    /// Macro indicators (GDP, inflation, exchange rate)
    Indicators,
    /// Temporal trend of inflation over the horizon
    Trend,
}

/// One dispatch rule: a topic and the keywords that trigger it
pub struct TopicRule {
    pub topic: Topic,
    pub keywords: &'static [&'static str],
}

impl TopicRule {
    /// True when any keyword is a substring of the normalized question
    fn matches(&self, normalized: &str) -> bool {
        self.keywords.iter().any(|kw| normalized.contains(kw))
    }
}

/// Dispatch table, in the canonical answer order.
/// Keywords are Portuguese and already lowercase.
pub const TOPIC_RULES: &[TopicRule] = &[
    TopicRule {
        topic: Topic::Budget,
        keywords: &["orçamento", "gastos", "despesas"],
    },
    TopicRule {
        topic: Topic::Revenue,
        keywords: &["receita", "arrecadação", "fiscal"],
    },
    TopicRule {
        topic: Topic::Debt,
        keywords: &["dívida", "juros", "empréstimos"],
    },
    TopicRule {
        topic: Topic::Indicators,
        keywords: &["indicadores", "economia", "inflação", "pib"],
    },
    TopicRule {
        topic: Topic::Trend,
        keywords: &["evolução", "tendência", "variação"],
    },
];

/// Fixed help text returned when no topic matched
pub const FALLBACK_HELP: &str = "\
Posso ajudar com análises sobre:
- Execução orçamentária e gastos por setor
- Receitas fiscais e arrecadação por região
- Situação da dívida pública e juros
- Indicadores econômicos (PIB, inflação, câmbio)
- Tendências e evolução temporal dos dados

Por favor, reformule sua pergunta usando algumas dessas palavras-chave.";

// ============================================================================
// ANSWERING
// ============================================================================

/// Answer a free-text question about the session's tables.
///
/// The question is lowercased, every rule in `TOPIC_RULES` is tested in
/// order, and each match appends its fragment. With no match at all the
/// fixed `FALLBACK_HELP` text is returned.
pub fn answer(question: &str, data: &FiscalData) -> String {
    let normalized = question.to_lowercase();

    let mut response = String::new();
    for rule in TOPIC_RULES {
        if rule.matches(&normalized) {
            response.push_str(&fragment(rule.topic, data));
        }
    }

    if response.is_empty() {
        return FALLBACK_HELP.to_string();
    }

    response
}

/// Topics a question would trigger, in canonical order
pub fn matched_topics(question: &str) -> Vec<Topic> {
    let normalized = question.to_lowercase();
    TOPIC_RULES
        .iter()
        .filter(|rule| rule.matches(&normalized))
        .map(|rule| rule.topic)
        .collect()
}

/// Templated sentence fragment for one topic
fn fragment(topic: Topic, data: &FiscalData) -> String {
    match topic {
        Topic::Budget => {
            let rate = data.budget.mean_execution_rate();
            let mut text = format!(
                "A taxa média de execução orçamentária é de {}%. ",
                format::percent(rate)
            );
            if let Some(sector) = data.budget.top_sector_by_realized() {
                text.push_str(&format!(
                    "O setor com maior orçamento realizado é {}. ",
                    sector
                ));
            }
            text
        }
        Topic::Revenue => {
            let total = data.revenue.total_value();
            let mut text = format!(
                "A receita total é de {} {}. ",
                format::amount(total),
                format::CURRENCY
            );
            if let Some(region) = data.revenue.top_region_by_value() {
                text.push_str(&format!("A região com maior arrecadação é {}. ", region));
            }
            text
        }
        Topic::Debt => {
            let total = data.debt.total_value();
            let rate = data.debt.mean_interest_rate() * 100.0;
            format!(
                "A dívida total é de {} {}. A taxa média de juros é de {}%. ",
                format::amount(total),
                format::CURRENCY,
                format::percent(rate)
            )
        }
        Topic::Indicators => {
            format!(
                "A inflação média é de {}%. A variação média do PIB é de {}%. ",
                format::percent(data.indicators.mean_inflation()),
                format::percent(data.indicators.mean_gdp_variation())
            )
        }
        Topic::Trend => match data.indicators.inflation_trend() {
            Some(trend) => format!(
                "A inflação teve uma variação de {}% no período. ",
                format::percent(trend)
            ),
            // Opening inflation of zero (or no data): the ratio is undefined
            None => "A variação da inflação no período é indefinida \
                     (inflação inicial igual a zero). "
                .to_string(),
        },
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasets::{
        BudgetTable, DebtTable, FiscalData, GeneratorConfig, IndicatorRecord, IndicatorTable,
        RevenueRecord, RevenueTable,
    };
    use chrono::NaiveDate;

    fn demo_data() -> FiscalData {
        FiscalData::generate(&GeneratorConfig::with_seed(2023))
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 1, 1).unwrap()
    }

    fn empty_data() -> FiscalData {
        FiscalData {
            budget: BudgetTable { records: vec![] },
            revenue: RevenueTable { records: vec![] },
            debt: DebtTable { records: vec![] },
            indicators: IndicatorTable { records: vec![] },
        }
    }

    #[test]
    fn test_no_keywords_returns_exact_fallback() {
        let data = demo_data();
        assert_eq!(answer("bom dia, tudo bem?", &data), FALLBACK_HELP);
    }

    #[test]
    fn test_empty_question_returns_fallback() {
        let data = demo_data();
        assert_eq!(answer("", &data), FALLBACK_HELP);
    }

    #[test]
    fn test_budget_query_contains_rate_and_top_sector() {
        let data = demo_data();
        let response = answer("Como está a execução do orçamento?", &data);

        let expected_rate = crate::format::percent(data.budget.mean_execution_rate());
        let expected_sector = data.budget.top_sector_by_realized().unwrap();

        assert!(response.contains(&format!("{}%", expected_rate)));
        assert!(response.contains(&expected_sector));
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let data = demo_data();
        let lower = answer("qual o orçamento?", &data);
        let upper = answer("QUAL O ORÇAMENTO?", &data);
        assert_eq!(lower, upper);
        assert_ne!(lower, FALLBACK_HELP);
    }

    #[test]
    fn test_idempotent_for_same_inputs() {
        let data = demo_data();
        let question = "receitas e dívida pública";
        assert_eq!(answer(question, &data), answer(question, &data));
    }

    #[test]
    fn test_multi_topic_in_canonical_order() {
        let data = demo_data();

        // Debt keyword appears before the budget keyword in the question;
        // the answer still leads with the budget fragment.
        let response = answer("juros da dívida e gastos por setor", &data);
        let expected = format!(
            "{}{}",
            fragment(Topic::Budget, &data),
            fragment(Topic::Debt, &data)
        );

        assert_eq!(response, expected);
    }

    #[test]
    fn test_matched_topics_order_and_exactness() {
        let topics = matched_topics("qual a dívida e o orçamento?");
        assert_eq!(topics, vec![Topic::Budget, Topic::Debt]);

        assert!(matched_topics("nada a ver").is_empty());
    }

    #[test]
    fn test_revenue_scenario_top_region_and_total() {
        let record = |region: &str, value: f64| RevenueRecord {
            date: date(),
            revenue_type: "IVA".to_string(),
            region: region.to_string(),
            value,
            monthly_target: value,
        };

        let mut data = empty_data();
        data.revenue = RevenueTable {
            records: vec![
                record("Benguela", 1_000_000.0),
                record("Luanda", 5_000_000.0),
                record("Luanda", 4_000_000.0),
                record("Cabinda", 2_500_000.0),
            ],
        };

        let response = answer("qual a receita?", &data);

        assert!(response.contains("Luanda"));
        assert!(response.contains("12,500,000.00 AOA"));
    }

    #[test]
    fn test_trend_zero_opening_inflation_reports_undefined() {
        let record = |inflation: f64| IndicatorRecord {
            date: date(),
            gdp_variation: 1.0,
            inflation,
            exchange_rate_usd: 520.0,
            international_reserves: 17_000.0,
            oil_price: 80.0,
        };

        let mut data = empty_data();
        data.indicators = IndicatorTable {
            records: vec![record(0.0), record(9.0)],
        };

        let response = answer("qual a tendência da inflação?", &data);

        assert!(response.contains("indefinida"));
        // "inflação" also triggers the indicators topic, in front
        assert!(response.starts_with("A inflação média é de"));
    }

    #[test]
    fn test_trend_fragment_value() {
        let record = |inflation: f64| IndicatorRecord {
            date: date(),
            gdp_variation: 0.5,
            inflation,
            exchange_rate_usd: 510.0,
            international_reserves: 16_000.0,
            oil_price: 75.0,
        };

        let mut data = empty_data();
        data.indicators = IndicatorTable {
            records: vec![record(8.0), record(6.0), record(10.0)],
        };

        // Only the trend keyword, so only the trend fragment
        let response = answer("qual a evolução no período?", &data);
        assert_eq!(response, "A inflação teve uma variação de 25.0% no período. ");
    }

    #[test]
    fn test_indicators_query() {
        let data = demo_data();
        let response = answer("como vai a economia?", &data);

        let expected = crate::format::percent(data.indicators.mean_inflation());
        assert!(response.contains(&format!("A inflação média é de {}%.", expected)));
    }

    #[test]
    fn test_fiscal_keyword_triggers_revenue() {
        let data = demo_data();
        let response = answer("política fiscal do governo", &data);
        assert!(response.starts_with("A receita total é de"));
    }
}
