// Fiscal Panorama - Core Library
// Synthetic Angolan public-finance datasets plus a keyword-driven
// assistant, shared by the TUI, the API server, and the tests.

pub mod assistant;
pub mod datasets;
pub mod format;

// Re-export commonly used types
pub use assistant::{answer, matched_topics, Topic, TopicRule, FALLBACK_HELP, TOPIC_RULES};
pub use datasets::{
    BudgetRecord, BudgetTable, DebtRecord, DebtTable, FiscalData, GeneratorConfig,
    IndicatorRecord, IndicatorTable, RevenueRecord, RevenueTable,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
