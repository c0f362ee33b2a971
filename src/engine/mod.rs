// ==========================================
// 瓷砖产线成本核算系统 - 引擎层
// ==========================================
// 职责: 成本归集与分摊的纯计算,不拼 SQL,不做 I/O
// 红线: 引擎不返回错误,异常输入降级为 0
// ==========================================

pub mod assembler;
pub mod calculators;
pub mod history;
pub mod orchestrator;
pub mod production;
pub mod settings_resolver;

// 重导出核心引擎
pub use assembler::ResultAssembler;
pub use calculators::{default_calculators, CalcContext, CategoryCalculator};
pub use history::{window_days, DailyRowProvider, HistoryAggregator};
pub use orchestrator::{CostBreakdown, CostEngine};
pub use production::{net_quantity, ProductionAggregator, ProductionSummary};
pub use settings_resolver::SettingsResolver;
