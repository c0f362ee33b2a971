// ==========================================
// 瓷砖产线成本核算系统 - 领域模型层
// ==========================================
// 职责: 定义生产记录、费率快照、成本结果等领域实体
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod cost;
pub mod owner;
pub mod production;
pub mod settings;
pub mod size;
pub mod types;

// 重导出核心类型
pub use cost::{CategoryResult, CostMatrix, GasResult, GlazeResult, HistoryPoint, TOTAL_COLUMN};
pub use owner::OwnerProfile;
pub use production::{ColorantUsage, ProductionRow};
pub use settings::SettingsSnapshot;
pub use size::{parse_size_mm, size_area_sqm};
pub use types::{ColorantChannel, CostCategory, CostHead, HistoryRange};
