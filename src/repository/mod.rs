// ==========================================
// 瓷砖产线成本核算系统 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================
// 职责: 提供数据访问接口,屏蔽数据库细节
// 约束: 所有查询使用参数化,防止 SQL 注入
// ==========================================

pub mod data_source;
pub mod error;
pub mod memory_source;
pub mod owner_profile_repo;
pub mod production_repo;
pub mod settings_repo;
pub mod sql_value;
pub mod sqlite_source;

// 重导出核心仓储
pub use data_source::{CostDataSource, DateRangeFilter};
pub use error::{RepositoryError, RepositoryResult};
pub use memory_source::InMemoryCostDataSource;
pub use owner_profile_repo::OwnerProfileRepository;
pub use production_repo::ProductionRepository;
pub use settings_repo::SettingsRepository;
pub use sqlite_source::SqliteCostDataSource;
