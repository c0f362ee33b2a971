// ==========================================
// 瓷砖产线成本核算系统 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 单位成本归集引擎（纯计算）+ 取数适配
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 通用工具 - 数值/日期容错
pub mod common;

// 领域层 - 实体与类型
pub mod domain;

// 配置层 - 核算口径
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一/schema）
pub mod db;

// 日志系统
pub mod logging;

// 引擎层 - 成本归集与分摊
pub mod engine;

// 数据仓储层 - 数据访问
pub mod repository;

// API 层 - 核算入口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{ColorantChannel, CostCategory, CostHead, HistoryRange};

// 领域实体
pub use domain::{
    CategoryResult, CostMatrix, GasResult, GlazeResult, HistoryPoint, OwnerProfile,
    ProductionRow, SettingsSnapshot,
};

// 配置
pub use config::{ConfigManager, CostingConfig, CostingConfigReader};

// 引擎
pub use engine::{
    CostBreakdown, CostEngine, DailyRowProvider, HistoryAggregator, ProductionAggregator,
    ResultAssembler, SettingsResolver,
};

// 仓储
pub use repository::{
    CostDataSource, DateRangeFilter, InMemoryCostDataSource, SqliteCostDataSource,
};

// API
pub use api::{ApiError, CostingApi, OwnerProfileCache};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "瓷砖产线成本核算系统";

// 数据库文件名
pub const DB_FILE_NAME: &str = "tile_costing.db";
