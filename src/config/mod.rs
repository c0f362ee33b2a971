// ==========================================
// 瓷砖产线成本核算系统 - 配置层
// ==========================================
// 职责: 核算口径（公式常量、规格目录、色料单价）管理,支持覆写
// 存储: config_kv 表
// ==========================================

pub mod config_manager;
pub mod config_reader;
pub mod costing_config;
pub mod error;

// 重导出核心配置
pub use config_manager::{config_keys, ConfigManager};
pub use config_reader::CostingConfigReader;
pub use costing_config::{ColorantRates, CostingConfig, SizeProfile};
pub use error::{ConfigError, ConfigResult};
