// ==========================================
// 瓷砖产线成本核算系统 - 核算配置读取 Trait
// ==========================================
// 职责: 定义成本引擎所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use crate::config::costing_config::CostingConfig;
use crate::config::error::ConfigResult;
use async_trait::async_trait;

// ==========================================
// CostingConfigReader Trait
// ==========================================
// 实现者: ConfigManager（从 config_kv 表读取）、测试中的 Mock
#[async_trait]
pub trait CostingConfigReader: Send + Sync {
    /// 读取完整核算口径
    ///
    /// # 返回
    /// - 已覆写的配置（未覆写字段为默认值）
    /// - 配置缺失或格式错误时返回默认配置,不视为错误
    async fn load_costing_config(&self) -> ConfigResult<CostingConfig>;

    /// 读取历史趋势并发度
    ///
    /// # 默认值
    /// - 0（按 CPU 核数）
    async fn get_history_parallelism(&self) -> ConfigResult<usize> {
        Ok(self.load_costing_config().await?.history_parallelism)
    }
}
