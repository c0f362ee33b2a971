// ==========================================
// Mock 配置实现 - 用于集成测试
// ==========================================

use async_trait::async_trait;
use tile_costing::config::{ConfigError, ConfigResult, CostingConfigReader};
use tile_costing::CostingConfig;

/// Mock 配置结构
#[derive(Debug, Clone)]
pub struct MockConfig {
    pub config: CostingConfig,
    pub fail: bool,
}

impl MockConfig {
    /// 创建默认配置
    pub fn new() -> Self {
        Self {
            config: CostingConfig::default(),
            fail: false,
        }
    }

    /// 固定并发度（便于断言）
    pub fn with_parallelism(parallelism: usize) -> Self {
        let mut mock = Self::new();
        mock.config.history_parallelism = parallelism;
        mock
    }

    /// 读取即失败
    pub fn failing() -> Self {
        Self {
            config: CostingConfig::default(),
            fail: true,
        }
    }
}

#[async_trait]
impl CostingConfigReader for MockConfig {
    async fn load_costing_config(&self) -> ConfigResult<CostingConfig> {
        if self.fail {
            return Err(ConfigError::ReadError {
                key: "costing_config".to_string(),
                message: "mock failure".to_string(),
            });
        }
        Ok(self.config.clone())
    }
}
